//! Drag-to-velocity tracking with inertial coasting.
//!
//! A pointer dragged across a bounded surface is sampled into a velocity
//! estimate; after release the tracked point keeps moving and decays
//! toward rest under frame-rate-independent exponential damping. The
//! engine owns one mutable [`DragState`] cell, mutated only by the
//! pointer sampler and the deceleration integrator, and notifies a single
//! observer with an immutable [`DragSnapshot`] after every mutation.
//!
//! Ticks come from a [`drift_core::TickSource`]: frame-synced
//! ([`drift_core::FrameTickSource`]) or fixed-interval
//! (`drift_runtime_std::IntervalTickSource`), selected by
//! [`drift_core::SchedulerMode`].

mod config;
mod engine;
mod events;
mod integrator;
mod sampler;
mod speed_limit;
mod state;

pub use config::{
    SimulationConfig, DECAY_REFERENCE_RATE, DEFAULT_DECELERATION_FACTOR, DEFAULT_MAX_SPEED,
    DEFAULT_POSITION, DEFAULT_VELOCITY_SCALE, SPEED_THRESHOLD,
};
pub use engine::DragEngine;
pub use events::PointerEventKind;
pub use speed_limit::limit_speed;
pub use state::{DragPhase, DragSnapshot};
