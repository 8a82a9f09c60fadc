//! Core runtime for the drift drag tracking engine.
//!
//! Hosts embed a [`Runtime`] on their UI thread and feed it timestamps:
//! display-synced hosts call [`RuntimeHandle::drain_frame_callbacks`] once
//! per refresh, while wall-clock timers post timestamps through the
//! [`TickDispatcher`] from any thread and the runtime thread applies them
//! with [`RuntimeHandle::pump`].

mod frame_clock;
mod platform;
mod runtime;
mod tick;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle, TickDispatcher};
pub use tick::{FrameTickSource, SchedulerMode, TickSource};
