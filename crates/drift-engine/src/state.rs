use drift_geometry::{Point, Rect, Velocity};

use crate::config::DEFAULT_POSITION;

/// Which phase of the drag lifecycle a snapshot was taken in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Pointer held down; velocity derives fresh from pointer samples.
    Dragging,
    /// Released with residual velocity; damping is running it down.
    Coasting,
    /// Released and at rest.
    Resting,
}

/// Immutable projection of the drag state handed to the observer after
/// every mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSnapshot {
    /// Normalized location within the tracked surface, `[0,1]` per axis.
    pub position: Point,
    /// Normalized units per second, magnitude bounded by the speed cap.
    pub velocity: Velocity,
    /// Heading in degrees, `atan2(vy, vx)` convention; `0` at rest.
    pub direction: f32,
    /// Magnitude of `velocity`.
    pub speed: f32,
    pub is_dragging: bool,
}

impl DragSnapshot {
    pub fn phase(&self) -> DragPhase {
        if self.is_dragging {
            DragPhase::Dragging
        } else if self.speed > 0.0 {
            DragPhase::Coasting
        } else {
            DragPhase::Resting
        }
    }
}

/// The single mutable drag state cell. Owned exclusively by the engine;
/// the sampler and integrator mutate it through `&mut` passed down from
/// there, and every field write keeps the derived `speed`/`direction`
/// pair consistent with `velocity` via [`DragState::set_velocity`].
pub(crate) struct DragState {
    pub(crate) position: Point,
    pub(crate) velocity: Velocity,
    pub(crate) direction: f32,
    pub(crate) speed: f32,
    pub(crate) is_dragging: bool,
    /// Last accepted pointer sample, normalized. Not part of snapshots.
    pub(crate) last_position: Point,
    /// Timestamp of the last accepted sample or tick, monotonic nanos.
    pub(crate) last_time_nanos: u64,
    /// Surface rect captured on pointer-down, used to normalize every
    /// sample of the gesture.
    pub(crate) surface: Rect,
}

impl DragState {
    pub(crate) fn new() -> Self {
        Self {
            position: DEFAULT_POSITION,
            velocity: Velocity::ZERO,
            direction: 0.0,
            speed: 0.0,
            is_dragging: false,
            last_position: Point::ZERO,
            last_time_nanos: 0,
            surface: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Writes `velocity` and recomputes `speed` and `direction` with it.
    /// The derived pair is never written independently.
    pub(crate) fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
        self.speed = velocity.magnitude();
        self.direction = velocity.direction_degrees();
    }

    pub(crate) fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            position: self.position,
            velocity: self.velocity,
            direction: self.direction,
            speed: self.speed,
            is_dragging: self.is_dragging,
        }
    }
}
