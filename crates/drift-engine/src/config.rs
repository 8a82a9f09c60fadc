use drift_core::SchedulerMode;
use drift_geometry::Point;

/// Pointer-delta-to-velocity multiplier applied to each drag sample.
pub const DEFAULT_VELOCITY_SCALE: f32 = 0.1;

/// Per-reference-frame damping factor applied while coasting.
pub const DEFAULT_DECELERATION_FACTOR: f32 = 0.95;

/// Maximum speed in normalized units per second.
pub const DEFAULT_MAX_SPEED: f32 = 1.0;

/// Where the tracked point rests before any input: the surface center.
pub const DEFAULT_POSITION: Point = Point::new(0.5, 0.5);

/// Speed below which a coasting tick snaps the velocity to zero.
/// Exponential damping alone never reaches rest; this bounds the number
/// of ticks with visible motion.
pub const SPEED_THRESHOLD: f32 = 1e-4;

/// Reference tick rate for the damping exponent, in ticks per second.
///
/// `deceleration_factor` describes the per-tick decay at exactly this
/// rate; each tick raises it to `delta_time * DECAY_REFERENCE_RATE` so
/// the real-time decay curve is identical at 30 Hz, 60 Hz, or 144 Hz.
/// Changing this constant changes the perceived coasting feel for every
/// configured `deceleration_factor`.
pub const DECAY_REFERENCE_RATE: f32 = 60.0;

/// Tuning parameters for one engine run, supplied at construction and
/// immutable until the engine is rebuilt. Callers keep
/// `deceleration_factor` in `(0, 1)` and `max_speed` above zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Multiplier from normalized pointer delta to applied delta.
    pub velocity_scale: f32,
    /// Per-reference-frame damping factor, in `(0, 1)`.
    pub deceleration_factor: f32,
    /// Speed cap in normalized units per second, above zero.
    pub max_speed: f32,
    /// Which tick backend drives the coasting loop.
    pub scheduler_mode: SchedulerMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            velocity_scale: DEFAULT_VELOCITY_SCALE,
            deceleration_factor: DEFAULT_DECELERATION_FACTOR,
            max_speed: DEFAULT_MAX_SPEED,
            scheduler_mode: SchedulerMode::FrameSynced,
        }
    }
}
