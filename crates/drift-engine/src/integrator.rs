//! Deceleration integrator: advances the drag state one simulation step
//! per tick, damping the velocity while coasting and integrating the
//! position in every phase.

use drift_geometry::{Point, Velocity};

use crate::config::{SimulationConfig, DECAY_REFERENCE_RATE, SPEED_THRESHOLD};
use crate::speed_limit::limit_speed;
use crate::state::DragState;

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Frame-rate-independent damping multiplier for one step of
/// `delta_time` seconds.
///
/// Satisfies the semigroup law `decay(a) * decay(b) == decay(a + b)`, so
/// damping over two short intervals equals damping over their sum and the
/// decay curve does not depend on the tick rate.
pub(crate) fn decay_factor(deceleration_factor: f32, delta_time: f32) -> f32 {
    deceleration_factor.powf(delta_time * DECAY_REFERENCE_RATE)
}

/// One simulation step at `frame_time_nanos`. Always mutates (the tick
/// timestamp advances unconditionally), so the engine notifies once per
/// tick.
pub(crate) fn advance(
    state: &mut DragState,
    config: &SimulationConfig,
    frame_time_nanos: u64,
) -> bool {
    let delta_time =
        frame_time_nanos.saturating_sub(state.last_time_nanos) as f32 / NANOS_PER_SECOND;

    if !state.is_dragging {
        let factor = decay_factor(config.deceleration_factor, delta_time);
        let damped = Velocity::new(state.velocity.x * factor, state.velocity.y * factor);
        let limited = limit_speed(damped, config.max_speed);
        if limited.magnitude() < SPEED_THRESHOLD {
            state.set_velocity(Velocity::ZERO);
        } else {
            state.set_velocity(limited);
        }
    }

    // Hard clamp at the surface boundary: motion stops progressing on
    // that axis, the velocity itself is untouched.
    state.position = Point::new(
        state.position.x + state.velocity.x * delta_time,
        state.position.y + state.velocity.y * delta_time,
    )
    .clamped_unit();

    state.last_time_nanos = frame_time_nanos;
    true
}

#[cfg(test)]
#[path = "tests/integrator_tests.rs"]
mod tests;
