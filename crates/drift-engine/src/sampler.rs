//! Pointer sampling: converts raw device coordinates and a surface rect
//! into normalized drag state transitions.
//!
//! Each function returns whether it mutated the state; the engine emits
//! one observer notification per accepted mutation. Rejected inputs
//! (degenerate surface, stale sample) leave the state untouched.

use drift_geometry::{Point, Rect, Velocity};

use crate::config::SimulationConfig;
use crate::speed_limit::limit_speed;
use crate::state::DragState;

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

pub(crate) fn pointer_down(
    state: &mut DragState,
    raw: Point,
    surface: Rect,
    now_nanos: u64,
) -> bool {
    if !surface.has_area() {
        log::debug!(
            "ignoring pointer down on zero-area surface {}x{}",
            surface.width,
            surface.height
        );
        return false;
    }
    let normalized = surface.normalized(raw);
    state.is_dragging = true;
    state.set_velocity(Velocity::ZERO);
    state.last_position = normalized;
    state.last_time_nanos = now_nanos;
    state.surface = surface;
    true
}

pub(crate) fn pointer_move(
    state: &mut DragState,
    config: &SimulationConfig,
    raw: Point,
    now_nanos: u64,
) -> bool {
    if !state.is_dragging {
        return false;
    }
    // Covers duplicate and out-of-order timestamps in one guard.
    let delta_nanos = now_nanos.saturating_sub(state.last_time_nanos);
    if delta_nanos == 0 {
        log::trace!("discarding pointer sample with non-positive delta time");
        return false;
    }
    let delta_time = delta_nanos as f32 / NANOS_PER_SECOND;
    let normalized = state.surface.normalized(raw);

    let delta_x = (normalized.x - state.last_position.x) * config.velocity_scale;
    let delta_y = (normalized.y - state.last_position.y) * config.velocity_scale;

    state.position = Point::new(state.position.x + delta_x, state.position.y + delta_y)
        .clamped_unit();
    let raw_velocity = Velocity::new(delta_x / delta_time, delta_y / delta_time);
    state.set_velocity(limit_speed(raw_velocity, config.max_speed));
    state.last_position = normalized;
    state.last_time_nanos = now_nanos;
    true
}

/// Ends the drag, leaving the last derived velocity in place as the
/// initial coasting velocity. Releases can repeat (mouse-up followed by
/// a leave both map here); only the first one mutates.
pub(crate) fn pointer_up(state: &mut DragState) -> bool {
    if !state.is_dragging {
        return false;
    }
    state.is_dragging = false;
    true
}

#[cfg(test)]
#[path = "tests/sampler_tests.rs"]
mod tests;
