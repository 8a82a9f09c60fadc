use super::{advance, decay_factor};
use crate::config::{SimulationConfig, SPEED_THRESHOLD};
use crate::state::DragState;
use drift_geometry::{Point, Velocity};

const FRAME: u64 = 16_666_667; // ~1/60s in nanos
const SECOND: u64 = 1_000_000_000;

fn coasting_state(velocity: Velocity, last_time_nanos: u64) -> DragState {
    let mut state = DragState::new();
    state.set_velocity(velocity);
    state.is_dragging = false;
    state.last_time_nanos = last_time_nanos;
    state
}

#[test]
fn decay_factor_normalizes_to_the_reference_rate() {
    // One 60Hz frame of factor 0.95 decays by exactly 0.95.
    let one_frame = decay_factor(0.95, 1.0 / 60.0);
    assert!((one_frame - 0.95).abs() < 1e-6);

    // Half the interval decays by sqrt(0.95).
    let half_frame = decay_factor(0.95, 0.5 / 60.0);
    assert!((half_frame - 0.95f32.sqrt()).abs() < 1e-6);
}

#[test]
fn decay_factor_is_a_semigroup_over_durations() {
    // Damping over `a` then `b` equals damping over `a + b`.
    for (a, b) in [(0.013, 0.021), (1.0 / 144.0, 1.0 / 30.0), (0.1, 0.25)] {
        let split = decay_factor(0.95, a) * decay_factor(0.95, b);
        let joined = decay_factor(0.95, a + b);
        assert!(
            (split - joined).abs() < 1e-6,
            "split {split} != joined {joined} for ({a}, {b})"
        );
    }
}

#[test]
fn coasting_tick_damps_and_advances() {
    // Released with velocity (0.1, 0); one tick at 1/60s, factor 0.95.
    let config = SimulationConfig::default();
    let mut state = coasting_state(Velocity::new(0.1, 0.0), SECOND);
    state.position = Point::new(0.51, 0.5);

    advance(&mut state, &config, SECOND + FRAME);

    assert!((state.velocity.x - 0.095).abs() < 1e-4);
    assert!(state.velocity.y.abs() < 1e-6);
    assert!(state.speed > SPEED_THRESHOLD, "still coasting");
    let expected_x = 0.51 + 0.095 * (FRAME as f32 / SECOND as f32);
    assert!((state.position.x - expected_x).abs() < 1e-5);
    assert_eq!(state.last_time_nanos, SECOND + FRAME);
}

#[test]
fn dragging_tick_integrates_without_damping() {
    let config = SimulationConfig::default();
    let mut state = DragState::new();
    state.set_velocity(Velocity::new(0.2, -0.1));
    state.is_dragging = true;
    state.last_time_nanos = SECOND;

    advance(&mut state, &config, SECOND + SECOND / 10);

    assert_eq!(state.velocity, Velocity::new(0.2, -0.1));
    assert!((state.position.x - 0.52).abs() < 1e-6);
    assert!((state.position.y - 0.49).abs() < 1e-6);
}

#[test]
fn slow_coasting_snaps_to_rest_and_stays_there() {
    // Initial speed 2e-4 with factor 0.7 falls below the threshold on
    // the second tick; everything after that is inert.
    let mut config = SimulationConfig::default();
    config.deceleration_factor = 0.7;
    let mut state = coasting_state(Velocity::new(2e-4, 0.0), 0);

    let mut now = 0u64;
    let mut ticks_until_rest = 0u32;
    while state.speed > 0.0 {
        now += FRAME;
        advance(&mut state, &config, now);
        ticks_until_rest += 1;
        assert!(ticks_until_rest < 100, "decay must terminate");
    }
    assert_eq!(state.velocity, Velocity::ZERO);
    assert_eq!(state.direction, 0.0);

    let rest_position = state.position;
    for _ in 0..5 {
        now += FRAME;
        advance(&mut state, &config, now);
        assert_eq!(state.velocity, Velocity::ZERO);
        assert_eq!(state.position, rest_position);
    }
}

#[test]
fn stale_overspeed_velocity_is_reclamped_while_coasting() {
    let config = SimulationConfig::default();
    let mut state = coasting_state(Velocity::new(2.0, 0.0), SECOND);

    advance(&mut state, &config, SECOND + FRAME);

    assert!((state.speed - config.max_speed).abs() < 1e-5);
}

#[test]
fn boundary_clamp_stops_position_but_not_velocity() {
    // Stale unclamped velocity injected for the test: integration would
    // carry x to 1.49, the clamp pins it at the edge.
    let config = SimulationConfig::default();
    let mut state = DragState::new();
    state.position = Point::new(0.99, 0.5);
    state.set_velocity(Velocity::new(5.0, 0.0));
    state.is_dragging = true;
    state.last_time_nanos = SECOND;

    advance(&mut state, &config, SECOND + SECOND / 10);

    assert_eq!(state.position.x, 1.0);
    assert_eq!(state.position.y, 0.5);
    assert_eq!(state.velocity, Velocity::new(5.0, 0.0));
}

#[test]
fn zero_elapsed_tick_is_inert() {
    let config = SimulationConfig::default();
    let mut state = coasting_state(Velocity::new(0.1, 0.0), SECOND);
    state.position = Point::new(0.4, 0.4);

    advance(&mut state, &config, SECOND);

    // factor^0 == 1: no decay, no movement, timestamp unchanged.
    assert_eq!(state.velocity, Velocity::new(0.1, 0.0));
    assert_eq!(state.position, Point::new(0.4, 0.4));
    assert_eq!(state.last_time_nanos, SECOND);
}
