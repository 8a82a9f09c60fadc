use drift_geometry::Velocity;

/// Clamps `velocity` to `max_speed` while preserving its direction: when
/// the magnitude exceeds the cap, both components scale by
/// `max_speed / speed`; otherwise the vector is returned unchanged.
pub fn limit_speed(velocity: Velocity, max_speed: f32) -> Velocity {
    let speed = velocity.magnitude();
    if speed > max_speed {
        let factor = max_speed / speed;
        Velocity::new(velocity.x * factor, velocity.y * factor)
    } else {
        velocity
    }
}
