//! Momentum-based ship movement: capped turning, thrust, friction, integration.

use engine_core::{angle_delta, Transform, Velocity};

/// Friction applied to NPC velocity every tick.
pub const NPC_FRICTION: f32 = 0.99;
/// Friction applied to the player's velocity every tick.
pub const PLAYER_FRICTION: f32 = 0.98;

/// Rotate `transform` towards `target_angle` by at most `max_turn` radians.
///
/// If the remaining delta is smaller than `max_turn` the heading snaps exactly to the
/// target, so a ship never overshoots its bearing. Returns the remaining delta before
/// the turn was applied.
pub fn turn_towards(transform: &mut Transform, target_angle: f32, max_turn: f32) -> f32 {
    let delta = angle_delta(transform.angle, target_angle);
    if delta.abs() <= max_turn {
        transform.angle = engine_core::wrap_angle(target_angle);
    } else {
        transform.rotate(max_turn.copysign(delta));
    }
    delta
}

/// Accelerate along the current heading, then cap speed.
pub fn thrust(transform: &Transform, velocity: &mut Velocity, accel: f32, max_speed: f32) {
    velocity.linear += transform.forward() * accel;
    clamp_speed(velocity, max_speed);
}

/// Cap the velocity magnitude.
pub fn clamp_speed(velocity: &mut Velocity, max_speed: f32) {
    velocity.linear = velocity.linear.clamp_length_max(max_speed.max(0.0));
}

/// Decay velocity by `friction`, then move the transform one tick.
pub fn integrate(transform: &mut Transform, velocity: &mut Velocity, friction: f32) {
    velocity.linear *= friction;
    transform.translate(velocity.linear);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn small_delta_snaps_exactly() {
        let mut t = Transform::from_position_angle(Vec2::ZERO, 0.0);
        turn_towards(&mut t, 0.05, 0.1);
        assert_eq!(t.angle, 0.05);
    }

    #[test]
    fn large_delta_is_capped() {
        let mut t = Transform::from_position_angle(Vec2::ZERO, 0.0);
        turn_towards(&mut t, 1.0, 0.1);
        assert!((t.angle - 0.1).abs() < 1e-6);
        turn_towards(&mut t, -1.0, 0.1);
        assert!(t.angle.abs() < 1e-6);
    }

    #[test]
    fn thrust_respects_speed_cap() {
        let t = Transform::default();
        let mut v = Velocity::default();
        for _ in 0..100 {
            thrust(&t, &mut v, 1.0, 4.0);
        }
        assert!((v.linear.length() - 4.0).abs() < 1e-4);
        assert!(v.linear.y < 0.0);
    }

    #[test]
    fn friction_applies_before_movement() {
        let mut t = Transform::default();
        let mut v = Velocity::new(Vec2::new(10.0, 0.0));
        integrate(&mut t, &mut v, NPC_FRICTION);
        assert!((t.position.x - 9.9).abs() < 1e-4);
        assert!((v.linear.x - 9.9).abs() < 1e-4);
    }
}
