//! 2D transform and heading utilities.
//!
//! Headings are measured in radians with 0 pointing "up" the screen (−y) and
//! increasing clockwise, so the forward vector is `(sin a, −cos a)`.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Position and heading of a ship or effect in local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec2,
    pub angle: f32,
}

impl Transform {
    /// Create a new transform at the given position, facing up.
    pub fn from_position(position: Vec2) -> Self {
        Self { position, angle: 0.0 }
    }

    /// Create a new transform with position and heading.
    pub fn from_position_angle(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Unit vector along the current heading.
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.angle)
    }

    /// Heading that would point this transform at `target`.
    pub fn bearing_to(&self, target: Vec2) -> f32 {
        bearing(self.position, target)
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotate the heading by `delta` radians.
    pub fn rotate(&mut self, delta: f32) {
        self.angle = wrap_angle(self.angle + delta);
    }
}

/// Unit vector for a heading.
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Heading from `from` towards `to`.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.x.atan2(-d.y)
}

/// Wrap an angle into (−π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Signed smallest rotation taking heading `from` to heading `to`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_points_up_at_zero_heading() {
        let t = Transform::default();
        let f = t.forward();
        assert!(f.x.abs() < 1e-6);
        assert!((f.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn bearing_matches_forward() {
        let t = Transform::from_position(Vec2::new(10.0, 10.0));
        let target = Vec2::new(40.0, -20.0);
        let facing = Transform::from_position_angle(t.position, t.bearing_to(target));
        let dir = (target - t.position).normalize();
        assert!((facing.forward() - dir).length() < 1e-5);
    }

    #[test]
    fn angle_delta_takes_short_way_round() {
        let d = angle_delta(3.0, -3.0);
        assert!(d > 0.0 && d < 0.3);
        let d = angle_delta(-3.0, 3.0);
        assert!(d < 0.0 && d > -0.3);
    }

    #[test]
    fn rotate_keeps_angle_wrapped() {
        let mut t = Transform::default();
        for _ in 0..100 {
            t.rotate(0.5);
        }
        assert!(t.angle > -PI && t.angle <= PI);
    }
}
