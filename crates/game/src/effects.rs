//! Short-lived visual effects: explosions and floating combat text.
//!
//! Effects live in their own `hecs` world so the simulation can spawn them
//! freely and renderers can read them without touching ship state.

use engine_core::{Lifetime, Transform, Velocity};
use glam::Vec2;
use hecs::World;

/// Float texts rise this many units per tick.
const FLOAT_RISE: f32 = 0.5;
pub const FLOAT_TEXT_MS: f32 = 1000.0;
const EXPLOSION_MS: f32 = 500.0;
/// Random extra explosion life, cosmetic only.
const EXPLOSION_JITTER_MS: f32 = 200.0;

pub struct Explosion {
    pub radius: f32,
    pub color: &'static str,
}

pub struct FloatText {
    pub text: String,
    pub color: &'static str,
}

/// Render-facing copy of an explosion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionView {
    pub position: Vec2,
    pub radius: f32,
    pub color: &'static str,
    /// 1.0 when fresh, 0.0 at expiry.
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatTextView {
    pub position: Vec2,
    pub text: String,
    pub color: &'static str,
    pub remaining: f32,
}

pub struct Effects {
    world: World,
}

impl Default for Effects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    pub fn spawn_explosion(&mut self, position: Vec2, radius: f32, color: &'static str) {
        let life = EXPLOSION_MS + rand::random::<f32>() * EXPLOSION_JITTER_MS;
        self.world.spawn((
            Transform::from_position(position),
            Lifetime::new(life),
            Explosion { radius, color },
        ));
    }

    pub fn spawn_float_text(&mut self, position: Vec2, text: impl Into<String>, color: &'static str, duration_ms: f32) {
        self.world.spawn((
            Transform::from_position(position),
            Velocity::new(Vec2::new(0.0, -FLOAT_RISE)),
            Lifetime::new(duration_ms),
            FloatText {
                text: text.into(),
                color,
            },
        ));
    }

    /// Age every effect by one tick and despawn the expired ones.
    pub fn update(&mut self, dt: f32) {
        for (_, (transform, velocity)) in self.world.query_mut::<(&mut Transform, &Velocity)>() {
            transform.translate(velocity.linear);
        }

        let mut expired = Vec::new();
        for (entity, lifetime) in self.world.query_mut::<&mut Lifetime>() {
            if lifetime.update(dt) {
                expired.push(entity);
            }
        }
        for entity in expired {
            self.world.despawn(entity).ok();
        }
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn explosions(&self) -> Vec<ExplosionView> {
        self.world
            .query::<(&Transform, &Lifetime, &Explosion)>()
            .iter()
            .map(|(_, (transform, lifetime, explosion))| ExplosionView {
                position: transform.position,
                radius: explosion.radius,
                color: explosion.color,
                remaining: lifetime.fraction(),
            })
            .collect()
    }

    pub fn float_texts(&self) -> Vec<FloatTextView> {
        self.world
            .query::<(&Transform, &Lifetime, &FloatText)>()
            .iter()
            .map(|(_, (transform, lifetime, float))| FloatTextView {
                position: transform.position,
                text: float.text.clone(),
                color: float.color,
                remaining: lifetime.fraction(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_text_rises_and_expires() {
        let mut fx = Effects::new();
        fx.spawn_float_text(Vec2::new(10.0, 10.0), "-4", "#f44", 100.0);
        fx.update(50.0);
        let floats = fx.float_texts();
        assert_eq!(floats.len(), 1);
        assert_eq!(floats[0].text, "-4");
        assert!(floats[0].position.y < 10.0);
        assert!((floats[0].remaining - 0.5).abs() < 1e-6);
        fx.update(50.0);
        assert!(fx.is_empty());
    }

    #[test]
    fn explosions_outlive_their_base_duration_at_most_by_jitter() {
        let mut fx = Effects::new();
        fx.spawn_explosion(Vec2::ZERO, 30.0, "#fa0");
        fx.update(EXPLOSION_MS - 1.0);
        assert_eq!(fx.explosions().len(), 1);
        fx.update(EXPLOSION_JITTER_MS + 1.0);
        assert!(fx.explosions().is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut fx = Effects::new();
        fx.spawn_explosion(Vec2::ZERO, 30.0, "#fa0");
        fx.spawn_float_text(Vec2::ZERO, "ESCAPE FAILED", "#f44", FLOAT_TEXT_MS);
        assert_eq!(fx.len(), 2);
        fx.clear();
        assert!(fx.is_empty());
    }
}
