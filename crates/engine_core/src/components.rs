//! Common components shared by ships, projectiles and effects.

use glam::Vec2;

/// Velocity in units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec2,
}

impl Velocity {
    pub fn new(linear: Vec2) -> Self {
        Self { linear }
    }
}

/// Result of pushing damage through shield and hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Damage soaked by the shield.
    pub absorbed: f32,
    /// Damage that reached the hull.
    pub hull_damage: f32,
    /// Hull reached zero on this hit.
    pub destroyed: bool,
}

/// Hull and shield pool for damageable ships.
///
/// Invariants: `0 <= hull <= max_hull` and `0 <= shield <= max_shield`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Durability {
    pub hull: f32,
    pub max_hull: f32,
    pub shield: f32,
    pub max_shield: f32,
}

impl Durability {
    pub fn new(max_hull: f32, max_shield: f32) -> Self {
        Self {
            hull: max_hull,
            max_hull,
            shield: max_shield,
            max_shield,
        }
    }

    /// Apply incoming damage: the shield absorbs first, the remainder hits the hull.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let amount = amount.max(0.0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let hull_damage = amount - absorbed;
        self.hull = (self.hull - hull_damage).max(0.0);
        DamageOutcome {
            absorbed,
            hull_damage,
            destroyed: self.is_dead(),
        }
    }

    /// Restore hull, capped at max.
    pub fn repair(&mut self, amount: f32) {
        self.hull = (self.hull + amount).clamp(0.0, self.max_hull);
    }

    /// Restore shield, capped at max.
    pub fn recharge(&mut self, amount: f32) {
        self.shield = (self.shield + amount).clamp(0.0, self.max_shield);
    }

    pub fn is_dead(&self) -> bool {
        self.hull <= 0.0
    }

    pub fn shield_fraction(&self) -> f32 {
        if self.max_shield > 0.0 {
            self.shield / self.max_shield
        } else {
            0.0
        }
    }

    pub fn hull_fraction(&self) -> f32 {
        if self.max_hull > 0.0 {
            self.hull / self.max_hull
        } else {
            0.0
        }
    }
}

/// Lifetime for temporary entities (explosions, floating text).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

impl Lifetime {
    pub fn new(ms: f32) -> Self {
        Self {
            remaining: ms,
            total: ms,
        }
    }

    /// Age the entity. Returns true once it has expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// Remaining life as a fraction of the initial life (1.0 = fresh).
    pub fn fraction(&self) -> f32 {
        if self.total > 0.0 {
            (self.remaining / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Countdown timer gating a repeatable action.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    pub remaining: f32,
}

impl Cooldown {
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Decay towards zero; never goes negative.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn trigger(&mut self, duration: f32) {
        self.remaining = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_absorbs_small_hits() {
        let mut d = Durability::new(50.0, 20.0);
        let out = d.take_damage(8.0);
        assert_eq!(d.shield, 12.0);
        assert_eq!(d.hull, 50.0);
        assert_eq!(out.absorbed, 8.0);
        assert_eq!(out.hull_damage, 0.0);
        assert!(!out.destroyed);
    }

    #[test]
    fn overflow_damage_reaches_hull() {
        let mut d = Durability::new(50.0, 20.0);
        d.take_damage(30.0);
        assert_eq!(d.shield, 0.0);
        assert_eq!(d.hull, 40.0);
    }

    #[test]
    fn hull_never_goes_negative() {
        let mut d = Durability::new(10.0, 0.0);
        let out = d.take_damage(25.0);
        assert_eq!(d.hull, 0.0);
        assert!(out.destroyed);
    }

    #[test]
    fn unshielded_hull_takes_full_hit() {
        let mut d = Durability::new(40.0, 0.0);
        d.take_damage(15.0);
        assert_eq!(d.hull, 25.0);
        assert_eq!(d.shield, 0.0);
        assert!(!d.is_dead());
    }

    #[test]
    fn cooldown_gates_until_zero() {
        let mut c = Cooldown::default();
        assert!(c.is_ready());
        c.trigger(500.0);
        c.tick(300.0);
        assert!(!c.is_ready());
        c.tick(300.0);
        assert!(c.is_ready());
        assert_eq!(c.remaining, 0.0);
    }

    #[test]
    fn lifetime_expires() {
        let mut l = Lifetime::new(100.0);
        assert!(!l.update(60.0));
        assert!(l.update(60.0));
    }
}
