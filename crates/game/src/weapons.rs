//! Weapon mounts and projectiles.

use engine_core::{Cooldown, Transform};
use glam::Vec2;
use physics::{CollisionGroup, InteractionGroups};

use crate::catalog::{WeaponType, WeaponTypeId};

/// Projectiles spawn this far ahead of the shooter along its heading.
pub const MUZZLE_OFFSET: f32 = 20.0;

/// One equipped weapon with its own cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponMount {
    pub weapon: WeaponTypeId,
    pub cooldown: Cooldown,
}

impl WeaponMount {
    pub fn new(weapon: WeaponTypeId) -> Self {
        Self {
            weapon,
            cooldown: Cooldown::default(),
        }
    }

    pub fn info(&self) -> &'static WeaponType {
        self.weapon.info()
    }

    /// Update cooldowns.
    pub fn update(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }

    /// Check if weapon can fire.
    pub fn can_fire(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Fire the weapon, resetting its cooldown to `multiplier` times the base cooldown.
    pub fn fire(&mut self, multiplier: f32) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.cooldown.trigger(self.info().cooldown * multiplier);
        true
    }
}

/// A shot in flight. Holds no reference to whoever fired it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Units per tick.
    pub velocity: Vec2,
    pub damage: f32,
    /// Ticks remaining.
    pub life: i32,
    pub from_player: bool,
    pub weapon: WeaponTypeId,
    pub color: &'static str,
}

impl Projectile {
    /// Spawn a projectile at the muzzle of `shooter`, flying along its heading.
    pub fn fire(shooter: &Transform, weapon: WeaponTypeId, from_player: bool) -> Self {
        let info = weapon.info();
        let forward = shooter.forward();
        Self {
            position: shooter.position + forward * MUZZLE_OFFSET,
            velocity: forward * info.speed,
            damage: info.damage,
            life: info.range as i32,
            from_player,
            weapon,
            color: info.color,
        }
    }

    /// Move one tick and age. Returns false once the projectile has expired.
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.life -= 1;
        self.life > 0
    }

    pub fn groups(&self) -> InteractionGroups {
        if self.from_player {
            CollisionGroup::player_projectile()
        } else {
            CollisionGroup::npc_projectile()
        }
    }
}
