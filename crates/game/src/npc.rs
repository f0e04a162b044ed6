//! NPC ships: role, faction, attitude and loadout.

use engine_core::{DamageOutcome, Durability, Transform, Velocity};
use glam::Vec2;
use procgen::FactionId;

use crate::catalog::{ShipTypeId, WeaponTypeId};
use crate::weapons::WeaponMount;

pub type NpcId = u32;

/// Pirates turn neutral above this reputation.
pub const PIRATE_TRUCE_REPUTATION: i32 = 20;
/// Lawful factions open fire below this reputation.
pub const HOSTILE_REPUTATION: i32 = -30;
/// Lawful factions turn friendly above this reputation.
pub const FRIENDLY_REPUTATION: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcRole {
    Trader,
    Patrol,
    Pirate,
}

impl NpcRole {
    /// Combat temperament used while hostile.
    pub fn pattern(self) -> AiPattern {
        match self {
            NpcRole::Trader => AiPattern::Coward,
            NpcRole::Patrol => AiPattern::Defensive,
            NpcRole::Pirate => AiPattern::Aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attitude {
    Hostile,
    Neutral,
    Friendly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiPattern {
    Aggressive,
    Defensive,
    /// Fights like an aggressive ship until its shield breaks, then runs.
    Coward,
}

/// Distance thresholds that shape hostile pursuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitProfile {
    /// Thrust towards the player beyond this range.
    pub chase_distance: f32,
    /// Circle instead of closing inside this range.
    pub too_close: f32,
    /// Only fire inside this range.
    pub fire_range: f32,
}

impl AiPattern {
    pub fn profile(self) -> PursuitProfile {
        match self {
            AiPattern::Aggressive | AiPattern::Coward => PursuitProfile {
                chase_distance: 150.0,
                too_close: 80.0,
                fire_range: 300.0,
            },
            AiPattern::Defensive => PursuitProfile {
                chase_distance: 250.0,
                too_close: 200.0,
                fire_range: 350.0,
            },
        }
    }
}

/// Attitude a faction member takes towards the player at a given reputation.
/// Pirates never become friendly.
pub fn attitude_for(faction: FactionId, reputation: i32) -> Attitude {
    if faction.is_pirate() {
        if reputation > PIRATE_TRUCE_REPUTATION {
            Attitude::Neutral
        } else {
            Attitude::Hostile
        }
    } else if reputation < HOSTILE_REPUTATION {
        Attitude::Hostile
    } else if reputation > FRIENDLY_REPUTATION {
        Attitude::Friendly
    } else {
        Attitude::Neutral
    }
}

#[derive(Debug, Clone)]
pub struct Npc {
    pub id: NpcId,
    pub role: NpcRole,
    pub ship: ShipTypeId,
    pub faction: FactionId,
    pub transform: Transform,
    pub velocity: Velocity,
    pub durability: Durability,
    pub speed: f32,
    pub turn_speed: f32,
    pub weapons: Vec<WeaponMount>,
    pub attitude: Attitude,
    /// Once set the NPC stays hostile regardless of reputation.
    pub attacked_by_player: bool,
    pub pattern: AiPattern,
    /// Current wander target while passive.
    pub waypoint: Vec2,
}

impl Npc {
    pub fn new(id: NpcId, role: NpcRole, ship: ShipTypeId, faction: FactionId, transform: Transform) -> Self {
        let hull = ship.info();
        let mut weapons: Vec<WeaponMount> = loadout(role, ship)
            .iter()
            .copied()
            .map(WeaponMount::new)
            .collect();
        weapons.truncate(hull.weapon_slots);

        Self {
            id,
            role,
            ship,
            faction,
            transform,
            velocity: Velocity::default(),
            durability: Durability::new(hull.max_hull, hull.max_shield),
            speed: hull.speed,
            turn_speed: hull.turn_speed,
            weapons,
            attitude: Attitude::Neutral,
            attacked_by_player: false,
            pattern: role.pattern(),
            waypoint: transform.position,
        }
    }

    pub fn is_hostile(&self) -> bool {
        self.attitude == Attitude::Hostile
    }

    /// Re-derive attitude from reputation unless the player has already shot at us.
    pub fn refresh_attitude(&mut self, reputation: i32) {
        if !self.attacked_by_player {
            self.attitude = attitude_for(self.faction, reputation);
        }
    }

    /// Record a hit from the player. Returns true on first contact with a ship that
    /// was not already hostile.
    pub fn mark_attacked(&mut self) -> bool {
        let first_contact = !self.attacked_by_player && !self.is_hostile();
        self.attacked_by_player = true;
        self.attitude = Attitude::Hostile;
        first_contact
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        self.durability.take_damage(amount)
    }

    /// NPC cooldowns run this many times slower than the player's.
    pub fn fire_multiplier(&self) -> f32 {
        match self.ship {
            ShipTypeId::Corvette => 4.0,
            _ => 3.0,
        }
    }

    pub fn update_weapons(&mut self, dt: f32) {
        for mount in &mut self.weapons {
            mount.update(dt);
        }
    }

    /// Fire every ready mount. Returns the weapons that went off.
    pub fn fire_ready_weapons(&mut self) -> Vec<WeaponTypeId> {
        let multiplier = self.fire_multiplier();
        self.weapons
            .iter_mut()
            .filter_map(|mount| mount.fire(multiplier).then_some(mount.weapon))
            .collect()
    }
}

fn loadout(role: NpcRole, ship: ShipTypeId) -> &'static [WeaponTypeId] {
    match (role, ship) {
        (_, ShipTypeId::Corvette) => &[WeaponTypeId::Cannon, WeaponTypeId::Missile],
        (NpcRole::Trader, _) => &[WeaponTypeId::Laser],
        (NpcRole::Patrol, _) => &[WeaponTypeId::Laser, WeaponTypeId::Cannon],
        (NpcRole::Pirate, _) => &[WeaponTypeId::Laser, WeaponTypeId::Cannon],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patrol() -> Npc {
        Npc::new(1, NpcRole::Patrol, ShipTypeId::Fighter, FactionId::Federation, Transform::default())
    }

    #[test]
    fn pirates_are_never_friendly() {
        assert_eq!(attitude_for(FactionId::Pirates, 0), Attitude::Hostile);
        assert_eq!(attitude_for(FactionId::Pirates, 20), Attitude::Hostile);
        assert_eq!(attitude_for(FactionId::Pirates, 21), Attitude::Neutral);
        assert_eq!(attitude_for(FactionId::Pirates, 100), Attitude::Neutral);
    }

    #[test]
    fn lawful_attitude_bands() {
        assert_eq!(attitude_for(FactionId::Merchants, -31), Attitude::Hostile);
        assert_eq!(attitude_for(FactionId::Merchants, -30), Attitude::Neutral);
        assert_eq!(attitude_for(FactionId::Merchants, 20), Attitude::Neutral);
        assert_eq!(attitude_for(FactionId::Merchants, 21), Attitude::Friendly);
    }

    #[test]
    fn bad_reputation_turns_patrol_hostile() {
        let mut npc = patrol();
        npc.refresh_attitude(0);
        assert_eq!(npc.attitude, Attitude::Neutral);
        npc.refresh_attitude(-40);
        assert!(npc.is_hostile());
    }

    #[test]
    fn attacked_npcs_stay_hostile() {
        let mut npc = patrol();
        npc.refresh_attitude(50);
        assert!(npc.mark_attacked());
        assert!(!npc.mark_attacked());
        npc.refresh_attitude(100);
        assert!(npc.is_hostile());
    }

    #[test]
    fn already_hostile_is_not_first_contact() {
        let mut npc = Npc::new(2, NpcRole::Pirate, ShipTypeId::Fighter, FactionId::Pirates, Transform::default());
        npc.refresh_attitude(0);
        assert!(!npc.mark_attacked());
        assert!(npc.attacked_by_player);
    }

    #[test]
    fn loadout_fits_slots_and_cooldowns_are_slower() {
        let trader = Npc::new(3, NpcRole::Trader, ShipTypeId::Trader, FactionId::Merchants, Transform::default());
        assert_eq!(trader.weapons.len(), 1);
        assert_eq!(trader.fire_multiplier(), 3.0);

        let mut corvette = Npc::new(4, NpcRole::Pirate, ShipTypeId::Corvette, FactionId::Pirates, Transform::default());
        assert_eq!(corvette.fire_multiplier(), 4.0);
        assert_eq!(
            corvette.fire_ready_weapons(),
            vec![WeaponTypeId::Cannon, WeaponTypeId::Missile]
        );
        assert_eq!(corvette.weapons[0].cooldown.remaining, 6000.0);
        assert!(corvette.fire_ready_weapons().is_empty());
    }
}
