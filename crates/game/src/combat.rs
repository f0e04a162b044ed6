//! Weapon fire, projectile resolution, damage consequences, and fleeing.

use glam::Vec2;
use physics::{circle_contains, first_hit, CollisionGroup, SHIP_HIT_RADIUS};
use procgen::FactionId;

use crate::effects::FLOAT_TEXT_MS;
use crate::errors::{ActionError, ActionResult};
use crate::events::{DamageTarget, SimEvent};
use crate::missions::record_kill;
use crate::state::GameState;
use crate::weapons::Projectile;

const HULL_HIT_COLOR: &str = "#f44";
const SHIELD_HIT_COLOR: &str = "#4af";
const LOOT_COLOR: &str = "#fd4";
const EXPLOSION_COLOR: &str = "#fa0";
const SHIP_EXPLOSION_RADIUS: f32 = 40.0;
/// Floating text starts this far above the ship it refers to.
const TEXT_OFFSET: Vec2 = Vec2::new(0.0, -30.0);

impl GameState {
    /// Fire the player's ready weapons while the trigger is held.
    pub(crate) fn fire_player_weapons(&mut self) {
        if !self.input.is_fire_held() {
            return;
        }
        for weapon in self.player.fire_ready_weapons() {
            self.projectiles
                .push(Projectile::fire(&self.player.transform, weapon, true));
            self.events.push(SimEvent::WeaponFired {
                weapon,
                by_player: true,
            });
        }
    }

    pub(crate) fn fire_npc_weapons(&mut self, index: usize) {
        let Some(npc) = self.npcs.get_mut(index) else {
            return;
        };
        let muzzle = npc.transform;
        for weapon in npc.fire_ready_weapons() {
            self.projectiles.push(Projectile::fire(&muzzle, weapon, false));
            self.events.push(SimEvent::WeaponFired {
                weapon,
                by_player: false,
            });
        }
    }

    /// Move every projectile one tick. Expired shots vanish without effect; live
    /// shots hit the first ship in list order whose hit circle contains them.
    pub(crate) fn update_projectiles(&mut self) {
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain_mut(|shot| {
            if !shot.step() {
                return false;
            }
            let groups = shot.groups();
            if groups.test(CollisionGroup::npc()) {
                let hit = first_hit(
                    shot.position,
                    SHIP_HIT_RADIUS,
                    self.npcs.iter().map(|n| n.transform.position),
                );
                if let Some(index) = hit {
                    self.damage_npc(index, shot.damage, shot.position);
                    return false;
                }
            } else if groups.test(CollisionGroup::player())
                && !self.player.is_dead()
                && circle_contains(self.player.transform.position, SHIP_HIT_RADIUS, shot.position)
            {
                self.damage_player(shot.damage);
                return false;
            }
            true
        });
        self.projectiles = projectiles;
    }

    fn damage_npc(&mut self, index: usize, damage: f32, at: Vec2) {
        let Some(npc) = self.npcs.get_mut(index) else {
            return;
        };
        let first_contact = npc.mark_attacked();
        let outcome = npc.take_damage(damage);
        let (id, faction) = (npc.id, npc.faction);

        self.events.push(SimEvent::EntityDamaged {
            target: DamageTarget::Npc(id),
            damage,
        });
        let color = if outcome.hull_damage > 0.0 { HULL_HIT_COLOR } else { SHIELD_HIT_COLOR };
        self.effects
            .spawn_float_text(at, format!("-{}", damage), color, FLOAT_TEXT_MS);

        if first_contact {
            log::debug!("NPC {} ({:?}) turned hostile", id, faction);
            self.events.push(SimEvent::NpcTurnedHostile { npc: id, faction });
            let penalty = self.config.combat.first_contact_penalty;
            self.change_reputation(faction, -penalty, "attacked");
        }
        if outcome.destroyed {
            self.destroy_npc(index);
        }
    }

    fn destroy_npc(&mut self, index: usize) {
        let npc = self.npcs.remove(index);
        let combat = self.config.combat.clone();
        let loot = i64::from(self.rng.int(combat.loot_min, combat.loot_max));

        self.player.add_credits(loot);
        self.player.kills += 1;
        self.emit_credits(loot, "loot");
        self.change_reputation(npc.faction, -combat.kill_reputation_penalty, "kill");
        if npc.faction.is_pirate() {
            self.change_reputation(FactionId::Federation, combat.pirate_kill_bonus, "pirate kill");
            if let Some(mission) = record_kill(&mut self.player.missions, self.player.current_system) {
                log::debug!("Kill counted toward mission {}", mission);
            }
        }

        let position = npc.transform.position;
        self.effects
            .spawn_explosion(position, SHIP_EXPLOSION_RADIUS, EXPLOSION_COLOR);
        self.effects
            .spawn_float_text(position + TEXT_OFFSET, format!("+{} CR", loot), LOOT_COLOR, FLOAT_TEXT_MS);
        self.events.push(SimEvent::NpcDestroyed {
            npc: npc.id,
            faction: npc.faction,
            loot,
        });
        log::info!("Destroyed {:?} {:?}, looted {} credits", npc.faction, npc.ship, loot);
    }

    fn damage_player(&mut self, damage: f32) {
        let outcome = self.player.take_damage(damage);
        let position = self.player.transform.position;
        self.events.push(SimEvent::EntityDamaged {
            target: DamageTarget::Player,
            damage,
        });
        let color = if outcome.hull_damage > 0.0 { HULL_HIT_COLOR } else { SHIELD_HIT_COLOR };
        self.effects
            .spawn_float_text(position, format!("-{}", damage), color, FLOAT_TEXT_MS);

        if outcome.destroyed {
            log::info!("Player ship destroyed");
            self.effects
                .spawn_explosion(position, SHIP_EXPLOSION_RADIUS * 1.5, EXPLOSION_COLOR);
            self.events.push(SimEvent::PlayerDestroyed);
        }
    }

    /// Try to break off combat. Success burns fuel and clears every hostile and
    /// every shot in flight; the odds favour a ship faster than its pursuers.
    pub fn flee(&mut self) -> ActionResult<()> {
        self.ensure_active()?;
        let speeds: Vec<f32> = self
            .npcs
            .iter()
            .filter(|n| n.is_hostile())
            .map(|n| n.speed)
            .collect();
        if speeds.is_empty() {
            return Err(ActionError::NoHostiles);
        }
        let cost = self.config.combat.flee_fuel_cost;
        if self.player.fuel < cost {
            return Err(ActionError::InsufficientFuel {
                needed: cost,
                available: self.player.fuel,
            });
        }

        let mean_speed = speeds.iter().sum::<f32>() / speeds.len() as f32;
        let chance = self.player.speed / (self.player.speed + mean_speed);
        if !self.rng.chance(f64::from(chance)) {
            let at = self.player.transform.position + TEXT_OFFSET;
            self.effects
                .spawn_float_text(at, "ESCAPE FAILED", HULL_HIT_COLOR, FLOAT_TEXT_MS);
            return Err(ActionError::EscapeFailed);
        }

        self.player.fuel -= cost;
        self.npcs.retain(|n| !n.is_hostile());
        self.projectiles.clear();
        self.events.push(SimEvent::CombatFled);
        log::info!("Escaped combat ({:.0}% odds)", chance * 100.0);
        Ok(())
    }
}
