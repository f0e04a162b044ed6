//! Player ship state and the constrained operations that mutate it.

use std::collections::BTreeSet;

use engine_core::{DamageOutcome, Durability, Transform, Velocity};
use input::InputState;
use physics::{integrate, thrust, PLAYER_FRICTION};
use procgen::{FactionId, SystemId};

use crate::catalog::{CommodityId, ShipTypeId, WeaponTypeId};
use crate::config::GameConfig;
use crate::errors::{ActionError, ActionResult};
use crate::missions::{Mission, MissionId};
use crate::weapons::WeaponMount;

/// Reputation is clamped to this magnitude.
pub const REPUTATION_LIMIT: i32 = 100;
/// Per-tick acceleration as a fraction of top speed.
const THRUST_FACTOR: f32 = 0.05;
const BOOST_MULTIPLIER: f32 = 1.5;

// Score weights.
const SCORE_PER_SYSTEM: i64 = 50;
const SCORE_PER_MISSION: i64 = 200;
const SCORE_PER_KILL: i64 = 100;
const SCORE_PER_MINUTE: i64 = 10;

/// One stack of cargo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoItem {
    pub commodity: CommodityId,
    pub quantity: u32,
}

/// The player's ship, wallet, standing and progress.
#[derive(Debug, Clone)]
pub struct PlayerShip {
    pub ship_type: ShipTypeId,
    pub transform: Transform,
    pub velocity: Velocity,
    pub durability: Durability,
    pub fuel: f32,
    pub max_fuel: f32,
    pub max_cargo: u32,
    pub cargo: Vec<CargoItem>,
    pub speed: f32,
    pub turn_speed: f32,
    /// One entry per weapon slot.
    pub weapons: Vec<Option<WeaponMount>>,
    pub credits: i64,
    /// Total positive income, for scoring.
    pub credits_earned: i64,
    pub current_system: SystemId,
    pub visited: BTreeSet<SystemId>,
    reputation: [i32; 5],
    pub missions: Vec<Mission>,
    pub missions_completed: u32,
    pub kills: u32,
    pub sales: u32,
    /// Milliseconds survived.
    pub game_time: f64,
}

impl PlayerShip {
    /// Starter shuttle with a pulse laser, docked nowhere, in system 0.
    pub fn new(config: &GameConfig) -> Self {
        let hull = ShipTypeId::Shuttle.info();
        let mut weapons = vec![None; hull.weapon_slots];
        if let Some(first) = weapons.first_mut() {
            *first = Some(WeaponMount::new(WeaponTypeId::Laser));
        }
        Self {
            ship_type: hull.id,
            transform: Transform::default(),
            velocity: Velocity::default(),
            durability: Durability::new(hull.max_hull, hull.max_shield),
            fuel: config.ship.start_fuel.min(hull.max_fuel),
            max_fuel: hull.max_fuel,
            max_cargo: hull.max_cargo,
            cargo: Vec::new(),
            speed: hull.speed,
            turn_speed: hull.turn_speed,
            weapons,
            credits: config.economy.start_credits,
            credits_earned: 0,
            current_system: 0,
            visited: BTreeSet::from([0]),
            reputation: [0; 5],
            missions: Vec::new(),
            missions_completed: 0,
            kills: 0,
            sales: 0,
            game_time: 0.0,
        }
    }

    // ── Flight ──────────────────────────────────────────────────────────

    /// Apply held controls for one tick: turn, thrust or brake, then friction and move.
    pub fn update_flight(&mut self, input: &InputState, dt: f32) {
        let turn = input.turn_axis() * self.turn_speed * dt;
        if turn != 0.0 {
            self.transform.rotate(turn);
        }

        let boost = if input.is_boost_held() { BOOST_MULTIPLIER } else { 1.0 };
        let accel = self.speed * THRUST_FACTOR * boost;
        let max_speed = self.speed * boost;
        if input.is_thrust_held() {
            thrust(&self.transform, &mut self.velocity, accel, max_speed);
        }
        if input.is_brake_held() {
            thrust(&self.transform, &mut self.velocity, -accel * 0.5, max_speed);
        }

        integrate(&mut self.transform, &mut self.velocity, PLAYER_FRICTION);
    }

    /// Update weapon cooldowns.
    pub fn update_weapons(&mut self, dt: f32) {
        for mount in self.weapons.iter_mut().flatten() {
            mount.update(dt);
        }
    }

    /// Fire every mount whose cooldown has elapsed.
    pub fn fire_ready_weapons(&mut self) -> Vec<WeaponTypeId> {
        self.weapons
            .iter_mut()
            .flatten()
            .filter_map(|mount| mount.fire(1.0).then_some(mount.weapon))
            .collect()
    }

    // ── Credits & cargo ─────────────────────────────────────────────────

    /// Add (or with a negative amount, remove) credits. Returns the new balance.
    pub fn add_credits(&mut self, amount: i64) -> i64 {
        self.credits += amount;
        if amount > 0 {
            self.credits_earned += amount;
        }
        self.credits
    }

    fn spend(&mut self, cost: i64) -> ActionResult<()> {
        if self.credits < cost {
            return Err(ActionError::InsufficientFunds {
                needed: cost,
                available: self.credits,
            });
        }
        self.credits -= cost;
        Ok(())
    }

    pub fn cargo_used(&self) -> u32 {
        self.cargo.iter().map(|c| c.quantity).sum()
    }

    pub fn cargo_free(&self) -> u32 {
        self.max_cargo.saturating_sub(self.cargo_used())
    }

    pub fn cargo_of(&self, commodity: CommodityId) -> u32 {
        self.cargo
            .iter()
            .find(|c| c.commodity == commodity)
            .map_or(0, |c| c.quantity)
    }

    /// Buy `quantity` units at `unit_price`. Returns the total cost.
    pub fn buy_commodity(&mut self, commodity: CommodityId, quantity: u32, unit_price: i64) -> ActionResult<i64> {
        if quantity == 0 {
            return Err(ActionError::NothingToBuy);
        }
        let cost = unit_price * i64::from(quantity);
        if self.credits < cost {
            return Err(ActionError::InsufficientFunds {
                needed: cost,
                available: self.credits,
            });
        }
        if self.cargo_used() + quantity > self.max_cargo {
            return Err(ActionError::InsufficientCargoSpace {
                needed: quantity,
                free: self.cargo_free(),
            });
        }

        self.credits -= cost;
        match self.cargo.iter_mut().find(|c| c.commodity == commodity) {
            Some(item) => item.quantity += quantity,
            None => self.cargo.push(CargoItem { commodity, quantity }),
        }
        Ok(cost)
    }

    /// Sell `quantity` units at `unit_price`. Returns the revenue.
    pub fn sell_commodity(&mut self, commodity: CommodityId, quantity: u32, unit_price: i64) -> ActionResult<i64> {
        self.remove_cargo(commodity, quantity)?;
        let revenue = unit_price * i64::from(quantity);
        self.add_credits(revenue);
        self.sales += 1;
        Ok(revenue)
    }

    /// Take cargo out of the hold without payment.
    pub fn remove_cargo(&mut self, commodity: CommodityId, quantity: u32) -> ActionResult<()> {
        let held = self.cargo_of(commodity);
        if held < quantity || quantity == 0 {
            return Err(ActionError::InsufficientCargo {
                commodity,
                held,
                wanted: quantity,
            });
        }
        self.cargo.retain_mut(|c| {
            if c.commodity == commodity {
                c.quantity -= quantity;
            }
            c.quantity > 0
        });
        Ok(())
    }

    // ── Fuel & hull ─────────────────────────────────────────────────────

    /// Whole units of `wanted` that fit under `room` and the current balance.
    fn affordable_units(&self, wanted: f32, room: f32, unit_price: i64) -> i64 {
        let mut units = wanted.min(room).floor().max(0.0) as i64;
        if unit_price > 0 && self.credits < units * unit_price {
            units = self.credits.max(0) / unit_price;
        }
        units
    }

    /// Buy up to `amount` fuel, as much as the tank and wallet allow.
    /// Returns the fuel bought and its cost.
    pub fn refuel(&mut self, amount: f32, unit_price: i64) -> ActionResult<(f32, i64)> {
        let units = self.affordable_units(amount, self.max_fuel - self.fuel, unit_price);
        if units <= 0 {
            return Err(ActionError::NothingToBuy);
        }
        let cost = units * unit_price;
        self.credits -= cost;
        self.fuel = (self.fuel + units as f32).min(self.max_fuel);
        Ok((units as f32, cost))
    }

    /// Repair up to `amount` hull points. Returns the points repaired and their cost.
    pub fn repair_hull(&mut self, amount: f32, unit_price: i64) -> ActionResult<(f32, i64)> {
        let missing = self.durability.max_hull - self.durability.hull;
        let units = self.affordable_units(amount, missing, unit_price);
        if units <= 0 {
            return Err(ActionError::NothingToBuy);
        }
        let cost = units * unit_price;
        self.credits -= cost;
        self.durability.repair(units as f32);
        Ok((units as f32, cost))
    }

    pub fn recharge_shield(&mut self, rate: f32, dt: f32) {
        self.durability.recharge(rate * dt);
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        self.durability.take_damage(amount)
    }

    pub fn is_dead(&self) -> bool {
        self.durability.is_dead()
    }

    /// Burn `fuel_cost` and arrive in `to`. Fails without side effects if the tank is short.
    pub fn jump(&mut self, to: SystemId, fuel_cost: f32) -> ActionResult<()> {
        if self.fuel < fuel_cost {
            return Err(ActionError::InsufficientFuel {
                needed: fuel_cost,
                available: self.fuel,
            });
        }
        self.fuel -= fuel_cost;
        self.current_system = to;
        self.visited.insert(to);
        self.transform = Transform::default();
        self.velocity = Velocity::default();
        Ok(())
    }

    // ── Reputation ──────────────────────────────────────────────────────

    pub fn reputation(&self, faction: FactionId) -> i32 {
        self.reputation[faction.index()]
    }

    /// Shift standing with a faction, clamped to ±100. Returns the new value.
    pub fn change_reputation(&mut self, faction: FactionId, delta: i32) -> i32 {
        let slot = &mut self.reputation[faction.index()];
        *slot = (*slot + delta).clamp(-REPUTATION_LIMIT, REPUTATION_LIMIT);
        *slot
    }

    // ── Missions ────────────────────────────────────────────────────────

    /// Take on a mission, stamping it with `id` and the current game time.
    pub fn accept_mission(&mut self, mut mission: Mission, id: MissionId, max: usize) -> ActionResult<MissionId> {
        if self.missions.len() >= max {
            return Err(ActionError::MissionSlotsFull { max });
        }
        mission.id = id;
        mission.start_time_ms = self.game_time;
        self.missions.push(mission);
        Ok(id)
    }

    fn take_mission(&mut self, id: MissionId) -> ActionResult<Mission> {
        let index = self
            .missions
            .iter()
            .position(|m| m.id == id)
            .ok_or(ActionError::UnknownMission(id))?;
        Ok(self.missions.remove(index))
    }

    /// Pay out a mission and raise standing with its faction.
    pub fn complete_mission(&mut self, id: MissionId) -> ActionResult<Mission> {
        let mission = self.take_mission(id)?;
        self.add_credits(mission.reward);
        if let Some(faction) = mission.rep_faction {
            self.change_reputation(faction, mission.rep_delta);
        }
        self.missions_completed += 1;
        Ok(mission)
    }

    /// Drop a mission and lose standing with its faction.
    pub fn fail_mission(&mut self, id: MissionId) -> ActionResult<Mission> {
        let mission = self.take_mission(id)?;
        if let Some(faction) = mission.rep_faction {
            self.change_reputation(faction, -mission.rep_delta);
        }
        Ok(mission)
    }

    // ── Shipyard ────────────────────────────────────────────────────────

    /// Trade-in value of the current hull.
    pub fn trade_in_value(&self) -> i64 {
        self.ship_type.info().price / 2
    }

    /// Swap hulls. The old ship is traded in at half its price. Hull and shield are
    /// restored; fuel, weapons and cargo are trimmed to the new ship's limits.
    pub fn buy_ship(&mut self, ship_type: ShipTypeId) -> ActionResult<i64> {
        let hull = ship_type.info();
        let cost = hull.price - self.trade_in_value();
        self.spend(cost)?;

        self.ship_type = ship_type;
        self.durability = Durability::new(hull.max_hull, hull.max_shield);
        self.max_fuel = hull.max_fuel;
        self.fuel = self.fuel.min(hull.max_fuel);
        self.max_cargo = hull.max_cargo;
        self.speed = hull.speed;
        self.turn_speed = hull.turn_speed;
        self.weapons.resize(hull.weapon_slots, None);
        while self.cargo_used() > self.max_cargo && self.cargo.pop().is_some() {}
        Ok(cost)
    }

    /// Install a weapon in `slot`, replacing whatever was there.
    pub fn buy_weapon(&mut self, weapon: WeaponTypeId, slot: usize) -> ActionResult<()> {
        if slot >= self.weapons.len() {
            return Err(ActionError::InvalidWeaponSlot {
                slot,
                slots: self.weapons.len(),
            });
        }
        self.spend(weapon.info().price)?;
        self.weapons[slot] = Some(WeaponMount::new(weapon));
        Ok(())
    }

    pub fn weapon_slots(&self) -> usize {
        self.weapons.len()
    }

    // ── Scoring ─────────────────────────────────────────────────────────

    /// Credits earned plus weighted systems, missions, kills and whole minutes.
    /// Artifacts do not exist in this game, so there is no artifact bonus.
    pub fn compute_score(&self) -> i64 {
        let minutes = (self.game_time / 60_000.0).floor() as i64;
        self.credits_earned
            + self.visited.len() as i64 * SCORE_PER_SYSTEM
            + i64::from(self.missions_completed) * SCORE_PER_MISSION
            + i64::from(self.kills) * SCORE_PER_KILL
            + minutes * SCORE_PER_MINUTE
    }
}
