//! Simulation state: the per-run `GameState`, its phases, station services and navigation.
//!
//! Everything a run owns lives here and is passed around explicitly. The tick
//! itself is in `update.rs` and combat resolution in `combat.rs`; both extend
//! `GameState` with further `impl` blocks.

use engine_core::{Mulberry32, Velocity};
use glam::Vec2;
use input::InputState;
use procgen::{FactionId, Galaxy, StarSystem, Station, SystemId};

use crate::catalog::{CommodityId, ShipTypeId, WeaponTypeId};
use crate::config::GameConfig;
use crate::effects::{Effects, ExplosionView, FloatTextView};
use crate::errors::{ActionError, ActionResult};
use crate::events::{EventQueue, SimEvent};
use crate::market::{Market, Quote, TradeRoute};
use crate::missions::{generate_missions, Mission, MissionId};
use crate::narrative::{Milestone, Narrative, Transition};
use crate::npc::{Npc, NpcRole};
use crate::player::PlayerShip;
use crate::spawner::NpcSpawner;
use crate::weapons::Projectile;

/// The player can dock within this distance of a station.
pub const DOCKING_RANGE: f32 = 60.0;
/// Keeps the combat/mission stream apart from the galaxy stream for the same seed.
const SIM_SEED_OFFSET: u32 = 0x5EED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatReason {
    Destroyed,
    Stranded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Flying,
    /// Docked at the station with this index in the current system.
    Docked(usize),
    GameOver(DefeatReason),
}

// ── Game Messages ──────────────────────────────────────────────────────────

/// On-screen message for the HUD log.
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub color: &'static str,
    /// Milliseconds left on screen.
    pub time_remaining: f32,
}

/// Short-lived HUD message log: narrative beats and action outcomes.
#[derive(Debug)]
pub struct GameMessages {
    pub messages: Vec<GameMessage>,
    pub max_visible: usize,
    default_duration: f32,
}

impl Default for GameMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMessages {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_visible: 6,
            default_duration: 4000.0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: &'static str) {
        self.messages.push(GameMessage {
            text: text.into(),
            color,
            time_remaining: self.default_duration,
        });
        if self.messages.len() > 50 {
            self.messages.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, "#fff");
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, "#4f4");
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, "#fd4");
    }

    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.time_remaining -= dt;
        }
        self.messages.retain(|m| m.time_remaining > 0.0);
    }

    /// Newest messages, oldest first, at most `max_visible`.
    pub fn visible(&self) -> &[GameMessage] {
        let start = self.messages.len().saturating_sub(self.max_visible);
        &self.messages[start..]
    }
}

// ── Snapshot ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StationView {
    pub name: String,
    pub position: Vec2,
}

/// Everything a renderer needs for one frame, copied after a tick completes.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub current_system: SystemId,
    pub player: PlayerShip,
    pub npcs: Vec<Npc>,
    pub projectiles: Vec<Projectile>,
    pub stations: Vec<StationView>,
    pub explosions: Vec<ExplosionView>,
    pub float_texts: Vec<FloatTextView>,
}

// ── Game state ─────────────────────────────────────────────────────────────

pub struct GameState {
    pub config: GameConfig,
    pub galaxy: Galaxy,
    pub market: Market,
    pub player: PlayerShip,
    /// NPCs in the current system.
    pub npcs: Vec<Npc>,
    pub projectiles: Vec<Projectile>,
    /// Stations of the current system.
    pub stations: Vec<Station>,
    pub effects: Effects,
    pub narrative: Narrative,
    pub events: EventQueue,
    pub input: InputState,
    pub messages: GameMessages,
    pub phase: GamePhase,
    /// Offers at the station the player is docked at.
    pub mission_board: Vec<Mission>,
    /// Loot, flee rolls and mission boards.
    pub(crate) rng: Mulberry32,
    pub(crate) spawner: NpcSpawner,
    next_mission_id: MissionId,
    pub(crate) game_over_emitted: bool,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let config = config.validated();
        let seed = config.galaxy.seed;
        let galaxy = Galaxy::new(seed, config.galaxy.system_count);
        let market = Market::new(config.economy.market_step_ms, config.economy.trade_tax);
        let player = PlayerShip::new(&config);

        let mut state = Self {
            galaxy,
            market,
            player,
            npcs: Vec::new(),
            projectiles: Vec::new(),
            stations: Vec::new(),
            effects: Effects::new(),
            narrative: Narrative::new(),
            events: EventQueue::new(),
            input: InputState::new(),
            messages: GameMessages::new(),
            phase: GamePhase::Flying,
            mission_board: Vec::new(),
            rng: Mulberry32::new(seed.wrapping_add(SIM_SEED_OFFSET)),
            spawner: NpcSpawner::new(u64::from(seed)),
            next_mission_id: 1,
            game_over_emitted: false,
            config,
        };
        let start = state.player.current_system;
        state.advance_story(Milestone::Arrival);
        state.enter_system(start);
        log::info!(
            "New run: seed {}, {} systems, starting at {}",
            seed,
            state.galaxy.len(),
            state.current_system().map_or("?", |s| s.name.as_str())
        );
        state
    }

    /// Start over with the same configuration. The galaxy regenerates identically.
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        *self = GameState::new(self.config.clone());
    }

    pub fn current_system(&self) -> Option<&StarSystem> {
        self.galaxy.get(self.player.current_system)
    }

    fn current_star(&self) -> ActionResult<&StarSystem> {
        self.current_system()
            .ok_or(ActionError::UnknownSystem(self.player.current_system))
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn is_docked(&self) -> bool {
        matches!(self.phase, GamePhase::Docked(_))
    }

    pub fn score(&self) -> i64 {
        self.player.compute_score()
    }

    pub(crate) fn ensure_active(&self) -> ActionResult<()> {
        if self.is_game_over() {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    fn require_docked(&self) -> ActionResult<()> {
        self.ensure_active()?;
        if !self.is_docked() {
            return Err(ActionError::NotDocked);
        }
        Ok(())
    }

    // ── Bookkeeping ─────────────────────────────────────────────────────

    pub(crate) fn emit_credits(&mut self, amount: i64, reason: &'static str) {
        self.events.push(SimEvent::CreditsChanged {
            amount,
            reason,
            total: self.player.credits,
        });
    }

    /// Shift standing with a faction and report it.
    pub fn change_reputation(&mut self, faction: FactionId, delta: i32, reason: &'static str) -> i32 {
        let value = self.player.change_reputation(faction, delta);
        self.events.push(SimEvent::ReputationChanged {
            faction,
            delta,
            value,
            reason,
        });
        value
    }

    pub(crate) fn advance_story(&mut self, milestone: Milestone) {
        if let Some(transition) = self.narrative.trigger(milestone) {
            self.announce(transition);
        }
    }

    pub(crate) fn announce(&mut self, transition: Transition) {
        self.events.push(SimEvent::NarrativeTransition {
            from: transition.from,
            to: transition.to,
            text: transition.text,
        });
        self.messages.push(transition.text, transition.color);
    }

    pub(crate) fn refresh_attitudes(&mut self) {
        for npc in &mut self.npcs {
            npc.refresh_attitude(self.player.reputation(npc.faction));
        }
    }

    pub fn station_positions(&self) -> Vec<Vec2> {
        self.stations.iter().map(Station::position).collect()
    }

    /// Rebuild local space for `id`: stations, NPCs, and a clean slate of shots and effects.
    fn enter_system(&mut self, id: SystemId) {
        let Some(system) = self.galaxy.get(id) else {
            return;
        };
        self.stations = system.generate_stations(self.galaxy.seed());
        let positions: Vec<Vec2> = self.stations.iter().map(Station::position).collect();
        self.npcs = self.spawner.populate(system, &positions);
        self.projectiles.clear();
        self.effects.clear();
        self.refresh_attitudes();

        let federation = self
            .npcs
            .iter()
            .any(|n| n.role == NpcRole::Patrol && n.faction == FactionId::Federation);
        let pirates = self.npcs.iter().any(|n| n.role == NpcRole::Pirate);
        if federation {
            self.advance_story(Milestone::FederationContact);
        }
        if pirates {
            self.advance_story(Milestone::PirateEncounter);
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Fuel a jump from the current system to `target` would cost.
    pub fn fuel_for_jump(&self, target: SystemId) -> Option<f32> {
        self.galaxy
            .fuel_for_jump(self.player.current_system, target, self.config.ship.fuel_per_jump)
    }

    /// Systems reachable on the current tank.
    pub fn systems_in_range(&self) -> Vec<SystemId> {
        self.galaxy.systems_in_range(
            self.player.current_system,
            self.player.fuel,
            self.config.ship.fuel_per_jump,
        )
    }

    /// Hyperspace to `target`. Fuel and location change together or not at all.
    pub fn jump_to(&mut self, target: SystemId) -> ActionResult<f32> {
        self.ensure_active()?;
        let from = self.player.current_system;
        if self.galaxy.get(target).is_none() {
            return Err(ActionError::UnknownSystem(target));
        }
        if target == from {
            return Err(ActionError::AlreadyThere);
        }
        let cost = self
            .fuel_for_jump(target)
            .ok_or(ActionError::UnknownSystem(target))?;
        self.player.jump(target, cost)?;

        self.phase = GamePhase::Flying;
        self.mission_board.clear();
        self.events.push(SimEvent::SystemJumped {
            from,
            to: target,
            fuel_used: cost,
        });
        if let Some(system) = self.galaxy.get(target) {
            log::info!("Jumped to {} ({} fuel, {:.0} left)", system.name, cost, self.player.fuel);
            self.messages.info(format!("Arrived at {}", system.name));
        }
        self.enter_system(target);
        Ok(cost)
    }

    // ── Docking ─────────────────────────────────────────────────────────

    /// Index of the closest station within docking range.
    pub fn station_in_range(&self) -> Option<usize> {
        let position = self.player.transform.position;
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.position().distance(position)))
            .filter(|&(_, d)| d <= DOCKING_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Dock at the nearest station in range and open its mission board.
    pub fn dock(&mut self) -> ActionResult<usize> {
        self.ensure_active()?;
        if let GamePhase::Docked(index) = self.phase {
            return Ok(index);
        }
        let index = self.station_in_range().ok_or(ActionError::NoStationInRange)?;

        self.phase = GamePhase::Docked(index);
        self.player.velocity = Velocity::default();
        self.mission_board = generate_missions(
            &self.galaxy,
            self.player.current_system,
            &mut self.rng,
            self.config.missions.timeout_ms,
        );
        let name = self.stations[index].name.clone();
        log::debug!("Docked at {}", name);
        self.messages.info(format!("Docked at {}", name));
        self.events.push(SimEvent::Docked { station: name });
        Ok(index)
    }

    /// Leave the station. Offers not taken are discarded.
    pub fn undock(&mut self) -> ActionResult<()> {
        self.require_docked()?;
        self.phase = GamePhase::Flying;
        self.mission_board.clear();
        self.events.push(SimEvent::Undocked);
        Ok(())
    }

    // ── Station services ────────────────────────────────────────────────

    pub fn quotes(&self) -> Vec<Quote> {
        self.current_system()
            .map(|s| self.market.quotes(s))
            .unwrap_or_default()
    }

    pub fn trade_routes(&self) -> Vec<TradeRoute> {
        self.market
            .find_trade_routes(&self.galaxy, self.player.current_system)
    }

    pub fn buy_commodity(&mut self, commodity: CommodityId, quantity: u32) -> ActionResult<i64> {
        self.require_docked()?;
        let unit = self.market.buy_price(commodity, self.current_star()?);
        let cost = self.player.buy_commodity(commodity, quantity, unit)?;
        self.events.push(SimEvent::CommodityBought {
            commodity,
            quantity,
            cost,
        });
        self.emit_credits(-cost, "trade");
        Ok(cost)
    }

    pub fn sell_commodity(&mut self, commodity: CommodityId, quantity: u32) -> ActionResult<i64> {
        self.require_docked()?;
        let unit = self.market.sell_price(commodity, self.current_star()?);
        let revenue = self.player.sell_commodity(commodity, quantity, unit)?;
        self.events.push(SimEvent::CommoditySold {
            commodity,
            quantity,
            revenue,
        });
        self.emit_credits(revenue, "trade");
        Ok(revenue)
    }

    /// Buy up to `amount` fuel at the configured price.
    pub fn refuel(&mut self, amount: f32) -> ActionResult<f32> {
        self.require_docked()?;
        let (bought, cost) = self.player.refuel(amount, self.config.economy.fuel_price)?;
        self.events.push(SimEvent::Refueled { amount: bought, cost });
        self.emit_credits(-cost, "refuel");
        Ok(bought)
    }

    /// Repair up to `amount` hull points at the configured price.
    pub fn repair(&mut self, amount: f32) -> ActionResult<f32> {
        self.require_docked()?;
        let (repaired, cost) = self.player.repair_hull(amount, self.config.economy.repair_price)?;
        self.events.push(SimEvent::Repaired { amount: repaired, cost });
        self.emit_credits(-cost, "repair");
        Ok(repaired)
    }

    pub fn buy_ship(&mut self, ship: ShipTypeId) -> ActionResult<i64> {
        self.require_docked()?;
        let cost = self.player.buy_ship(ship)?;
        log::info!("Bought a {} for {} credits", ship.info().name, cost);
        self.events.push(SimEvent::ShipPurchased { ship, cost });
        self.emit_credits(-cost, "shipyard");
        Ok(cost)
    }

    pub fn buy_weapon(&mut self, weapon: WeaponTypeId, slot: usize) -> ActionResult<()> {
        self.require_docked()?;
        self.player.buy_weapon(weapon, slot)?;
        self.events.push(SimEvent::WeaponPurchased { weapon, slot });
        self.emit_credits(-weapon.info().price, "shipyard");
        Ok(())
    }

    /// Take the offer at `board_index` from the station's mission board.
    pub fn accept_mission(&mut self, board_index: usize) -> ActionResult<MissionId> {
        self.require_docked()?;
        let offer = self
            .mission_board
            .get(board_index)
            .cloned()
            .ok_or(ActionError::UnknownMission(board_index as MissionId))?;
        let id = self.player.accept_mission(
            offer,
            self.next_mission_id,
            self.config.missions.max_missions,
        )?;
        self.mission_board.remove(board_index);
        self.next_mission_id += 1;
        self.events.push(SimEvent::MissionAccepted { id });
        Ok(id)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            current_system: self.player.current_system,
            player: self.player.clone(),
            npcs: self.npcs.clone(),
            projectiles: self.projectiles.clone(),
            stations: self
                .stations
                .iter()
                .map(|s| StationView {
                    name: s.name.clone(),
                    position: s.position(),
                })
                .collect(),
            explosions: self.effects.explosions(),
            float_texts: self.effects.float_texts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::new(GameConfig::default())
    }

    fn docked_game() -> GameState {
        let mut g = game();
        g.player.transform.position = g.stations[0].position();
        g.dock().unwrap();
        g
    }

    #[test]
    fn new_run_starts_at_system_zero() {
        let g = game();
        assert_eq!(g.player.current_system, 0);
        assert!(!g.stations.is_empty());
        assert_eq!(g.phase, GamePhase::Flying);
        assert!(g.narrative.has_fired(Milestone::Arrival));
        assert!(g.events.iter().any(|e| matches!(
            e,
            SimEvent::NarrativeTransition { to: "arrival", .. }
        )));
    }

    #[test]
    fn docking_needs_a_nearby_station() {
        let mut g = game();
        g.player.transform.position = Vec2::new(5000.0, 5000.0);
        assert_eq!(g.dock(), Err(ActionError::NoStationInRange));
        assert_eq!(g.buy_commodity(CommodityId::Food, 1), Err(ActionError::NotDocked));

        let mut g = docked_game();
        assert!(g.is_docked());
        assert!(!g.mission_board.is_empty());
        g.undock().unwrap();
        assert!(g.mission_board.is_empty());
        assert_eq!(g.undock(), Err(ActionError::NotDocked));
    }

    #[test]
    fn trading_moves_credits_and_reports_it() {
        let mut g = docked_game();
        g.events.drain();
        let cost = g.buy_commodity(CommodityId::Food, 2).unwrap();
        assert_eq!(g.player.credits, 1000 - cost);
        let revenue = g.sell_commodity(CommodityId::Food, 2).unwrap();
        assert!(revenue <= cost);
        let events = g.events.drain();
        assert!(matches!(events[0], SimEvent::CommodityBought { quantity: 2, .. }));
        assert!(matches!(events[1], SimEvent::CreditsChanged { reason: "trade", .. }));
        assert!(matches!(events[2], SimEvent::CommoditySold { quantity: 2, .. }));
    }

    #[test]
    fn failed_buy_leaves_state_alone() {
        let mut g = docked_game();
        g.player.credits = 0;
        g.events.drain();
        assert!(matches!(
            g.buy_commodity(CommodityId::Luxuries, 1),
            Err(ActionError::InsufficientFunds { .. })
        ));
        assert!(g.player.cargo.is_empty());
        assert!(g.events.is_empty());
    }

    #[test]
    fn short_tank_blocks_jump() {
        let mut g = game();
        let far = (1..g.galaxy.len())
            .max_by(|&a, &b| g.fuel_for_jump(a).unwrap().total_cmp(&g.fuel_for_jump(b).unwrap()))
            .unwrap();
        assert!(g.fuel_for_jump(far).unwrap() > 10.0);
        g.player.fuel = 10.0;
        assert!(matches!(g.jump_to(far), Err(ActionError::InsufficientFuel { .. })));
        assert_eq!(g.player.fuel, 10.0);
        assert_eq!(g.player.current_system, 0);
    }

    #[test]
    fn jump_validates_target() {
        let mut g = game();
        assert_eq!(g.jump_to(0), Err(ActionError::AlreadyThere));
        assert_eq!(g.jump_to(999), Err(ActionError::UnknownSystem(999)));
    }

    #[test]
    fn jump_rebuilds_local_space() {
        let mut g = game();
        let target = *g.galaxy.connections(0).first().unwrap();
        let cost = g.fuel_for_jump(target).unwrap();
        g.player.fuel = g.player.max_fuel;
        g.projectiles.push(Projectile::fire(
            &g.player.transform,
            WeaponTypeId::Laser,
            true,
        ));
        assert_eq!(g.jump_to(target), Ok(cost));
        assert_eq!(g.player.current_system, target);
        assert!(g.player.visited.contains(&target));
        assert!(g.projectiles.is_empty());
        assert_eq!(g.player.fuel, g.player.max_fuel - cost);
        let expected = g.galaxy.get(target).unwrap().station_count as usize;
        assert_eq!(g.stations.len(), expected);
    }

    #[test]
    fn mission_cap_holds_at_the_station() {
        let mut g = docked_game();
        g.config.missions.max_missions = 1;
        assert_eq!(g.accept_mission(0), Ok(1));
        let before = g.mission_board.len();
        if before > 0 {
            assert_eq!(g.accept_mission(0), Err(ActionError::MissionSlotsFull { max: 1 }));
            assert_eq!(g.mission_board.len(), before);
        }
        assert_eq!(g.player.missions.len(), 1);
        assert_eq!(g.accept_mission(99), Err(ActionError::UnknownMission(99)));
    }

    #[test]
    fn reputation_changes_are_reported() {
        let mut g = game();
        g.events.drain();
        assert_eq!(g.change_reputation(FactionId::Rebels, 7, "test"), 7);
        assert_eq!(
            g.events.drain(),
            vec![SimEvent::ReputationChanged {
                faction: FactionId::Rebels,
                delta: 7,
                value: 7,
                reason: "test",
            }]
        );
    }

    #[test]
    fn restart_regenerates_the_same_galaxy() {
        let mut g = game();
        let systems = g.galaxy.systems().to_vec();
        g.player.credits = 5;
        g.restart();
        assert_eq!(g.player.credits, 1000);
        assert_eq!(g.galaxy.systems(), systems.as_slice());
    }

    #[test]
    fn snapshot_copies_local_space() {
        let g = game();
        let snap = g.snapshot();
        assert_eq!(snap.npcs.len(), g.npcs.len());
        assert_eq!(snap.stations.len(), g.stations.len());
        assert_eq!(snap.current_system, 0);
    }

    #[test]
    fn hud_log_keeps_newest_messages() {
        let mut log = GameMessages::new();
        for i in 0..10 {
            log.info(format!("m{}", i));
        }
        assert_eq!(log.visible().len(), 6);
        assert_eq!(log.visible()[0].text, "m4");
        log.update(5000.0);
        assert!(log.visible().is_empty());
    }
}
