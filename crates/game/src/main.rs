//! Space Trader - headless runner.
//!
//! Plays a run on autopilot: fly to a station, trade along the best known
//! route, take missions, fight back when attacked, and jump onwards. Events
//! are logged as they happen.

use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::{angle_delta, bearing, Time};
use game::catalog::CommodityId;
use game::state::DOCKING_RANGE;
use game::{ActionError, GameConfig, GamePhase, GameState, SimEvent};
use glam::Vec2;
use input::Action;
use procgen::SystemId;

/// Simulated run length.
const RUN_TIME: Duration = Duration::from_secs(30 * 60);
/// Host frame length; the simulation still steps at its fixed rate.
const FRAME: Duration = Duration::from_millis(50);
/// Heading error under which the autopilot stops turning.
const AIM_DEADZONE: f32 = 0.06;
/// Flee once the hull drops below this fraction.
const FLEE_HULL: f32 = 0.3;

#[derive(Default)]
struct Autopilot {
    destination: Option<SystemId>,
    /// Commodity bought for the current leg.
    hauling: Option<CommodityId>,
}

impl Autopilot {
    /// Queue this tick's input.
    fn drive(&mut self, state: &mut GameState) {
        for action in [Action::Up, Action::Left, Action::Right, Action::Shoot] {
            state.input.release(action);
        }
        match state.phase {
            GamePhase::Docked(_) => self.station_business(state),
            GamePhase::Flying => self.fly(state),
            GamePhase::GameOver(_) => {}
        }
    }

    fn fly(&mut self, state: &mut GameState) {
        let position = state.player.transform.position;
        let hostile = state
            .npcs
            .iter()
            .filter(|n| n.is_hostile())
            .map(|n| n.transform.position)
            .min_by(|a, b| a.distance(position).total_cmp(&b.distance(position)));

        if let Some(target) = hostile {
            if state.player.durability.hull_fraction() < FLEE_HULL {
                state.input.tap(Action::Flee);
                return;
            }
            steer(state, target, 150.0);
            state.input.press(Action::Shoot);
            return;
        }

        let station = state
            .station_positions()
            .into_iter()
            .min_by(|a, b| a.distance(position).total_cmp(&b.distance(position)));
        match station {
            Some(target) if target.distance(position) <= DOCKING_RANGE => {
                state.input.tap(Action::Confirm);
            }
            Some(target) => steer(state, target, 20.0),
            // Nowhere to dock: move on.
            None => self.jump_onwards(state),
        }
    }

    fn station_business(&mut self, state: &mut GameState) {
        for item in state.player.cargo.clone() {
            if let Err(e) = state.sell_commodity(item.commodity, item.quantity) {
                log::debug!("Could not sell {:?}: {}", item.commodity, e);
            }
        }
        self.hauling = None;

        let missing_hull = state.player.durability.max_hull - state.player.durability.hull;
        if missing_hull > 0.0 {
            log_refusal(state.repair(missing_hull).map(|_| ()));
        }
        let missing_fuel = state.player.max_fuel - state.player.fuel;
        if missing_fuel > 0.0 {
            log_refusal(state.refuel(missing_fuel).map(|_| ()));
        }
        if !state.mission_board.is_empty() {
            log_refusal(state.accept_mission(0).map(|_| ()));
        }

        let in_range = state.systems_in_range();
        let route = state
            .trade_routes()
            .into_iter()
            .find(|r| in_range.contains(&r.to));
        if let Some(route) = route {
            let affordable = (state.player.credits / route.buy_here.max(1)).max(0) as u32;
            let quantity = affordable.min(state.player.cargo_free());
            if quantity > 0 && state.buy_commodity(route.commodity, quantity).is_ok() {
                self.hauling = Some(route.commodity);
            }
            self.destination = Some(route.to);
        }
        self.jump_onwards(state);
    }

    fn jump_onwards(&mut self, state: &mut GameState) {
        let target = self.destination.take().or_else(|| {
            let options = state.systems_in_range();
            options
                .iter()
                .copied()
                .find(|id| !state.player.visited.contains(id))
                .or_else(|| options.first().copied())
        });
        let Some(target) = target else {
            log::debug!("No system in range");
            if state.is_docked() {
                state.input.tap(Action::Back);
            }
            return;
        };
        match state.jump_to(target) {
            Ok(_) => {
                if let Some(commodity) = self.hauling {
                    log::debug!("Hauling {:?} to system {}", commodity, target);
                }
            }
            Err(e) => {
                log::debug!("Jump to {} refused: {}", target, e);
                if state.is_docked() {
                    state.input.tap(Action::Back);
                }
            }
        }
    }
}

/// Turn towards `target` and thrust while roughly aligned and farther than `stand_off`.
fn steer(state: &mut GameState, target: Vec2, stand_off: f32) {
    let transform = state.player.transform;
    let error = angle_delta(transform.angle, bearing(transform.position, target));
    if error > AIM_DEADZONE {
        state.input.press(Action::Right);
    } else if error < -AIM_DEADZONE {
        state.input.press(Action::Left);
    }
    if error.abs() < 0.5 && transform.position.distance(target) > stand_off {
        state.input.press(Action::Up);
    }
}

fn log_refusal(result: Result<(), ActionError>) {
    if let Err(e) = result {
        log::debug!("Station service refused: {}", e);
    }
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::WeaponFired { .. } | SimEvent::EntityDamaged { .. } => log::trace!("{:?}", event),
        SimEvent::CreditsChanged { .. } | SimEvent::ReputationChanged { .. } => {
            log::debug!("{:?}", event)
        }
        SimEvent::NarrativeTransition { to, text, .. } => log::info!("[story:{}] {}", to, text),
        _ => log::info!("{:?}", event),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from(std::path::Path::new(&path))
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GameConfig::load(),
    };

    log::info!("Starting Space Trader (headless)");
    let mut state = GameState::new(config);
    let mut autopilot = Autopilot::default();
    let mut time = Time::new();

    'run: while time.elapsed() < RUN_TIME {
        time.advance(FRAME);
        while time.should_fixed_update() {
            autopilot.drive(&mut state);
            state.update(time.fixed_timestep_ms());
            for event in state.events.drain() {
                log_event(&event);
            }
            if state.is_game_over() {
                break 'run;
            }
        }
    }

    let player = &state.player;
    log::info!(
        "Run finished after {:.0}s ({} frames, {} ticks): {} credits, {} systems visited, {} kills, {} missions, score {}",
        time.elapsed().as_secs_f32(),
        time.frame_count(),
        time.tick_count(),
        player.credits,
        player.visited.len(),
        player.kills,
        player.missions_completed,
        state.score()
    );
    Ok(())
}
