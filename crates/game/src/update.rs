//! The fixed-step simulation tick.
//!
//! One call advances every subsystem in a fixed order: input, flight, weapon
//! cooldowns and fire, projectiles, NPC AI, the market clock, missions, the
//! narrative, effects, and finally the terminal checks. While docked, local
//! space (flight, NPCs, shots, station orbits) is frozen but the clocks keep
//! running.

use input::Action;

use crate::ai::{steer_hostile, steer_passive};
use crate::events::{MissionFailure, SimEvent};
use crate::missions::{check_mission, MissionCheck, MissionId, MissionKind};
use crate::narrative::Milestone;
use crate::spawner::ARENA_HALF_EXTENTS;
use crate::state::{DefeatReason, GamePhase, GameState};

impl GameState {
    /// Advance the simulation by `dt` milliseconds.
    pub fn update(&mut self, dt: f32) {
        tick(self, dt);
    }
}

/// Run one simulation tick. Called from [`GameState::update`].
pub fn tick(state: &mut GameState, dt: f32) {
    if state.is_game_over() {
        if state.input.is_pressed(Action::Restart) {
            state.restart();
        }
        state.messages.update(dt);
        state.input.end_tick();
        return;
    }

    handle_actions(state);
    state.player.game_time += f64::from(dt);

    if state.phase == GamePhase::Flying {
        // Movement
        state.player.update_flight(&state.input, dt);
        keep_in_arena(state);
        state.player.recharge_shield(state.config.ship.shield_recharge_rate, dt);
        for station in &mut state.stations {
            station.advance(dt);
        }

        // Cooldowns & fire
        state.player.update_weapons(dt);
        state.fire_player_weapons();

        // Projectiles & collisions
        state.update_projectiles();

        // AI
        update_npcs(state, dt);
    }

    state.market.update(dt);
    update_missions(state);

    for transition in state.narrative.evaluate(&state.player) {
        state.announce(transition);
    }
    state.narrative.sync_variables(&state.player);

    state.effects.update(dt);
    state.messages.update(dt);
    check_terminal(state);
    state.input.end_tick();
}

fn handle_actions(state: &mut GameState) {
    let phase = state.phase;
    let result = match phase {
        GamePhase::Flying if state.input.is_pressed(Action::Confirm) => state.dock().map(|_| ()),
        GamePhase::Flying if state.input.is_pressed(Action::Flee) => state.flee(),
        GamePhase::Docked(_) if state.input.is_pressed(Action::Back) => state.undock(),
        _ => Ok(()),
    };
    if let Err(e) = result {
        log::debug!("Action refused: {}", e);
        state.messages.warning(e.to_string());
    }
}

fn keep_in_arena(state: &mut GameState) {
    let transform = &mut state.player.transform;
    let velocity = &mut state.player.velocity;
    let clamped = transform
        .position
        .clamp(-ARENA_HALF_EXTENTS, ARENA_HALF_EXTENTS);
    if clamped.x != transform.position.x {
        velocity.linear.x = 0.0;
    }
    if clamped.y != transform.position.y {
        velocity.linear.y = 0.0;
    }
    transform.position = clamped;
}

fn update_npcs(state: &mut GameState, dt: f32) {
    state.refresh_attitudes();
    let target = state.player.transform.position;
    let stations = state.station_positions();

    for index in 0..state.npcs.len() {
        let npc = &mut state.npcs[index];
        npc.update_weapons(dt);
        let wants_fire = if npc.is_hostile() {
            steer_hostile(npc, target, dt)
        } else {
            steer_passive(npc, &stations, state.spawner.rng(), dt);
            false
        };
        if wants_fire {
            state.fire_npc_weapons(index);
        }
    }
}

fn update_missions(state: &mut GameState) {
    let now = state.player.game_time;
    let here = state.player.current_system;
    let player = &state.player;
    let outcomes: Vec<(MissionId, MissionCheck)> = player
        .missions
        .iter()
        .map(|m| (m.id, check_mission(m, now, here, |c| player.cargo_of(c))))
        .collect();

    for (id, outcome) in outcomes {
        match outcome {
            MissionCheck::Complete => complete_mission(state, id),
            MissionCheck::Expired => fail_mission(state, id),
            MissionCheck::Pending => {}
        }
    }
}

fn complete_mission(state: &mut GameState, id: MissionId) {
    // Deliveries hand over the cargo; the payout is the reward, not the goods.
    let delivery = state.player.missions.iter().find(|m| m.id == id).and_then(|m| match m.kind {
        MissionKind::Delivery { commodity, quantity } => Some((commodity, quantity)),
        _ => None,
    });
    if let Some((commodity, quantity)) = delivery {
        if let Err(e) = state.player.remove_cargo(commodity, quantity) {
            log::warn!("Delivery {} could not hand over cargo: {}", id, e);
            return;
        }
    }

    let Ok(mission) = state.player.complete_mission(id) else {
        return;
    };
    log::info!("Mission complete: {} (+{} credits)", mission.title, mission.reward);
    state.events.push(SimEvent::MissionCompleted {
        id,
        reward: mission.reward,
    });
    state.emit_credits(mission.reward, "mission");
    if let Some(faction) = mission.rep_faction {
        state.events.push(SimEvent::ReputationChanged {
            faction,
            delta: mission.rep_delta,
            value: state.player.reputation(faction),
            reason: "mission",
        });
    }
    state
        .messages
        .success(format!("Mission complete: {}", mission.title));
}

fn fail_mission(state: &mut GameState, id: MissionId) {
    let Ok(mission) = state.player.fail_mission(id) else {
        return;
    };
    log::info!("Mission expired: {}", mission.title);
    state.events.push(SimEvent::MissionFailed {
        id,
        reason: MissionFailure::Expired,
    });
    if let Some(faction) = mission.rep_faction {
        state.events.push(SimEvent::ReputationChanged {
            faction,
            delta: -mission.rep_delta,
            value: state.player.reputation(faction),
            reason: "mission failed",
        });
    }
    state
        .messages
        .warning(format!("Mission failed: {}", mission.title));
}

/// Destruction or stranding ends the run. Reported once.
///
/// Stranding needs a system with no stations. Generated systems always have at
/// least one, so it only happens when local space has been emptied by the host.
fn check_terminal(state: &mut GameState) {
    let reason = if state.player.is_dead() {
        DefeatReason::Destroyed
    } else if state.stations.is_empty() && state.systems_in_range().is_empty() {
        DefeatReason::Stranded
    } else {
        return;
    };

    state.phase = GamePhase::GameOver(reason);
    if reason == DefeatReason::Stranded {
        state.events.push(SimEvent::Stranded);
    }
    state.advance_story(Milestone::Defeat);

    if !state.game_over_emitted {
        state.game_over_emitted = true;
        let score = state.score();
        log::info!("Game over ({:?}), score {}", reason, score);
        state.events.push(SimEvent::GameOver {
            victory: false,
            score,
        });
    }
}
