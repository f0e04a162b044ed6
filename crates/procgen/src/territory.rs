//! Faction territory: farthest-point capitals, then nearest-capital claims.

use crate::faction::{factions, FactionId};
use crate::star_system::{StarSystem, SystemId};
use engine_core::Mulberry32;
use glam::Vec2;

/// Probability that a non-capital system stays independent.
pub const UNCLAIMED_CHANCE: f64 = 0.15;

/// Assign a faction to every system and return the capitals in catalog order.
///
/// Capitals are chosen greedily: the first is the system farthest from the galactic
/// centre, each next one maximises its distance to the nearest capital already
/// chosen. Ties go to the lowest id. Every other system, in id order, rolls
/// [`UNCLAIMED_CHANCE`] to stay independent and otherwise joins the faction of
/// its nearest capital.
pub fn assign_territory(systems: &mut [StarSystem], rng: &mut Mulberry32) -> Vec<SystemId> {
    let capitals = pick_capitals(systems, FactionId::ALL.len());

    for (faction, &capital) in FactionId::ALL.iter().zip(&capitals) {
        systems[capital].faction = Some(*faction);
    }

    for i in 0..systems.len() {
        if capitals.contains(&i) {
            continue;
        }
        if rng.chance(UNCLAIMED_CHANCE) {
            systems[i].faction = None;
            continue;
        }
        let position = systems[i].position;
        let nearest = capitals
            .iter()
            .enumerate()
            .min_by(|a, b| {
                let da = systems[*a.1].position.distance(position);
                let db = systems[*b.1].position.distance(position);
                da.total_cmp(&db)
            })
            .map(|(k, _)| FactionId::ALL[k]);
        systems[i].faction = nearest;
    }

    log_shares(systems);
    capitals
}

fn pick_capitals(systems: &[StarSystem], wanted: usize) -> Vec<SystemId> {
    let mut capitals: Vec<SystemId> = Vec::with_capacity(wanted);

    while capitals.len() < wanted.min(systems.len()) {
        let mut best: Option<(SystemId, f32)> = None;
        for s in systems.iter().filter(|s| !capitals.contains(&s.id)) {
            let score = if capitals.is_empty() {
                s.position.distance(Vec2::ZERO)
            } else {
                capitals
                    .iter()
                    .map(|&c| systems[c].position.distance(s.position))
                    .fold(f32::INFINITY, f32::min)
            };
            // Strictly greater keeps the lowest id on ties.
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((s.id, score));
            }
        }
        match best {
            Some((id, _)) => capitals.push(id),
            None => break,
        }
    }

    capitals
}

fn log_shares(systems: &[StarSystem]) {
    if systems.is_empty() {
        return;
    }
    let total = systems.len() as f32;
    for faction in factions() {
        let held = systems.iter().filter(|s| s.faction == Some(faction.id)).count();
        log::debug!(
            "{}: {} systems ({:.0}%, nominal {:.0}%)",
            faction.name,
            held,
            held as f32 / total * 100.0,
            faction.system_share * 100.0
        );
    }
}
