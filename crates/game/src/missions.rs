//! Mission boards, completion checks and kill attribution.

use engine_core::Mulberry32;
use procgen::{FactionId, Galaxy, SystemId};

use crate::catalog::CommodityId;
use crate::spawner::pirates_for_danger;

pub type MissionId = u32;

/// Exploration targets must be at least this far away.
pub const EXPLORATION_MIN_DISTANCE: f32 = 250.0;

#[derive(Debug, Clone, PartialEq)]
pub enum MissionKind {
    /// Bring `quantity` units of `commodity` to the destination.
    Delivery { commodity: CommodityId, quantity: u32 },
    /// Destroy pirates in the destination system.
    Combat { required_kills: u32, kills: u32 },
    /// Visit the destination.
    Exploration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    /// Zero while still on a station board; assigned on acceptance.
    pub id: MissionId,
    pub kind: MissionKind,
    pub origin: SystemId,
    pub destination: SystemId,
    pub title: String,
    pub reward: i64,
    pub rep_faction: Option<FactionId>,
    /// Gained on completion, lost on failure.
    pub rep_delta: i32,
    pub timeout_ms: f64,
    pub start_time_ms: f64,
}

impl Mission {
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.start_time_ms > self.timeout_ms
    }

    pub fn is_combat(&self) -> bool {
        matches!(self.kind, MissionKind::Combat { .. })
    }
}

/// Outcome of checking one active mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionCheck {
    Pending,
    Complete,
    Expired,
}

/// Check a mission against the player's situation. Completion wins over expiry
/// when both hold on the same tick.
pub fn check_mission(
    mission: &Mission,
    now_ms: f64,
    current_system: SystemId,
    cargo_of: impl Fn(CommodityId) -> u32,
) -> MissionCheck {
    let complete = match &mission.kind {
        MissionKind::Delivery { commodity, quantity } => {
            current_system == mission.destination && cargo_of(*commodity) >= *quantity
        }
        MissionKind::Exploration => current_system == mission.destination,
        MissionKind::Combat { required_kills, kills } => kills >= required_kills,
    };

    if complete {
        MissionCheck::Complete
    } else if mission.is_expired(now_ms) {
        MissionCheck::Expired
    } else {
        MissionCheck::Pending
    }
}

/// Credit a pirate kill in `system` to the oldest active combat mission there.
pub fn record_kill(missions: &mut [Mission], system: SystemId) -> Option<MissionId> {
    let mission = missions
        .iter_mut()
        .filter(|m| m.is_combat() && m.destination == system)
        .min_by(|a, b| a.start_time_ms.total_cmp(&b.start_time_ms))?;
    if let MissionKind::Combat { kills, .. } = &mut mission.kind {
        *kills += 1;
    }
    Some(mission.id)
}

/// Build the board for a station in `origin`: up to one delivery, one combat and
/// one exploration offer.
pub fn generate_missions(
    galaxy: &Galaxy,
    origin: SystemId,
    rng: &mut Mulberry32,
    timeout_ms: f64,
) -> Vec<Mission> {
    let Some(here) = galaxy.get(origin) else {
        return Vec::new();
    };
    let mut board = Vec::new();

    if let Some(&dest) = rng.pick(&here.connections) {
        let legal: Vec<CommodityId> = CommodityId::ALL
            .into_iter()
            .filter(|c| !c.info().illegal)
            .collect();
        let commodity = rng.pick(&legal).copied().unwrap_or(CommodityId::Food);
        let quantity = rng.int(2, 6) as u32;
        let distance = galaxy.jump_distance(origin, dest).unwrap_or(0.0);
        let reward = (commodity.info().base_price * f64::from(quantity) * 0.5 + f64::from(distance) * 2.0)
            .round()
            .max(100.0) as i64;
        let dest_name = galaxy.get(dest).map_or("?", |s| s.name.as_str());
        board.push(Mission {
            id: 0,
            kind: MissionKind::Delivery { commodity, quantity },
            origin,
            destination: dest,
            title: format!(
                "Deliver {}{} {} to {}",
                quantity,
                commodity.info().unit,
                commodity.info().name,
                dest_name
            ),
            reward,
            rep_faction: Some(FactionId::Merchants),
            rep_delta: 5,
            timeout_ms,
            start_time_ms: 0.0,
        });
    }

    let required_kills = pirates_for_danger(here.danger);
    if required_kills > 0 {
        board.push(Mission {
            id: 0,
            kind: MissionKind::Combat { required_kills, kills: 0 },
            origin,
            destination: origin,
            title: format!(
                "Clear {} pirate{} from {}",
                required_kills,
                if required_kills == 1 { "" } else { "s" },
                here.name
            ),
            reward: 250 * i64::from(here.danger),
            rep_faction: Some(FactionId::Federation),
            rep_delta: 10,
            timeout_ms,
            start_time_ms: 0.0,
        });
    }

    let distant: Vec<SystemId> = galaxy
        .systems()
        .iter()
        .filter(|s| s.id != origin && here.distance_to(s) > EXPLORATION_MIN_DISTANCE)
        .map(|s| s.id)
        .collect();
    if let Some(&dest) = rng.pick(&distant) {
        let distance = galaxy.jump_distance(origin, dest).unwrap_or(0.0);
        let dest_name = galaxy.get(dest).map_or("?", |s| s.name.as_str());
        board.push(Mission {
            id: 0,
            kind: MissionKind::Exploration,
            origin,
            destination: dest,
            title: format!("Survey the {} system", dest_name),
            reward: (150.0 + f64::from(distance) * 1.5).round() as i64,
            rep_faction: Some(FactionId::Scientists),
            rep_delta: 5,
            timeout_ms,
            start_time_ms: 0.0,
        });
    }

    log::debug!("Mission board at {}: {} offers", here.name, board.len());
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::NpcRole;
    use crate::spawner::NpcSpawner;

    fn combat(id: MissionId, system: SystemId, start: f64) -> Mission {
        Mission {
            id,
            kind: MissionKind::Combat { required_kills: 2, kills: 0 },
            origin: system,
            destination: system,
            title: String::new(),
            reward: 500,
            rep_faction: Some(FactionId::Federation),
            rep_delta: 10,
            timeout_ms: 1000.0,
            start_time_ms: start,
        }
    }

    #[test]
    fn board_has_at_most_three_offers() {
        let galaxy = Galaxy::new(42, 40);
        let mut rng = Mulberry32::new(1);
        for origin in 0..galaxy.len() {
            let board = generate_missions(&galaxy, origin, &mut rng, 300_000.0);
            assert!(board.len() <= 3);
            let danger = galaxy.get(origin).map_or(0, |s| s.danger);
            assert_eq!(board.iter().any(Mission::is_combat), danger >= 2);
            for m in &board {
                if let MissionKind::Delivery { .. } = m.kind {
                    assert!(galaxy.connections(origin).contains(&m.destination));
                }
                if m.kind == MissionKind::Exploration {
                    assert!(galaxy.jump_distance(origin, m.destination).unwrap() > EXPLORATION_MIN_DISTANCE);
                }
            }
        }
    }

    #[test]
    fn combat_jobs_can_be_cleared_in_one_visit() {
        let galaxy = Galaxy::new(42, 40);
        let mut rng = Mulberry32::new(7);
        let mut spawner = NpcSpawner::new(42);
        let mut checked = 0;
        for system in galaxy.systems() {
            let board = generate_missions(&galaxy, system.id, &mut rng, 300_000.0);
            let stations: Vec<_> = system
                .generate_stations(galaxy.seed())
                .iter()
                .map(|s| s.position())
                .collect();
            let pirates = spawner
                .populate(system, &stations)
                .iter()
                .filter(|n| n.role == NpcRole::Pirate)
                .count() as u32;
            for m in &board {
                if let MissionKind::Combat { required_kills, .. } = m.kind {
                    assert!(required_kills >= 1);
                    assert_eq!(required_kills, pirates, "system {}", system.id);
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn delivery_needs_destination_and_cargo() {
        let m = Mission {
            kind: MissionKind::Delivery { commodity: CommodityId::Food, quantity: 3 },
            destination: 4,
            ..combat(1, 4, 0.0)
        };
        assert_eq!(check_mission(&m, 0.0, 4, |_| 2), MissionCheck::Pending);
        assert_eq!(check_mission(&m, 0.0, 3, |_| 3), MissionCheck::Pending);
        assert_eq!(check_mission(&m, 0.0, 4, |_| 3), MissionCheck::Complete);
    }

    #[test]
    fn missions_expire_after_timeout() {
        let m = Mission {
            kind: MissionKind::Exploration,
            destination: 9,
            ..combat(1, 2, 500.0)
        };
        assert_eq!(check_mission(&m, 1500.0, 2, |_| 0), MissionCheck::Pending);
        assert_eq!(check_mission(&m, 1500.1, 2, |_| 0), MissionCheck::Expired);
        assert_eq!(check_mission(&m, 1500.1, 9, |_| 0), MissionCheck::Complete);
    }

    #[test]
    fn kills_go_to_oldest_combat_mission_in_system() {
        let mut missions = vec![combat(1, 5, 200.0), combat(2, 5, 100.0), combat(3, 6, 0.0)];
        assert_eq!(record_kill(&mut missions, 5), Some(2));
        assert_eq!(missions[1].kind, MissionKind::Combat { required_kills: 2, kills: 1 });
        assert_eq!(missions[0].kind, MissionKind::Combat { required_kills: 2, kills: 0 });
        assert_eq!(record_kill(&mut missions, 7), None);
    }
}
