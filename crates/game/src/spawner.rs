//! Per-system NPC population.
//!
//! Arrival in a system fills local space from the system's attributes: a trader
//! working a station in populated systems, a faction patrol where a lawful
//! faction holds the system, and pirates scaled by danger. Pirates and patrols
//! arrive from a randomly chosen edge of the arena.

use engine_core::{bearing, Transform};
use glam::Vec2;
use procgen::{FactionId, StarSystem};
use rand::prelude::*;

use crate::catalog::ShipTypeId;
use crate::npc::{Npc, NpcId, NpcRole};

/// Half-size of the local combat arena around the system origin.
pub const ARENA_HALF_EXTENTS: Vec2 = Vec2::new(1000.0, 800.0);

const TRADER_MIN_POPULATION: u8 = 3;
const PATROL_MIN_POPULATION: u8 = 2;
const PIRATE_FIGHTER_DANGER: u8 = 2;
const PIRATE_CORVETTE_DANGER: u8 = 4;
/// Traders appear within this distance of their station.
const TRADER_SCATTER: f32 = 80.0;
/// Edge spawns sit this fraction of the way to the arena boundary.
const EDGE_INSET: f32 = 0.9;

/// Pirates that arrive in a system of this danger on each visit.
pub fn pirates_for_danger(danger: u8) -> u32 {
    u32::from(danger >= PIRATE_FIGHTER_DANGER) + u32::from(danger >= PIRATE_CORVETTE_DANGER)
}

/// Which edge of the arena an NPC enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSide {
    North,
    East,
    South,
    West,
}

impl SpawnSide {
    pub const ALL: [SpawnSide; 4] = [SpawnSide::North, SpawnSide::East, SpawnSide::South, SpawnSide::West];
}

/// Fills systems with NPCs and owns the local-space random stream.
pub struct NpcSpawner {
    next_id: NpcId,
    rng: StdRng,
}

impl NpcSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            next_id: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random stream shared with passive AI waypoint picking.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn allocate_id(&mut self) -> NpcId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn the local population for `system`. `stations` are current station positions.
    pub fn populate(&mut self, system: &StarSystem, stations: &[Vec2]) -> Vec<Npc> {
        let mut npcs = Vec::new();

        if system.population >= TRADER_MIN_POPULATION {
            if let Some(&station) = stations.choose(&mut self.rng) {
                let offset = Vec2::new(
                    self.rng.gen_range(-TRADER_SCATTER..TRADER_SCATTER),
                    self.rng.gen_range(-TRADER_SCATTER..TRADER_SCATTER),
                );
                let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
                let id = self.allocate_id();
                npcs.push(Npc::new(
                    id,
                    NpcRole::Trader,
                    ShipTypeId::Trader,
                    FactionId::Merchants,
                    Transform::from_position_angle(station + offset, angle),
                ));
            }
        }

        if let Some(faction) = system.faction.filter(|f| !f.is_pirate()) {
            if system.population >= PATROL_MIN_POPULATION {
                let npc = self.spawn_at_edge(NpcRole::Patrol, ShipTypeId::Fighter, faction);
                npcs.push(npc);
            }
        }

        let pirate_ships = [ShipTypeId::Fighter, ShipTypeId::Corvette];
        for &ship in pirate_ships.iter().take(pirates_for_danger(system.danger) as usize) {
            let npc = self.spawn_at_edge(NpcRole::Pirate, ship, FactionId::Pirates);
            npcs.push(npc);
        }

        log::debug!("Spawned {} NPCs in {}", npcs.len(), system.name);
        npcs
    }

    fn spawn_at_edge(&mut self, role: NpcRole, ship: ShipTypeId, faction: FactionId) -> Npc {
        let side = SpawnSide::ALL[self.rng.gen_range(0..SpawnSide::ALL.len())];
        let position = self.edge_point(side);
        // Face the middle of the arena.
        let angle = bearing(position, Vec2::ZERO);
        let id = self.allocate_id();
        Npc::new(id, role, ship, faction, Transform::from_position_angle(position, angle))
    }

    fn edge_point(&mut self, side: SpawnSide) -> Vec2 {
        let half = ARENA_HALF_EXTENTS * EDGE_INSET;
        let along_x = self.rng.gen_range(-half.x..half.x);
        let along_y = self.rng.gen_range(-half.y..half.y);
        match side {
            SpawnSide::North => Vec2::new(along_x, -half.y),
            SpawnSide::South => Vec2::new(along_x, half.y),
            SpawnSide::East => Vec2::new(half.x, along_y),
            SpawnSide::West => Vec2::new(-half.x, along_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::EconomyType;

    fn system(population: u8, danger: u8, faction: Option<FactionId>) -> StarSystem {
        StarSystem {
            id: 7,
            name: "Testbed".to_string(),
            position: Vec2::ZERO,
            economy: EconomyType::TradeHub,
            tech_level: 5,
            population,
            danger,
            faction,
            station_count: 1,
            connections: Vec::new(),
        }
    }

    fn roles(npcs: &[Npc]) -> Vec<(NpcRole, ShipTypeId)> {
        npcs.iter().map(|n| (n.role, n.ship)).collect()
    }

    #[test]
    fn quiet_system_is_empty() {
        let mut spawner = NpcSpawner::new(1);
        let npcs = spawner.populate(&system(1, 0, Some(FactionId::Federation)), &[Vec2::new(150.0, 0.0)]);
        assert!(npcs.is_empty());
    }

    #[test]
    fn busy_dangerous_system_gets_everything() {
        let mut spawner = NpcSpawner::new(2);
        let npcs = spawner.populate(&system(5, 4, Some(FactionId::Scientists)), &[Vec2::new(150.0, 0.0)]);
        assert_eq!(
            roles(&npcs),
            vec![
                (NpcRole::Trader, ShipTypeId::Trader),
                (NpcRole::Patrol, ShipTypeId::Fighter),
                (NpcRole::Pirate, ShipTypeId::Fighter),
                (NpcRole::Pirate, ShipTypeId::Corvette),
            ]
        );
        assert_eq!(npcs[1].faction, FactionId::Scientists);
        let ids: Vec<NpcId> = npcs.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn pirate_space_has_no_patrol() {
        let mut spawner = NpcSpawner::new(3);
        let npcs = spawner.populate(&system(2, 2, Some(FactionId::Pirates)), &[]);
        assert_eq!(roles(&npcs), vec![(NpcRole::Pirate, ShipTypeId::Fighter)]);
    }

    #[test]
    fn trader_needs_a_station() {
        let mut spawner = NpcSpawner::new(4);
        assert!(spawner.populate(&system(6, 0, None), &[]).is_empty());
        let station = Vec2::new(300.0, -200.0);
        let npcs = spawner.populate(&system(6, 0, None), &[station]);
        assert_eq!(npcs.len(), 1);
        assert!(npcs[0].transform.position.distance(station) <= TRADER_SCATTER * 2.0_f32.sqrt());
    }

    #[test]
    fn edge_spawns_sit_on_the_boundary() {
        let mut spawner = NpcSpawner::new(5);
        for _ in 0..20 {
            let npcs = spawner.populate(&system(0, 2, None), &[]);
            let p = npcs[0].transform.position;
            let half = ARENA_HALF_EXTENTS * EDGE_INSET;
            assert!((p.x.abs() - half.x).abs() < 1e-3 || (p.y.abs() - half.y).abs() < 1e-3);
        }
    }

    #[test]
    fn pirate_count_follows_danger() {
        let mut spawner = NpcSpawner::new(3);
        for danger in 0..=5 {
            let npcs = spawner.populate(&system(0, danger, None), &[]);
            let pirates = npcs.iter().filter(|n| n.role == NpcRole::Pirate).count();
            assert_eq!(pirates as u32, pirates_for_danger(danger), "danger {}", danger);
        }
        assert_eq!(pirates_for_danger(1), 0);
        assert_eq!(pirates_for_danger(3), 1);
        assert_eq!(pirates_for_danger(5), 2);
    }

    #[test]
    fn same_seed_same_population() {
        let s = system(5, 5, Some(FactionId::Federation));
        let stations = [Vec2::new(200.0, 0.0)];
        let a = NpcSpawner::new(9).populate(&s, &stations);
        let b = NpcSpawner::new(9).populate(&s, &stations);
        let pa: Vec<Vec2> = a.iter().map(|n| n.transform.position).collect();
        let pb: Vec<Vec2> = b.iter().map(|n| n.transform.position).collect();
        assert_eq!(pa, pb);
    }
}
