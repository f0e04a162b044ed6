//! Seeded galaxy generation and navigation queries.
//!
//! Generation draws from a single [`Mulberry32`] stream in a fixed order (names,
//! then per-system attributes, then per-system connection counts), so a seed
//! fully determines the galaxy.

use crate::names::generate_names;
use crate::star_system::{EconomyType, StarSystem, SystemId};
use crate::territory::assign_territory;
use engine_core::Mulberry32;
use glam::Vec2;

/// Inner radius of the galactic disc; nothing is placed closer to the centre.
pub const GALAXY_INNER_RADIUS: f64 = 60.0;
/// Outer radius of the galactic disc.
pub const GALAXY_OUTER_RADIUS: f64 = 500.0;
/// Distance that costs exactly `fuel_per_jump` fuel.
pub const JUMP_FUEL_DISTANCE: f32 = 200.0;
/// Territory rolls draw from their own stream, apart from the generation draws.
pub const TERRITORY_SEED_OFFSET: u32 = 0x7E55_1700;

/// Generate `count` star systems from `seed`. Factions are left unassigned.
///
/// Every system is connected to between 2 and 4 of its nearest neighbours, and
/// edges are added symmetrically, so a system may end up with more than 4. The
/// graph is not guaranteed to be globally connected.
pub fn generate_galaxy(seed: u32, count: usize) -> Vec<StarSystem> {
    let mut rng = Mulberry32::new(seed);
    let names = generate_names(&mut rng, count);

    let mut systems: Vec<StarSystem> = names
        .into_iter()
        .enumerate()
        .map(|(id, name)| {
            let angle = rng.next_f64() * std::f64::consts::TAU;
            let dist = GALAXY_INNER_RADIUS + rng.next_f64() * (GALAXY_OUTER_RADIUS - GALAXY_INNER_RADIUS);
            let x = round_half_up(angle.cos() * dist);
            let y = round_half_up(angle.sin() * dist);
            let economy = EconomyType::ALL[rng.index(EconomyType::ALL.len())];
            StarSystem {
                id,
                name,
                position: Vec2::new(x as f32, y as f32),
                economy,
                tech_level: rng.int(1, 10) as u8,
                population: rng.int(1, 8) as u8,
                danger: rng.int(0, 5) as u8,
                faction: None,
                station_count: rng.int(1, 3) as u8,
                connections: Vec::new(),
            }
        })
        .collect();

    connect_nearest(&mut systems, &mut rng);
    systems
}

/// Link each system to a random number (2..=4) of its nearest neighbours.
fn connect_nearest(systems: &mut [StarSystem], rng: &mut Mulberry32) {
    let coords: Vec<(f64, f64)> = systems
        .iter()
        .map(|s| (f64::from(s.position.x), f64::from(s.position.y)))
        .collect();

    for i in 0..systems.len() {
        let (ix, iy) = coords[i];
        let mut others: Vec<(SystemId, f64)> = coords
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, &(x, y))| (j, (x - ix).hypot(y - iy)))
            .collect();
        // Stable: equal distances keep id order.
        others.sort_by(|a, b| a.1.total_cmp(&b.1));

        let count = rng.int(2, 4) as usize;
        for &(j, _) in others.iter().take(count) {
            if !systems[i].connections.contains(&j) {
                systems[i].connections.push(j);
                systems[j].connections.push(i);
            }
        }
    }
}

/// `Math.round` semantics: halves round towards positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// The generated galaxy: systems plus the seed they came from.
#[derive(Debug, Clone)]
pub struct Galaxy {
    seed: u32,
    systems: Vec<StarSystem>,
    capitals: Vec<SystemId>,
}

impl Galaxy {
    /// Generate systems and assign faction territory.
    pub fn new(seed: u32, count: usize) -> Self {
        let mut systems = generate_galaxy(seed, count);
        let mut territory_rng = Mulberry32::new(seed ^ TERRITORY_SEED_OFFSET);
        let capitals = assign_territory(&mut systems, &mut territory_rng);

        let edges: usize = systems.iter().map(|s| s.connections.len()).sum::<usize>() / 2;
        log::info!(
            "Generated galaxy: seed {}, {} systems, {} jump lanes, {} faction capitals",
            seed,
            systems.len(),
            edges,
            capitals.len()
        );

        Self { seed, systems, capitals }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn get(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.get(id)
    }

    /// Faction capitals in catalog order.
    pub fn capitals(&self) -> &[SystemId] {
        &self.capitals
    }

    /// Direct neighbours of a system. Empty for an unknown id.
    pub fn connections(&self, id: SystemId) -> &[SystemId] {
        self.get(id).map(|s| s.connections.as_slice()).unwrap_or(&[])
    }

    /// Straight-line distance between two systems, `None` if either id is unknown.
    pub fn jump_distance(&self, from: SystemId, to: SystemId) -> Option<f32> {
        let a = self.get(from)?;
        let b = self.get(to)?;
        Some(a.distance_to(b))
    }

    /// Fuel a jump costs: `ceil(fuel_per_jump * distance / 200)`.
    pub fn fuel_for_jump(&self, from: SystemId, to: SystemId, fuel_per_jump: f32) -> Option<f32> {
        self.jump_distance(from, to)
            .map(|d| (fuel_per_jump * (d / JUMP_FUEL_DISTANCE)).ceil())
    }

    /// Every other system reachable from `from` with `fuel` on board.
    pub fn systems_in_range(&self, from: SystemId, fuel: f32, fuel_per_jump: f32) -> Vec<SystemId> {
        (0..self.systems.len())
            .filter(|&id| id != from)
            .filter(|&id| {
                self.fuel_for_jump(from, id, fuel_per_jump)
                    .is_some_and(|cost| cost <= fuel)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        for seed in [1, 42, 1337, 0xDEAD_BEEF] {
            assert_eq!(generate_galaxy(seed, 40), generate_galaxy(seed, 40));
        }
    }

    #[test]
    fn connections_are_symmetric() {
        for seed in [3, 42, 99] {
            let systems = generate_galaxy(seed, 40);
            for s in &systems {
                for &j in &s.connections {
                    assert_ne!(j, s.id);
                    assert!(systems[j].is_connected(s.id), "{} -> {} not mirrored", s.id, j);
                }
            }
        }
    }

    #[test]
    fn every_system_has_at_least_two_lanes() {
        let systems = generate_galaxy(42, 40);
        assert!(systems.iter().all(|s| s.connections.len() >= 2));
    }

    #[test]
    fn attributes_stay_in_range() {
        for s in generate_galaxy(7, 60) {
            assert!((1..=10).contains(&s.tech_level));
            assert!((1..=8).contains(&s.population));
            assert!(s.danger <= 5);
            assert!((1..=3).contains(&s.station_count));
            let r = s.position.length();
            assert!((59.0..=501.0).contains(&r), "radius {}", r);
        }
    }

    #[test]
    fn seed_42_reference_system() {
        let systems = generate_galaxy(42, 40);
        let first = &systems[0];
        assert_eq!(first.name, "Arcith");
        assert_eq!(first.position, Vec2::new(-169.0, 342.0));
        assert_eq!(first.economy, EconomyType::Industrial);
        assert_eq!(first.tech_level, 5);
        assert_eq!(first.population, 7);
        assert_eq!(first.danger, 4);
        assert_eq!(first.station_count, 3);
        assert_eq!(first.connections, vec![11, 29, 35, 37]);
        assert!((2..=4).contains(&first.connections.len()));
    }

    #[test]
    fn some_space_stays_unclaimed_but_capitals_never_do() {
        let mut claimable = 0;
        let mut unclaimed = 0;
        for seed in 1..=20 {
            let galaxy = Galaxy::new(seed, 40);
            for &c in galaxy.capitals() {
                assert!(galaxy.systems()[c].faction.is_some(), "seed {} capital {}", seed, c);
            }
            for s in galaxy.systems().iter().filter(|s| !galaxy.capitals().contains(&s.id)) {
                claimable += 1;
                if s.faction.is_none() {
                    unclaimed += 1;
                }
            }
        }
        let share = unclaimed as f64 / claimable as f64;
        assert!(unclaimed > 0);
        assert!((0.07..=0.25).contains(&share), "unclaimed share {}", share);
    }

    #[test]
    fn territory_stream_is_separate_from_generation() {
        let mut generation = Mulberry32::new(42);
        let mut territory = Mulberry32::new(42 ^ TERRITORY_SEED_OFFSET);
        let a: Vec<u32> = (0..8).map(|_| generation.next_u32()).collect();
        let b: Vec<u32> = (0..8).map(|_| territory.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn jump_fuel_is_symmetric() {
        let galaxy = Galaxy::new(42, 40);
        for a in 0..galaxy.len() {
            for b in 0..galaxy.len() {
                assert_eq!(galaxy.fuel_for_jump(a, b, 15.0), galaxy.fuel_for_jump(b, a, 15.0));
            }
        }
        assert_eq!(galaxy.fuel_for_jump(0, 999, 15.0), None);
    }

    #[test]
    fn range_excludes_origin_and_respects_fuel() {
        let galaxy = Galaxy::new(42, 40);
        let in_range = galaxy.systems_in_range(0, 20.0, 15.0);
        assert!(!in_range.contains(&0));
        for id in in_range {
            assert!(galaxy.fuel_for_jump(0, id, 15.0).is_some_and(|c| c <= 20.0));
        }
    }
}
