//! Star systems and their orbiting stations.

use crate::faction::FactionId;
use engine_core::Mulberry32;
use glam::Vec2;

/// Index of a system in the galaxy.
pub type SystemId = usize;

/// Economic profile of a system; drives commodity price modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconomyType {
    Agricultural,
    Industrial,
    Mining,
    Tech,
    Military,
    TradeHub,
}

impl EconomyType {
    pub const ALL: [EconomyType; 6] = [
        EconomyType::Agricultural,
        EconomyType::Industrial,
        EconomyType::Mining,
        EconomyType::Tech,
        EconomyType::Military,
        EconomyType::TradeHub,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EconomyType::Agricultural => "agricultural",
            EconomyType::Industrial => "industrial",
            EconomyType::Mining => "mining",
            EconomyType::Tech => "tech",
            EconomyType::Military => "military",
            EconomyType::TradeHub => "trade-hub",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.key() == key)
    }

    /// Position in [`EconomyType::ALL`]; indexes per-economy modifier tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A node in the galaxy graph.
///
/// Immutable after generation except `faction`, which territory assignment sets once.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    /// Galactic coordinates (whole units).
    pub position: Vec2,
    pub economy: EconomyType,
    /// 1..=10
    pub tech_level: u8,
    /// 1..=8
    pub population: u8,
    /// 0..=5
    pub danger: u8,
    pub faction: Option<FactionId>,
    /// 1..=3
    pub station_count: u8,
    /// Undirected: `j` in `i.connections` iff `i` in `j.connections`.
    pub connections: Vec<SystemId>,
}

impl StarSystem {
    /// Euclidean distance to another system.
    pub fn distance_to(&self, other: &StarSystem) -> f32 {
        self.position.distance(other.position)
    }

    pub fn is_connected(&self, other: SystemId) -> bool {
        self.connections.contains(&other)
    }

    /// Generate this system's stations. Deterministic for a given galaxy seed.
    pub fn generate_stations(&self, galaxy_seed: u32) -> Vec<Station> {
        let mut rng = Mulberry32::new(station_seed(galaxy_seed, self.id));
        let mut suffixes = STATION_SUFFIXES;
        rng.shuffle(&mut suffixes);

        (0..self.station_count as usize)
            .map(|i| {
                let orbit_radius = 150.0 + i as f32 * 120.0 + rng.range_f32(0.0, 60.0);
                let orbit_angle = rng.range_f32(0.0, std::f32::consts::TAU);
                Station {
                    name: format!("{} {}", self.name, suffixes[i % suffixes.len()]),
                    orbit_angle,
                    orbit_radius,
                    orbit_speed: STATION_ORBIT_SPEED * (150.0 / orbit_radius),
                }
            })
            .collect()
    }
}

const STATION_SUFFIXES: [&str; 6] = ["Station", "Outpost", "Depot", "Citadel", "Port", "Hub"];

/// Radians per millisecond for an inner-ring station.
const STATION_ORBIT_SPEED: f32 = 0.00005;

fn station_seed(galaxy_seed: u32, id: SystemId) -> u32 {
    galaxy_seed ^ (id as u32).wrapping_add(1).wrapping_mul(0x9E37_79B9)
}

/// A dockable station orbiting the system's star (the local origin).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub orbit_angle: f32,
    pub orbit_radius: f32,
    /// Radians per millisecond.
    pub orbit_speed: f32,
}

impl Station {
    /// Local-space position derived from the orbit.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.orbit_angle.cos(), self.orbit_angle.sin()) * self.orbit_radius
    }

    /// Advance the orbit. Purely cosmetic.
    pub fn advance(&mut self, dt: f32) {
        self.orbit_angle = (self.orbit_angle + self.orbit_speed * dt).rem_euclid(std::f32::consts::TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_system(station_count: u8) -> StarSystem {
        StarSystem {
            id: 3,
            name: "Veguri".to_string(),
            position: Vec2::new(10.0, -20.0),
            economy: EconomyType::Tech,
            tech_level: 7,
            population: 4,
            danger: 1,
            faction: None,
            station_count,
            connections: vec![1, 2],
        }
    }

    #[test]
    fn economy_keys_round_trip() {
        for e in EconomyType::ALL {
            assert_eq!(EconomyType::from_key(e.key()), Some(e));
        }
        assert_eq!(EconomyType::from_key("farming"), None);
    }

    #[test]
    fn stations_are_deterministic_and_counted() {
        let sys = sample_system(3);
        let a = sys.generate_stations(42);
        let b = sys.generate_stations(42);
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.name.starts_with("Veguri ")));
    }

    #[test]
    fn station_orbit_advances_and_keeps_radius() {
        let sys = sample_system(1);
        let mut station = sys.generate_stations(7).remove(0);
        let before = station.position();
        station.advance(1000.0);
        let after = station.position();
        assert_ne!(before, after);
        assert!((after.length() - station.orbit_radius).abs() < 1e-2);
    }
}
