//! Simulation configuration. Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialise config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Tunable simulation settings, grouped by subsystem. Every field has a default,
/// so a partial `config.ron` only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub galaxy: GalaxyConfig,
    #[serde(default)]
    pub economy: EconomyConfig,
    #[serde(default)]
    pub ship: ShipConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub missions: MissionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyConfig {
    /// Seed for galaxy layout, names and territory. Restarting reuses it.
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_system_count")]
    pub system_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    #[serde(default = "default_start_credits")]
    pub start_credits: i64,
    /// Credits per unit of fuel.
    #[serde(default = "default_fuel_price")]
    pub fuel_price: i64,
    /// Fraction withheld from sale prices, in [0, 1].
    #[serde(default = "default_trade_tax")]
    pub trade_tax: f64,
    /// Prices change in steps of this many milliseconds.
    #[serde(default = "default_market_step")]
    pub market_step_ms: f64,
    /// Credits per hull point.
    #[serde(default = "default_repair_price")]
    pub repair_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipConfig {
    #[serde(default = "default_start_fuel")]
    pub start_fuel: f32,
    /// Fuel burned per 200 units of jump distance.
    #[serde(default = "default_fuel_per_jump")]
    pub fuel_per_jump: f32,
    /// Shield points restored per millisecond.
    #[serde(default = "default_shield_recharge")]
    pub shield_recharge_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    #[serde(default = "default_flee_fuel_cost")]
    pub flee_fuel_cost: f32,
    #[serde(default = "default_loot_min")]
    pub loot_min: i32,
    #[serde(default = "default_loot_max")]
    pub loot_max: i32,
    /// Reputation lost with a faction for destroying one of its ships.
    #[serde(default = "default_kill_penalty")]
    pub kill_reputation_penalty: i32,
    /// Federation reputation gained per pirate destroyed.
    #[serde(default = "default_pirate_bounty")]
    pub pirate_kill_bonus: i32,
    /// Reputation lost for opening fire on a non-hostile ship.
    #[serde(default = "default_first_contact")]
    pub first_contact_penalty: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    #[serde(default = "default_max_missions")]
    pub max_missions: usize,
    #[serde(default = "default_mission_timeout")]
    pub timeout_ms: f64,
}

fn default_seed() -> u32 {
    42
}
fn default_system_count() -> usize {
    40
}
fn default_start_credits() -> i64 {
    1000
}
fn default_fuel_price() -> i64 {
    5
}
fn default_trade_tax() -> f64 {
    0.05
}
fn default_market_step() -> f64 {
    18_000.0
}
fn default_repair_price() -> i64 {
    10
}
fn default_start_fuel() -> f32 {
    100.0
}
fn default_fuel_per_jump() -> f32 {
    15.0
}
fn default_shield_recharge() -> f32 {
    0.002
}
fn default_flee_fuel_cost() -> f32 {
    10.0
}
fn default_loot_min() -> i32 {
    50
}
fn default_loot_max() -> i32 {
    200
}
fn default_kill_penalty() -> i32 {
    10
}
fn default_pirate_bounty() -> i32 {
    5
}
fn default_first_contact() -> i32 {
    5
}
fn default_max_missions() -> usize {
    3
}
fn default_mission_timeout() -> f64 {
    300_000.0
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            system_count: default_system_count(),
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            start_credits: default_start_credits(),
            fuel_price: default_fuel_price(),
            trade_tax: default_trade_tax(),
            market_step_ms: default_market_step(),
            repair_price: default_repair_price(),
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            start_fuel: default_start_fuel(),
            fuel_per_jump: default_fuel_per_jump(),
            shield_recharge_rate: default_shield_recharge(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            flee_fuel_cost: default_flee_fuel_cost(),
            loot_min: default_loot_min(),
            loot_max: default_loot_max(),
            kill_reputation_penalty: default_kill_penalty(),
            pirate_kill_bonus: default_pirate_bounty(),
            first_contact_penalty: default_first_contact(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            max_missions: default_max_missions(),
            timeout_ms: default_mission_timeout(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron(&data)
    }

    /// Parse and validate config text.
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(data)?;
        Ok(config.validated())
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Save current config to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Clamp out-of-range values, warning about each one.
    pub fn validated(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.economy.trade_tax) {
            log::warn!("trade_tax {} out of [0, 1], clamping", self.economy.trade_tax);
            self.economy.trade_tax = self.economy.trade_tax.clamp(0.0, 1.0);
        }
        if self.galaxy.system_count < 2 {
            log::warn!("system_count {} too small, using 2", self.galaxy.system_count);
            self.galaxy.system_count = 2;
        }
        if self.missions.max_missions < 1 {
            log::warn!("max_missions must be at least 1");
            self.missions.max_missions = 1;
        }
        if self.economy.market_step_ms < 1.0 {
            log::warn!("market_step_ms {} too small, using 1", self.economy.market_step_ms);
            self.economy.market_step_ms = 1.0;
        }
        if self.economy.fuel_price < 0 || self.economy.repair_price < 0 {
            log::warn!("negative station prices, clamping to 0");
            self.economy.fuel_price = self.economy.fuel_price.max(0);
            self.economy.repair_price = self.economy.repair_price.max(0);
        }
        if self.combat.loot_max < self.combat.loot_min {
            log::warn!("loot_max below loot_min, swapping");
            std::mem::swap(&mut self.combat.loot_min, &mut self.combat.loot_max);
        }
        self
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_table() {
        let c = GameConfig::default();
        assert_eq!(c.galaxy.seed, 42);
        assert_eq!(c.galaxy.system_count, 40);
        assert_eq!(c.economy.start_credits, 1000);
        assert_eq!(c.ship.start_fuel, 100.0);
        assert_eq!(c.ship.fuel_per_jump, 15.0);
        assert_eq!(c.missions.max_missions, 3);
        assert_eq!(c.missions.timeout_ms, 300_000.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = GameConfig::from_ron("(galaxy: (seed: 7), economy: (trade_tax: 0.1))").unwrap();
        assert_eq!(c.galaxy.seed, 7);
        assert_eq!(c.galaxy.system_count, 40);
        assert_eq!(c.economy.trade_tax, 0.1);
        assert_eq!(c.economy.start_credits, 1000);
        assert_eq!(c.combat, CombatConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let c = GameConfig::from_ron(
            "(economy: (trade_tax: 1.5), galaxy: (system_count: 0), missions: (max_missions: 0))",
        )
        .unwrap();
        assert_eq!(c.economy.trade_tax, 1.0);
        assert_eq!(c.galaxy.system_count, 2);
        assert_eq!(c.missions.max_missions, 1);
    }

    #[test]
    fn malformed_text_is_an_error() {
        assert!(matches!(GameConfig::from_ron("(galaxy: ("), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn serialised_config_parses_back() {
        let c = GameConfig::default();
        let text = c.to_ron().unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), c);
    }
}
