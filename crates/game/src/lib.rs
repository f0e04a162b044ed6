//! Space trader simulation core.
//!
//! A single-player run: a seeded galaxy of star systems, a drifting commodity
//! market, the player's ship and its cargo, NPC traffic with simple steering AI,
//! projectile combat, missions, and a branching story that reacts to play.
//! [`GameState`] owns a run; [`GameState::update`] advances it one fixed tick.

pub mod ai;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod effects;
pub mod errors;
pub mod events;
pub mod market;
pub mod missions;
pub mod narrative;
pub mod npc;
pub mod player;
pub mod spawner;
pub mod state;
pub mod update;
pub mod weapons;

pub use catalog::{CommodityId, ShipTypeId, WeaponTypeId};
pub use config::{ConfigError, GameConfig};
pub use errors::{ActionError, ActionResult};
pub use events::{EventQueue, SimEvent};
pub use state::{DefeatReason, FrameSnapshot, GamePhase, GameState};
pub use update::tick;
