//! Recoverable failures of player actions.
//!
//! Every variant leaves simulation state untouched; the UI decides whether to
//! surface it.

use procgen::SystemId;
use thiserror::Error;

use crate::catalog::CommodityId;
use crate::missions::MissionId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("need {needed} credits, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("need {needed} free cargo units, have {free}")]
    InsufficientCargoSpace { needed: u32, free: u32 },
    #[error("holding {held} of {commodity:?}, wanted {wanted}")]
    InsufficientCargo {
        commodity: CommodityId,
        held: u32,
        wanted: u32,
    },
    #[error("need {needed} fuel, have {available}")]
    InsufficientFuel { needed: f32, available: f32 },
    #[error("already carrying the maximum of {max} missions")]
    MissionSlotsFull { max: usize },
    #[error("weapon slot {slot} out of range (ship has {slots})")]
    InvalidWeaponSlot { slot: usize, slots: usize },
    #[error("no such system: {0}")]
    UnknownSystem(SystemId),
    #[error("already in that system")]
    AlreadyThere,
    #[error("nothing to buy")]
    NothingToBuy,
    #[error("not docked at a station")]
    NotDocked,
    #[error("no station within docking range")]
    NoStationInRange,
    #[error("no hostiles to flee from")]
    NoHostiles,
    #[error("escape failed")]
    EscapeFailed,
    #[error("game is over")]
    GameOver,
    #[error("no such mission: {0}")]
    UnknownMission(MissionId),
}

pub type ActionResult<T> = Result<T, ActionError>;
