//! Simulation events for audio, UI and host collaborators.
//!
//! The simulation appends to an [`EventQueue`] while it ticks; whoever is
//! listening drains it afterwards. Nothing in the core depends on an event being
//! consumed.

use procgen::{FactionId, SystemId};

use crate::catalog::{CommodityId, ShipTypeId, WeaponTypeId};
use crate::missions::MissionId;
use crate::npc::NpcId;

/// Who took damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageTarget {
    Player,
    Npc(NpcId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionFailure {
    Expired,
}

/// Everything observable that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    CreditsChanged {
        amount: i64,
        reason: &'static str,
        total: i64,
    },
    CommodityBought {
        commodity: CommodityId,
        quantity: u32,
        cost: i64,
    },
    CommoditySold {
        commodity: CommodityId,
        quantity: u32,
        revenue: i64,
    },
    Refueled {
        amount: f32,
        cost: i64,
    },
    Repaired {
        amount: f32,
        cost: i64,
    },
    ShipPurchased {
        ship: ShipTypeId,
        cost: i64,
    },
    WeaponPurchased {
        weapon: WeaponTypeId,
        slot: usize,
    },
    SystemJumped {
        from: SystemId,
        to: SystemId,
        fuel_used: f32,
    },
    Docked {
        station: String,
    },
    Undocked,
    ReputationChanged {
        faction: FactionId,
        delta: i32,
        value: i32,
        reason: &'static str,
    },
    MissionAccepted {
        id: MissionId,
    },
    MissionCompleted {
        id: MissionId,
        reward: i64,
    },
    MissionFailed {
        id: MissionId,
        reason: MissionFailure,
    },
    WeaponFired {
        weapon: WeaponTypeId,
        by_player: bool,
    },
    EntityDamaged {
        target: DamageTarget,
        damage: f32,
    },
    NpcTurnedHostile {
        npc: NpcId,
        faction: FactionId,
    },
    NpcDestroyed {
        npc: NpcId,
        faction: FactionId,
        loot: i64,
    },
    PlayerDestroyed,
    CombatFled,
    NarrativeTransition {
        from: Option<&'static str>,
        to: &'static str,
        text: &'static str,
    },
    Stranded,
    GameOver {
        victory: bool,
        score: i64,
    },
}

/// Append-only per-tick event buffer.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        log::trace!("event {:?}", event);
        self.events.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut q = EventQueue::new();
        q.push(SimEvent::Undocked);
        q.push(SimEvent::CombatFled);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![SimEvent::Undocked, SimEvent::CombatFled]);
        assert!(q.is_empty());
    }
}
