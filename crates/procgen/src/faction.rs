//! Faction catalog. Alignment and ally/enemy links are declarative and never change at runtime.

/// Faction identifiers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactionId {
    Federation,
    Merchants,
    Pirates,
    Scientists,
    Rebels,
}

/// Broad disposition of a faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Lawful,
    Neutral,
    Hostile,
}

/// Static faction definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Faction {
    pub id: FactionId,
    pub name: &'static str,
    pub color: &'static str,
    pub alignment: Alignment,
    pub ally: Option<FactionId>,
    pub enemy: Option<FactionId>,
    /// Intended fraction of the galaxy this faction holds (informational).
    pub system_share: f32,
}

static FACTIONS: [Faction; 5] = [
    Faction {
        id: FactionId::Federation,
        name: "Terran Federation",
        color: "#4af",
        alignment: Alignment::Lawful,
        ally: Some(FactionId::Merchants),
        enemy: Some(FactionId::Pirates),
        system_share: 0.3,
    },
    Faction {
        id: FactionId::Merchants,
        name: "Merchant Guild",
        color: "#fd4",
        alignment: Alignment::Neutral,
        ally: Some(FactionId::Federation),
        enemy: Some(FactionId::Pirates),
        system_share: 0.2,
    },
    Faction {
        id: FactionId::Pirates,
        name: "Void Raiders",
        color: "#f44",
        alignment: Alignment::Hostile,
        ally: None,
        enemy: Some(FactionId::Federation),
        system_share: 0.15,
    },
    Faction {
        id: FactionId::Scientists,
        name: "Science Enclave",
        color: "#4ff",
        alignment: Alignment::Neutral,
        ally: None,
        enemy: None,
        system_share: 0.1,
    },
    Faction {
        id: FactionId::Rebels,
        name: "Free Systems",
        color: "#f84",
        alignment: Alignment::Neutral,
        ally: Some(FactionId::Pirates),
        enemy: Some(FactionId::Federation),
        system_share: 0.15,
    },
];

impl FactionId {
    pub const ALL: [FactionId; 5] = [
        FactionId::Federation,
        FactionId::Merchants,
        FactionId::Pirates,
        FactionId::Scientists,
        FactionId::Rebels,
    ];

    /// Catalog entry for this faction.
    pub fn info(self) -> &'static Faction {
        &FACTIONS[self.index()]
    }

    /// Position in catalog order.
    pub fn index(self) -> usize {
        match self {
            FactionId::Federation => 0,
            FactionId::Merchants => 1,
            FactionId::Pirates => 2,
            FactionId::Scientists => 3,
            FactionId::Rebels => 4,
        }
    }

    /// Registry key used by data files and narrative variables.
    pub fn key(self) -> &'static str {
        match self {
            FactionId::Federation => "federation",
            FactionId::Merchants => "merchants",
            FactionId::Pirates => "pirates",
            FactionId::Scientists => "scientists",
            FactionId::Rebels => "rebels",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn is_pirate(self) -> bool {
        self == FactionId::Pirates
    }
}

/// All factions in catalog order.
pub fn factions() -> &'static [Faction] {
    &FACTIONS
}
