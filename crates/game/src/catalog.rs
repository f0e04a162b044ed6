//! Static catalogs: commodities, ship hulls, and weapons.
//!
//! Everything here is immutable data keyed by small enums. String keys from data
//! files resolve through `from_key`, which returns `None` for anything unknown so
//! callers can treat bad ids as a no-op.

use procgen::EconomyType;

// ── Commodities ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommodityId {
    Food,
    Minerals,
    Machinery,
    Electronics,
    Weapons,
    Luxuries,
    Narcotics,
    Medicine,
}

/// Trade good definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Commodity {
    pub id: CommodityId,
    pub name: &'static str,
    pub base_price: f64,
    pub unit: &'static str,
    pub illegal: bool,
    /// Price multiplier per economy, in [`EconomyType::ALL`] order.
    /// Below 1 the system produces it, above 1 it is in demand.
    economy_mod: [f64; 6],
}

impl Commodity {
    pub fn economy_modifier(&self, economy: EconomyType) -> f64 {
        self.economy_mod[economy.index()]
    }
}

static COMMODITIES: [Commodity; 8] = [
    Commodity {
        id: CommodityId::Food,
        name: "Food",
        base_price: 20.0,
        unit: "t",
        illegal: false,
        economy_mod: [0.5, 1.2, 1.5, 1.1, 1.3, 0.9],
    },
    Commodity {
        id: CommodityId::Minerals,
        name: "Minerals",
        base_price: 40.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.3, 0.8, 0.4, 1.6, 1.0, 0.9],
    },
    Commodity {
        id: CommodityId::Machinery,
        name: "Machinery",
        base_price: 80.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.4, 0.5, 1.3, 0.8, 1.1, 0.9],
    },
    Commodity {
        id: CommodityId::Electronics,
        name: "Electronics",
        base_price: 150.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.8, 1.2, 1.5, 0.4, 1.0, 0.7],
    },
    Commodity {
        id: CommodityId::Weapons,
        name: "Weapons",
        base_price: 200.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.6, 1.0, 1.2, 0.8, 0.5, 0.9],
    },
    Commodity {
        id: CommodityId::Luxuries,
        name: "Luxuries",
        base_price: 250.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.5, 1.4, 1.8, 1.0, 1.3, 0.6],
    },
    Commodity {
        id: CommodityId::Narcotics,
        name: "Narcotics",
        base_price: 300.0,
        unit: "t",
        illegal: true,
        economy_mod: [0.3, 1.2, 1.0, 0.8, 2.0, 1.5],
    },
    Commodity {
        id: CommodityId::Medicine,
        name: "Medicine",
        base_price: 100.0,
        unit: "t",
        illegal: false,
        economy_mod: [1.2, 1.0, 1.4, 0.5, 0.9, 0.8],
    },
];

impl CommodityId {
    pub const ALL: [CommodityId; 8] = [
        CommodityId::Food,
        CommodityId::Minerals,
        CommodityId::Machinery,
        CommodityId::Electronics,
        CommodityId::Weapons,
        CommodityId::Luxuries,
        CommodityId::Narcotics,
        CommodityId::Medicine,
    ];

    pub fn info(self) -> &'static Commodity {
        &COMMODITIES[self as usize]
    }

    pub fn key(self) -> &'static str {
        match self {
            CommodityId::Food => "food",
            CommodityId::Minerals => "minerals",
            CommodityId::Machinery => "machinery",
            CommodityId::Electronics => "electronics",
            CommodityId::Weapons => "weapons",
            CommodityId::Luxuries => "luxuries",
            CommodityId::Narcotics => "narcotics",
            CommodityId::Medicine => "medicine",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

// ── Ship hulls ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipTypeId {
    Shuttle,
    Trader,
    Fighter,
    Corvette,
    Freighter,
}

/// Base stats a ship instance is initialised from.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipType {
    pub id: ShipTypeId,
    pub name: &'static str,
    pub max_hull: f32,
    pub max_shield: f32,
    pub max_cargo: u32,
    pub max_fuel: f32,
    /// Top speed in units per tick.
    pub speed: f32,
    /// Radians per millisecond.
    pub turn_speed: f32,
    pub weapon_slots: usize,
    pub price: i64,
}

static SHIP_TYPES: [ShipType; 5] = [
    ShipType {
        id: ShipTypeId::Shuttle,
        name: "Shuttle",
        max_hull: 40.0,
        max_shield: 15.0,
        max_cargo: 10,
        max_fuel: 80.0,
        speed: 4.0,
        turn_speed: 0.003,
        weapon_slots: 1,
        price: 0,
    },
    ShipType {
        id: ShipTypeId::Trader,
        name: "Trader",
        max_hull: 70.0,
        max_shield: 25.0,
        max_cargo: 40,
        max_fuel: 150.0,
        speed: 3.0,
        turn_speed: 0.0025,
        weapon_slots: 1,
        price: 5000,
    },
    ShipType {
        id: ShipTypeId::Fighter,
        name: "Fighter",
        max_hull: 50.0,
        max_shield: 40.0,
        max_cargo: 10,
        max_fuel: 120.0,
        speed: 6.0,
        turn_speed: 0.005,
        weapon_slots: 3,
        price: 8000,
    },
    ShipType {
        id: ShipTypeId::Corvette,
        name: "Corvette",
        max_hull: 100.0,
        max_shield: 60.0,
        max_cargo: 25,
        max_fuel: 200.0,
        speed: 4.0,
        turn_speed: 0.003,
        weapon_slots: 4,
        price: 15000,
    },
    ShipType {
        id: ShipTypeId::Freighter,
        name: "Freighter",
        max_hull: 130.0,
        max_shield: 35.0,
        max_cargo: 80,
        max_fuel: 250.0,
        speed: 2.0,
        turn_speed: 0.002,
        weapon_slots: 2,
        price: 20000,
    },
];

impl ShipTypeId {
    pub const ALL: [ShipTypeId; 5] = [
        ShipTypeId::Shuttle,
        ShipTypeId::Trader,
        ShipTypeId::Fighter,
        ShipTypeId::Corvette,
        ShipTypeId::Freighter,
    ];

    pub fn info(self) -> &'static ShipType {
        &SHIP_TYPES[self as usize]
    }

    pub fn key(self) -> &'static str {
        match self {
            ShipTypeId::Shuttle => "shuttle",
            ShipTypeId::Trader => "trader",
            ShipTypeId::Fighter => "fighter",
            ShipTypeId::Corvette => "corvette",
            ShipTypeId::Freighter => "freighter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

// ── Weapons ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponTypeId {
    Laser,
    Cannon,
    Missile,
    Beam,
}

/// Weapon definition. `range` doubles as projectile life in ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponType {
    pub id: WeaponTypeId,
    pub name: &'static str,
    pub damage: f32,
    /// Milliseconds between shots for the player.
    pub cooldown: f32,
    /// Projectile speed in units per tick.
    pub speed: f32,
    pub range: u32,
    pub color: &'static str,
    pub price: i64,
}

static WEAPON_TYPES: [WeaponType; 4] = [
    WeaponType {
        id: WeaponTypeId::Laser,
        name: "Pulse Laser",
        damage: 4.0,
        cooldown: 500.0,
        speed: 5.0,
        range: 150,
        color: "#0ff",
        price: 500,
    },
    WeaponType {
        id: WeaponTypeId::Cannon,
        name: "Cannon",
        damage: 10.0,
        cooldown: 1500.0,
        speed: 4.0,
        range: 120,
        color: "#fa0",
        price: 1500,
    },
    WeaponType {
        id: WeaponTypeId::Missile,
        name: "Missile",
        damage: 20.0,
        cooldown: 3000.0,
        speed: 3.0,
        range: 220,
        color: "#f44",
        price: 3000,
    },
    WeaponType {
        id: WeaponTypeId::Beam,
        name: "Mining Beam",
        damage: 2.0,
        cooldown: 200.0,
        speed: 7.0,
        range: 100,
        color: "#4f4",
        price: 800,
    },
];

impl WeaponTypeId {
    pub const ALL: [WeaponTypeId; 4] = [
        WeaponTypeId::Laser,
        WeaponTypeId::Cannon,
        WeaponTypeId::Missile,
        WeaponTypeId::Beam,
    ];

    pub fn info(self) -> &'static WeaponType {
        &WEAPON_TYPES[self as usize]
    }

    pub fn key(self) -> &'static str {
        match self {
            WeaponTypeId::Laser => "laser",
            WeaponTypeId::Cannon => "cannon",
            WeaponTypeId::Missile => "missile",
            WeaponTypeId::Beam => "beam",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.key() == key)
    }
}
