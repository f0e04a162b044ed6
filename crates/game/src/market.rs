//! Commodity pricing and one-hop trade routes.
//!
//! Prices are a pure function of the commodity, the system's economy, danger and
//! id, and a shared market clock. The clock is bucketed so prices move in
//! perceptible steps.

use procgen::{Galaxy, StarSystem, SystemId};

use crate::catalog::CommodityId;

/// Frequency of the price wave per millisecond of stepped market time.
const FLUCTUATION_RATE: f64 = 0.001;
/// Phase offset per system id, so neighbours don't move in lockstep.
const SYSTEM_PHASE: f64 = 7.3;
/// Price premium per danger level.
const DANGER_PREMIUM: f64 = 0.05;
/// Routes returned by [`Market::find_trade_routes`].
pub const MAX_TRADE_ROUTES: usize = 8;

/// Buy and sell price of one commodity at one system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub commodity: CommodityId,
    pub buy: i64,
    pub sell: i64,
}

/// A profitable haul to a neighbouring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRoute {
    pub to: SystemId,
    pub commodity: CommodityId,
    pub buy_here: i64,
    pub sell_there: i64,
    pub profit: i64,
}

/// The shared market clock plus pricing parameters.
#[derive(Debug, Clone)]
pub struct Market {
    time_ms: f64,
    step_ms: f64,
    tax: f64,
}

impl Market {
    pub fn new(step_ms: f64, tax: f64) -> Self {
        Self {
            time_ms: 0.0,
            step_ms: step_ms.max(1.0),
            tax: tax.clamp(0.0, 1.0),
        }
    }

    /// Advance the market clock.
    pub fn update(&mut self, dt: f32) {
        self.time_ms += f64::from(dt);
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Market time truncated to the price step.
    pub fn stepped_time(&self) -> f64 {
        (self.time_ms / self.step_ms).floor() * self.step_ms
    }

    /// Price wave for a system in [0, 1].
    pub fn fluctuation(&self, system: &StarSystem) -> f64 {
        (self.stepped_time() * FLUCTUATION_RATE + system.id as f64 * SYSTEM_PHASE).sin() * 0.5 + 0.5
    }

    /// What the player pays per unit.
    pub fn buy_price(&self, commodity: CommodityId, system: &StarSystem) -> i64 {
        let info = commodity.info();
        let price = info.base_price
            * info.economy_modifier(system.economy)
            * (0.8 + self.fluctuation(system) * 0.4)
            * (1.0 + f64::from(system.danger) * DANGER_PREMIUM);
        js_round(price)
    }

    /// What the player receives per unit, after tax. Never above the buy price.
    pub fn sell_price(&self, commodity: CommodityId, system: &StarSystem) -> i64 {
        js_round(self.buy_price(commodity, system) as f64 * (1.0 - self.tax))
    }

    /// Full price board for a system.
    pub fn quotes(&self, system: &StarSystem) -> Vec<Quote> {
        CommodityId::ALL
            .into_iter()
            .map(|commodity| Quote {
                commodity,
                buy: self.buy_price(commodity, system),
                sell: self.sell_price(commodity, system),
            })
            .collect()
    }

    /// Best buy-here, sell-at-a-neighbour hauls from `origin`, most profitable first.
    pub fn find_trade_routes(&self, galaxy: &Galaxy, origin: SystemId) -> Vec<TradeRoute> {
        let Some(here) = galaxy.get(origin) else {
            return Vec::new();
        };

        let mut routes: Vec<TradeRoute> = here
            .connections
            .iter()
            .filter_map(|&id| galaxy.get(id))
            .flat_map(|there| {
                CommodityId::ALL.into_iter().map(move |commodity| {
                    let buy_here = self.buy_price(commodity, here);
                    let sell_there = self.sell_price(commodity, there);
                    TradeRoute {
                        to: there.id,
                        commodity,
                        buy_here,
                        sell_there,
                        profit: sell_there - buy_here,
                    }
                })
            })
            .filter(|r| r.profit > 0)
            .collect();

        routes.sort_by(|a, b| b.profit.cmp(&a.profit));
        routes.truncate(MAX_TRADE_ROUTES);
        routes
    }
}

/// `Math.round`: halves round up.
fn js_round(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::EconomyType;

    fn system(id: SystemId, economy: EconomyType, danger: u8) -> StarSystem {
        StarSystem {
            id,
            name: format!("S{}", id),
            position: glam::Vec2::ZERO,
            economy,
            tech_level: 5,
            population: 5,
            danger,
            faction: None,
            station_count: 1,
            connections: Vec::new(),
        }
    }

    #[test]
    fn sell_never_exceeds_buy() {
        let galaxy = Galaxy::new(42, 40);
        let mut market = Market::new(18_000.0, 0.05);
        for _ in 0..20 {
            for s in galaxy.systems() {
                for q in market.quotes(s) {
                    assert!(q.sell <= q.buy, "{:?} at {}", q, s.id);
                }
            }
            market.update(7_000.0);
        }
    }

    #[test]
    fn price_formula_at_time_zero() {
        let market = Market::new(18_000.0, 0.05);
        let s = system(0, EconomyType::Agricultural, 2);
        // fluctuation = sin(0) * 0.5 + 0.5 = 0.5, so the wave factor is 1.0
        // 20 * 0.5 * 1.0 * 1.1 = 11
        assert_eq!(market.buy_price(CommodityId::Food, &s), 11);
        assert_eq!(market.sell_price(CommodityId::Food, &s), 10);
    }

    #[test]
    fn prices_hold_within_a_step() {
        let mut market = Market::new(18_000.0, 0.05);
        let s = system(3, EconomyType::Tech, 1);
        let before = market.buy_price(CommodityId::Electronics, &s);
        market.update(17_000.0);
        assert_eq!(market.buy_price(CommodityId::Electronics, &s), before);
        assert_eq!(market.stepped_time(), 0.0);
        market.update(1_000.0);
        assert_eq!(market.stepped_time(), 18_000.0);
    }

    #[test]
    fn zero_tax_sells_at_buy_price() {
        let market = Market::new(18_000.0, 0.0);
        let s = system(5, EconomyType::Mining, 3);
        for c in CommodityId::ALL {
            assert_eq!(market.buy_price(c, &s), market.sell_price(c, &s));
        }
    }

    #[test]
    fn trade_routes_are_profitable_sorted_and_capped() {
        let galaxy = Galaxy::new(42, 40);
        let market = Market::new(18_000.0, 0.05);
        for origin in 0..galaxy.len() {
            let routes = market.find_trade_routes(&galaxy, origin);
            assert!(routes.len() <= MAX_TRADE_ROUTES);
            assert!(routes.iter().all(|r| r.profit > 0));
            assert!(routes.windows(2).all(|w| w[0].profit >= w[1].profit));
            assert!(routes.iter().all(|r| galaxy.connections(origin).contains(&r.to)));
        }
        assert!(market.find_trade_routes(&galaxy, 999).is_empty());
    }
}
