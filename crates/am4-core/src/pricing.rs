//! Ticket prices per fare class.

use crate::models::{AircraftKind, FareClass};
use crate::rules::GameMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const VIP_MULTIPLIER: f64 = 1.7;

/// Unit ticket price for each fare class, in in-game dollars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketPrices(BTreeMap<FareClass, f64>);

impl TicketPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: FareClass, price: f64) -> Self {
        self.0.insert(class, price);
        self
    }

    pub fn get(&self, class: FareClass) -> f64 {
        self.0.get(&class).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FareClass, f64)> + '_ {
        self.0.iter().map(|(&c, &p)| (c, p))
    }

    /// The highest prices that still sell every seat at full demand.
    ///
    /// Passenger fares are whole dollars two below the curve, VIP fares are
    /// 1.7x the passenger fare, and cargo rates are cents per unit.
    pub fn optimal(kind: AircraftKind, distance_km: f64, mode: GameMode) -> Self {
        let rules = mode.rules();
        kind.fare_classes()
            .iter()
            .map(|&class| {
                let raw = rules.price_curve(class).at(distance_km).floor();
                let price = match kind {
                    AircraftKind::Passenger => raw - 2.0,
                    AircraftKind::Vip => ((raw - 2.0) * VIP_MULTIPLIER).floor(),
                    AircraftKind::Cargo => raw / 100.0,
                };
                (class, price.max(0.0))
            })
            .collect()
    }
}

impl FromIterator<(FareClass, f64)> for TicketPrices {
    fn from_iter<I: IntoIterator<Item = (FareClass, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realism_passenger_prices() {
        let prices = TicketPrices::optimal(AircraftKind::Passenger, 1000.0, GameMode::Realism);
        // 1.10 * (300 + 150) = 495, 1.08 * (600 + 500) = 1188, 1.06 * (900 + 1000) = 2014
        assert_eq!(prices.get(FareClass::Economy), 493.0);
        assert_eq!(prices.get(FareClass::Business), 1186.0);
        assert_eq!(prices.get(FareClass::First), 2012.0);
        assert_eq!(prices.get(FareClass::Light), 0.0);
    }

    #[test]
    fn easy_prices_are_higher() {
        let realism = TicketPrices::optimal(AircraftKind::Passenger, 3000.0, GameMode::Realism);
        let easy = TicketPrices::optimal(AircraftKind::Passenger, 3000.0, GameMode::Easy);
        for class in AircraftKind::Passenger.fare_classes() {
            assert!(easy.get(*class) > realism.get(*class));
        }
    }

    #[test]
    fn vip_scales_passenger_fares() {
        let pax = TicketPrices::optimal(AircraftKind::Passenger, 2000.0, GameMode::Realism);
        let vip = TicketPrices::optimal(AircraftKind::Vip, 2000.0, GameMode::Realism);
        assert_eq!(vip.get(FareClass::First), (pax.get(FareClass::First) * 1.7).floor());
    }

    #[test]
    fn cargo_prices_only_cover_cargo_classes() {
        let prices = TicketPrices::optimal(AircraftKind::Cargo, 5000.0, GameMode::Realism);
        assert_eq!(prices.iter().count(), 2);
        assert!(prices.get(FareClass::Light) > prices.get(FareClass::Heavy));
        assert_eq!(prices.get(FareClass::Economy), 0.0);
    }
}
