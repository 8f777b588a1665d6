//! Cabin and cargo-hold configuration.
//!
//! Capacity is water-filled greedily over an ordered list of fare classes.
//! Each class takes as many units as its reputation-scaled demand allows,
//! then the next class gets whatever is left.

use crate::error::{EngineError, Result};
use crate::models::{Aircraft, AircraftKind, Demand, FareClass};
use crate::pricing::TicketPrices;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which fare classes get filled first when capacity runs short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "order", rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Most expensive class first
    #[default]
    PriceDescending,
    /// Caller-chosen order; classes left out are filled afterwards, most
    /// expensive first
    Preference(Vec<FareClass>),
}

/// Units allocated to each fare class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<FareClass, u32>);

impl Configuration {
    pub fn get(&self, class: FareClass) -> u32 {
        self.0.get(&class).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FareClass, u32)> + '_ {
        self.0.iter().map(|(&c, &n)| (c, n))
    }

    pub fn total_units(&self) -> u64 {
        self.0.values().map(|&n| u64::from(n)).sum()
    }

    /// Allocated units weighted by each class's CO2 factor.
    pub fn co2_units(&self) -> f64 {
        self.iter().map(|(c, n)| f64::from(n) * c.co2_weight()).sum()
    }

    pub fn income_per_flight(&self, prices: &TicketPrices) -> f64 {
        self.iter().map(|(c, n)| f64::from(n) * prices.get(c)).sum()
    }
}

impl FromIterator<(FareClass, u32)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (FareClass, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub configuration: Configuration,
    /// Capacity left over when demand runs out first
    pub unused_capacity: u32,
}

/// Allocate the aircraft's capacity across its fare classes.
///
/// `reputation` (0-100) scales demand down before allocation. Zero demand
/// yields an all-zero configuration with the full capacity unused.
pub fn optimize(
    aircraft: &Aircraft,
    demand: &Demand,
    prices: &TicketPrices,
    reputation: f64,
    policy: &AllocationPolicy,
) -> Result<Allocation> {
    if aircraft.capacity == 0 {
        return Err(EngineError::ZeroCapacity(aircraft.name.clone()));
    }
    if !reputation.is_finite() || !(0.0..=100.0).contains(&reputation) {
        return Err(EngineError::InvalidReputation(reputation));
    }

    let order = fill_order(aircraft.kind, prices, policy)?;

    let mut remaining = aircraft.capacity;
    let mut configuration = BTreeMap::new();
    for class in order {
        let ceiling = (f64::from(demand.get(class)) * reputation / 100.0).floor() as u32;
        let take = ceiling.min(remaining);
        remaining -= take;
        configuration.insert(class, take);
    }

    Ok(Allocation {
        configuration: Configuration(configuration),
        unused_capacity: remaining,
    })
}

/// Resolve a policy into the concrete order classes are filled in.
pub fn fill_order(
    kind: AircraftKind,
    prices: &TicketPrices,
    policy: &AllocationPolicy,
) -> Result<Vec<FareClass>> {
    let offered = kind.fare_classes();
    match policy {
        AllocationPolicy::PriceDescending => Ok(by_price_descending(offered, prices)),
        AllocationPolicy::Preference(preferred) => {
            let mut order: Vec<FareClass> = Vec::with_capacity(offered.len());
            for &class in preferred {
                if !offered.contains(&class) {
                    return Err(EngineError::ClassMismatch { class, kind });
                }
                if order.contains(&class) {
                    return Err(EngineError::DuplicateClass(class));
                }
                order.push(class);
            }
            let rest: Vec<FareClass> =
                offered.iter().copied().filter(|c| !order.contains(c)).collect();
            order.extend(by_price_descending(&rest, prices));
            Ok(order)
        }
    }
}

fn by_price_descending(classes: &[FareClass], prices: &TicketPrices) -> Vec<FareClass> {
    let mut sorted = classes.to_vec();
    // Stable sort keeps cabin order for equal prices.
    sorted.sort_by(|a, b| prices.get(*b).total_cmp(&prices.get(*a)));
    sorted
}
