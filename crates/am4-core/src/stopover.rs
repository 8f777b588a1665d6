//! Stopover search for routes longer than an aircraft's range.
//!
//! A linear scan over the candidate airports. Candidates are first bounded to
//! the region around the route midpoint, then checked against range, market
//! and (mode permitting) runway constraints, and finally ranked by total
//! two-leg distance.

use crate::error::{EngineError, Result};
use crate::models::{Aircraft, Airport};
use crate::rules::{GameMode, STOPOVER_MIN_MARKET};
use crate::spatial::{distance, midpoint};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A feasible stopover and the legs it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stopover {
    pub airport: Airport,
    pub leg_one_km: f64,
    pub leg_two_km: f64,
    pub total_km: f64,
}

/// How a route can be flown by a given aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutePlan {
    /// Within range, no stopover needed
    Direct { distance_km: f64 },
    /// Best stopover first, ranked alternates after it
    ViaStopover { stopover: Stopover, alternates: Vec<Stopover> },
    /// Too long and no airport qualifies as a stopover
    OutOfRange { direct_km: f64 },
}

impl RoutePlan {
    /// Distance actually flown, or `None` when the route cannot be flown.
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            RoutePlan::Direct { distance_km } => Some(*distance_km),
            RoutePlan::ViaStopover { stopover, .. } => Some(stopover.total_km),
            RoutePlan::OutOfRange { .. } => None,
        }
    }

    pub fn stopover(&self) -> Option<&Stopover> {
        match self {
            RoutePlan::ViaStopover { stopover, .. } => Some(stopover),
            _ => None,
        }
    }
}

fn check_range(aircraft: &Aircraft) -> Result<()> {
    if !aircraft.range_km.is_finite() || aircraft.range_km <= 0.0 {
        return Err(EngineError::InvalidRange {
            aircraft: aircraft.name.clone(),
            range_km: aircraft.range_km,
        });
    }
    Ok(())
}

/// Rank every airport in `candidates` that can serve as a stopover.
///
/// Returns an empty list when the direct route is already within range or
/// when no candidate satisfies all constraints. Ties in total distance are
/// broken by ascending airport id.
pub fn find_stopovers(
    departure: &Airport,
    arrival: &Airport,
    aircraft: &Aircraft,
    candidates: &[Airport],
    mode: GameMode,
) -> Result<Vec<Stopover>> {
    check_range(aircraft)?;

    let range = aircraft.range_km;
    let direct = distance(departure.location, arrival.location);
    if direct <= range {
        tracing::trace!(direct, range, "direct route within range, no stopover needed");
        return Ok(Vec::new());
    }

    let rules = mode.rules();
    // Antipodal endpoints have no unique midpoint, so every candidate is
    // checked against the leg limits alone.
    let bound = midpoint(departure.location, arrival.location)
        .map(|mid| (mid, distance(departure.location, mid)));

    let mut found: Vec<Stopover> = candidates
        .iter()
        .filter(|c| c.id != departure.id && c.id != arrival.id)
        .filter(|c| bound.map_or(true, |(mid, r)| distance(c.location, mid) <= r))
        .filter(|c| c.market >= STOPOVER_MIN_MARKET)
        .filter(|c| !rules.enforce_runway || c.runway_ft >= aircraft.runway_ft)
        .filter_map(|c| {
            let leg_one_km = distance(departure.location, c.location);
            let leg_two_km = distance(c.location, arrival.location);
            if leg_one_km > range || leg_two_km > range {
                return None;
            }
            Some(Stopover {
                airport: c.clone(),
                leg_one_km,
                leg_two_km,
                total_km: leg_one_km + leg_two_km,
            })
        })
        .collect();

    found.sort_by(|a, b| rank(a, b));

    tracing::debug!(
        departure = departure.id,
        arrival = arrival.id,
        candidates = candidates.len(),
        feasible = found.len(),
        "stopover search complete"
    );

    Ok(found)
}

fn rank(a: &Stopover, b: &Stopover) -> Ordering {
    a.total_km
        .total_cmp(&b.total_km)
        .then_with(|| a.airport.id.cmp(&b.airport.id))
}

/// Decide whether a route is flown direct, via a stopover, or not at all.
pub fn plan_route(
    departure: &Airport,
    arrival: &Airport,
    aircraft: &Aircraft,
    candidates: &[Airport],
    mode: GameMode,
) -> Result<RoutePlan> {
    check_range(aircraft)?;

    let direct_km = distance(departure.location, arrival.location);
    if direct_km <= aircraft.range_km {
        return Ok(RoutePlan::Direct { distance_km: direct_km });
    }

    let mut ranked = find_stopovers(departure, arrival, aircraft, candidates, mode)?.into_iter();
    match ranked.next() {
        Some(stopover) => Ok(RoutePlan::ViaStopover {
            stopover,
            alternates: ranked.collect(),
        }),
        None => Ok(RoutePlan::OutOfRange { direct_km }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftKind, Coordinate, Staffing};

    fn airport(id: u32, lon: f64, lat: f64, runway_ft: u32, market: u8) -> Airport {
        Airport {
            id,
            iata: String::new(),
            icao: format!("T{id:03}"),
            name: String::new(),
            country: String::new(),
            city: String::new(),
            location: Coordinate::new(lon, lat).unwrap(),
            runway_ft,
            market,
        }
    }

    fn aircraft(range_km: f64, runway_ft: u32) -> Aircraft {
        Aircraft {
            id: 7,
            name: "test".to_string(),
            kind: AircraftKind::Passenger,
            speed_kph: 800.0,
            capacity: 150,
            range_km,
            runway_ft,
            fuel: 5.0,
            co2: 0.15,
            check_cost: 100_000.0,
            check_interval_h: 400.0,
            staff: Staffing::default(),
            price: None,
        }
    }

    #[test]
    fn zero_range_is_rejected() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 10.0, 0.0, 10_000, 90);
        let err = find_stopovers(&a, &b, &aircraft(0.0, 1000), &[], GameMode::Realism);
        assert!(matches!(err, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn equal_totals_are_ordered_by_id() {
        // Two candidates mirrored across the equator sit at identical total distance.
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 40.0, 0.0, 10_000, 90);
        let north = airport(20, 20.0, 1.0, 10_000, 90);
        let south = airport(10, 20.0, -1.0, 10_000, 90);
        let found =
            find_stopovers(&a, &b, &aircraft(3000.0, 1000), &[north, south], GameMode::Realism)
                .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].airport.id, 10);
        assert_eq!(found[1].airport.id, 20);
    }

    #[test]
    fn runway_only_enforced_in_realism() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 40.0, 0.0, 10_000, 90);
        let short = airport(3, 20.0, 0.5, 4_000, 95);
        let ac = aircraft(3000.0, 8_000);

        let realism = find_stopovers(&a, &b, &ac, &[short.clone()], GameMode::Realism).unwrap();
        assert!(realism.is_empty());

        let easy = find_stopovers(&a, &b, &ac, &[short], GameMode::Easy).unwrap();
        assert_eq!(easy.len(), 1);
    }

    #[test]
    fn small_markets_are_skipped() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 40.0, 0.0, 10_000, 90);
        let small = airport(3, 20.0, 0.5, 10_000, 88);
        let found =
            find_stopovers(&a, &b, &aircraft(3000.0, 1000), &[small], GameMode::Easy).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn endpoints_are_never_their_own_stopover() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 40.0, 0.0, 10_000, 90);
        let found = find_stopovers(
            &a,
            &b,
            &aircraft(3000.0, 1000),
            &[a.clone(), b.clone()],
            GameMode::Easy,
        )
        .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn antipodal_route_checks_every_candidate() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 180.0, 0.0, 10_000, 90);
        let candidates = [
            airport(3, 90.0, 0.0, 10_000, 90),
            airport(4, -90.0, 0.0, 10_000, 90),
            airport(5, 0.0, 90.0, 10_000, 90),
        ];
        let found =
            find_stopovers(&a, &b, &aircraft(10_100.0, 5_000), &candidates, GameMode::Realism)
                .unwrap();
        let mut ids: Vec<u32> = found.iter().map(|s| s.airport.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![3, 4, 5]);
        assert!(found.iter().all(|s| s.leg_one_km <= 10_100.0 && s.leg_two_km <= 10_100.0));
    }

    #[test]
    fn plan_route_reports_out_of_range() {
        let a = airport(1, 0.0, 0.0, 10_000, 90);
        let b = airport(2, 90.0, 0.0, 10_000, 90);
        let mid = airport(3, 45.0, 0.0, 10_000, 90);
        let plan = plan_route(&a, &b, &aircraft(3000.0, 1000), &[mid], GameMode::Realism).unwrap();
        assert!(matches!(plan, RoutePlan::OutOfRange { .. }));
        assert_eq!(plan.distance_km(), None);
    }
}
