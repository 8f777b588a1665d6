//! End-to-end evaluation of one aircraft on one route.

use crate::configuration::{optimize, AllocationPolicy, Configuration};
use crate::error::Result;
use crate::models::{Aircraft, Airport, Demand};
use crate::pricing::TicketPrices;
use crate::profit::{
    max_flights_per_day, share_value_growth, simulate, CostSettings, ProfitBreakdown,
};
use crate::stopover::plan_route;
use serde::Serialize;

/// Everything needed to evaluate a route.
#[derive(Debug, Clone)]
pub struct RouteRequest<'a> {
    pub departure: &'a Airport,
    pub arrival: &'a Airport,
    pub aircraft: &'a Aircraft,
    /// Airports that may serve as a stopover
    pub candidates: &'a [Airport],
    /// Daily demand between the two airports
    pub demand: &'a Demand,
    pub policy: AllocationPolicy,
    /// Fixed prices; the optimal prices for the distance when `None`
    pub prices: Option<TicketPrices>,
    /// Fixed departures per day; as many as fit the activity window when `None`
    pub flights_per_day: Option<u32>,
    pub settings: CostSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub distance_km: f64,
    pub stopover: Option<Airport>,
    pub flights_per_day: u32,
    pub configuration: Configuration,
    pub unused_capacity: u32,
    pub prices: TicketPrices,
    pub profit: ProfitBreakdown,
    pub share_value_growth: f64,
}

/// Plan, configure and price a route.
///
/// Returns `Ok(None)` when the route is out of range and no stopover exists.
pub fn evaluate_route(request: &RouteRequest<'_>) -> Result<Option<RouteResult>> {
    let aircraft = request.aircraft;
    let settings = &request.settings;
    settings.validate()?;

    let plan = plan_route(
        request.departure,
        request.arrival,
        aircraft,
        request.candidates,
        settings.mode,
    )?;
    let Some(distance_km) = plan.distance_km() else {
        tracing::debug!(
            departure = request.departure.id,
            arrival = request.arrival.id,
            aircraft = aircraft.id,
            "route out of range"
        );
        return Ok(None);
    };
    let stopover = plan.stopover().map(|s| s.airport.clone());

    let prices = request
        .prices
        .clone()
        .unwrap_or_else(|| TicketPrices::optimal(aircraft.kind, distance_km, settings.mode));
    let flights_per_day = request.flights_per_day.unwrap_or_else(|| {
        max_flights_per_day(aircraft, distance_km, settings.activity_hours, settings.mode)
    });

    let demand = request.demand.per_flight(flights_per_day);
    let allocation = optimize(aircraft, &demand, &prices, settings.reputation, &request.policy)?;
    let profit = simulate(
        aircraft,
        &allocation.configuration,
        &prices,
        distance_km,
        flights_per_day,
        settings,
    )?;

    Ok(Some(RouteResult {
        distance_km,
        stopover,
        flights_per_day,
        share_value_growth: share_value_growth(profit.profit),
        configuration: allocation.configuration,
        unused_capacity: allocation.unused_capacity,
        prices,
        profit,
    }))
}
