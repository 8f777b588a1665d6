//! Route and fleet profitability.
//!
//! All money figures are daily in-game dollars unless a name says otherwise.

use crate::configuration::Configuration;
use crate::error::{EngineError, Result};
use crate::models::Aircraft;
use crate::pricing::TicketPrices;
use crate::rules::GameMode;
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: f64 = 7.0;

const OPERATION_GROWTH_SCALE: f64 = 0.0125;
const OPERATION_GROWTH_EXPONENT: f64 = 1.065;
const PURCHASE_GROWTH_SCALE: f64 = 0.0001;
const PURCHASE_GROWTH_EXPONENT: f64 = 1.03;
const PURCHASE_GROWTH_SATURATION: f64 = 100_000_000.0;

/// Daily salary per head for each staff role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRates {
    pub pilot: f64,
    pub crew: f64,
    pub engineer: f64,
    pub technician: f64,
}

impl Default for SalaryRates {
    fn default() -> Self {
        Self {
            pilot: 200.0,
            crew: 150.0,
            engineer: 250.0,
            technician: 225.0,
        }
    }
}

/// User-tunable cost inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    /// Price per 1000 lbs of fuel
    pub fuel_price: f64,
    /// Price per 1000 kg of CO2 quota
    pub co2_price: f64,
    #[serde(default)]
    pub salaries: SalaryRates,
    /// Hours per day the airline operates
    pub activity_hours: f64,
    /// 0-100
    pub reputation: f64,
    #[serde(default)]
    pub mode: GameMode,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            fuel_price: 700.0,
            co2_price: 120.0,
            salaries: SalaryRates::default(),
            activity_hours: 18.0,
            reputation: 100.0,
            mode: GameMode::Realism,
        }
    }
}

impl CostSettings {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("fuel_price", self.fuel_price),
            ("co2_price", self.co2_price),
            ("salaries.pilot", self.salaries.pilot),
            ("salaries.crew", self.salaries.crew),
            ("salaries.engineer", self.salaries.engineer),
            ("salaries.technician", self.salaries.technician),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidSettings(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.activity_hours.is_finite()
            || self.activity_hours <= 0.0
            || self.activity_hours > 24.0
        {
            return Err(EngineError::InvalidSettings(format!(
                "activity_hours must be within (0, 24], got {}",
                self.activity_hours
            )));
        }
        if !self.reputation.is_finite() || !(0.0..=100.0).contains(&self.reputation) {
            return Err(EngineError::InvalidReputation(self.reputation));
        }
        Ok(())
    }
}

/// Daily income, cost items and resulting profit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub income: f64,
    pub fuel: f64,
    pub co2: f64,
    pub staff: f64,
    pub maintenance: f64,
    pub expenses: f64,
    pub profit: f64,
    pub hourly_profit: f64,
    pub weekly_profit: f64,
}

impl ProfitBreakdown {
    fn from_parts(
        income: f64,
        fuel: f64,
        co2: f64,
        staff: f64,
        maintenance: f64,
        activity_hours: f64,
    ) -> Self {
        let expenses = fuel + co2 + staff + maintenance;
        let profit = income - expenses;
        Self {
            income,
            fuel,
            co2,
            staff,
            maintenance,
            expenses,
            profit,
            hourly_profit: profit / activity_hours,
            weekly_profit: profit * DAYS_PER_WEEK,
        }
    }
}

fn check_aircraft(aircraft: &Aircraft) -> Result<()> {
    if !aircraft.speed_kph.is_finite() || aircraft.speed_kph <= 0.0 {
        return Err(EngineError::InvalidSettings(format!(
            "aircraft '{}' has non-positive speed {}",
            aircraft.name, aircraft.speed_kph
        )));
    }
    if !aircraft.check_interval_h.is_finite() || aircraft.check_interval_h <= 0.0 {
        return Err(EngineError::InvalidSettings(format!(
            "aircraft '{}' has non-positive A-check interval {}",
            aircraft.name, aircraft.check_interval_h
        )));
    }
    Ok(())
}

/// Block time of one flight in hours, including the mode's speed boost.
pub fn flight_time_hours(aircraft: &Aircraft, distance_km: f64, mode: GameMode) -> f64 {
    distance_km / (aircraft.speed_kph * mode.rules().speed_multiplier)
}

/// How many departures fit into the daily activity window.
///
/// A flight longer than the window still departs once a day; only a
/// zero-length route yields 0.
pub fn max_flights_per_day(
    aircraft: &Aircraft,
    distance_km: f64,
    activity_hours: f64,
    mode: GameMode,
) -> u32 {
    let hours = flight_time_hours(aircraft, distance_km, mode);
    if !hours.is_finite() || hours <= 0.0 {
        return 0;
    }
    ((activity_hours / hours).floor() as u32).max(1)
}

/// Daily profit of one aircraft flying one route.
///
/// A loss is a valid outcome, not an error.
pub fn simulate(
    aircraft: &Aircraft,
    configuration: &Configuration,
    prices: &TicketPrices,
    distance_km: f64,
    flights_per_day: u32,
    settings: &CostSettings,
) -> Result<ProfitBreakdown> {
    settings.validate()?;
    check_aircraft(aircraft)?;
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(EngineError::InvalidSettings(format!(
            "distance must be a non-negative number, got {distance_km}"
        )));
    }

    let rules = settings.mode.rules();
    let flights = f64::from(flights_per_day);

    let income = configuration.income_per_flight(prices) * flights;

    let fuel_lbs = aircraft.fuel * distance_km * rules.fuel_multiplier;
    let fuel = fuel_lbs * settings.fuel_price / 1000.0 * flights;

    let co2_kg = aircraft.co2 * distance_km * configuration.co2_units() * rules.co2_multiplier;
    let co2 = co2_kg * settings.co2_price / 1000.0 * flights;

    let staff = staff_cost(aircraft, settings);

    let flight_hours = flight_time_hours(aircraft, distance_km, settings.mode) * flights;
    let maintenance = aircraft.check_cost * rules.check_cost_multiplier * flight_hours
        / aircraft.check_interval_h;

    Ok(ProfitBreakdown::from_parts(
        income,
        fuel,
        co2,
        staff,
        maintenance,
        settings.activity_hours,
    ))
}

fn staff_cost(aircraft: &Aircraft, settings: &CostSettings) -> f64 {
    let s = &aircraft.staff;
    let r = &settings.salaries;
    f64::from(s.pilots) * r.pilot
        + f64::from(s.crew) * r.crew
        + f64::from(s.engineers) * r.engineer
        + f64::from(s.technicians) * r.technician
}

/// Share-value growth per day from operating at `daily_profit`.
///
/// Losses shrink the share value symmetrically.
pub fn share_value_growth(daily_profit: f64) -> f64 {
    let scaled = (daily_profit.abs() / 1_000_000.0).powf(OPERATION_GROWTH_EXPONENT);
    daily_profit.signum() * OPERATION_GROWTH_SCALE * scaled
}

/// One-time share-value growth from buying an aircraft at `price`.
///
/// Aircraft bought with non-monetary currency (`None`) add nothing.
pub fn purchase_share_value_growth(price: Option<f64>) -> f64 {
    let Some(price) = price.filter(|p| p.is_finite() && *p > 0.0) else {
        return 0.0;
    };
    let millions = price / 1_000_000.0;
    PURCHASE_GROWTH_SCALE * millions.powf(PURCHASE_GROWTH_EXPONENT)
        * (1.0 + price / PURCHASE_GROWTH_SATURATION).ln()
        + PURCHASE_GROWTH_SCALE * millions
}

/// One aircraft type in a fleet, with how many of it are owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEntry {
    pub aircraft: Aircraft,
    pub configuration: Configuration,
    pub prices: TicketPrices,
    pub distance_km: f64,
    pub flights_per_day: u32,
    pub amount: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub aircraft_count: u64,
    pub totals: ProfitBreakdown,
    pub share_value_growth: f64,
    /// Growth that buying the whole fleet at list price would have produced
    pub purchase_share_value_growth: f64,
}

/// Amount-weighted sum of per-aircraft profit over a fleet.
pub fn simulate_fleet(entries: &[FleetEntry], settings: &CostSettings) -> Result<FleetSummary> {
    settings.validate()?;

    let mut aircraft_count = 0u64;
    let (mut income, mut fuel, mut co2, mut staff, mut maintenance) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let mut purchase = 0.0;

    for entry in entries {
        let unit = simulate(
            &entry.aircraft,
            &entry.configuration,
            &entry.prices,
            entry.distance_km,
            entry.flights_per_day,
            settings,
        )?;
        let amount = f64::from(entry.amount);
        aircraft_count += u64::from(entry.amount);
        income += unit.income * amount;
        fuel += unit.fuel * amount;
        co2 += unit.co2 * amount;
        staff += unit.staff * amount;
        maintenance += unit.maintenance * amount;
        purchase += purchase_share_value_growth(entry.aircraft.price) * amount;
    }

    let totals =
        ProfitBreakdown::from_parts(income, fuel, co2, staff, maintenance, settings.activity_hours);
    tracing::debug!(
        types = entries.len(),
        aircraft_count,
        profit = totals.profit,
        "fleet simulated"
    );

    Ok(FleetSummary {
        aircraft_count,
        share_value_growth: share_value_growth(totals.profit),
        purchase_share_value_growth: purchase,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftKind, FareClass, Staffing};

    fn a321() -> Aircraft {
        Aircraft {
            id: 3,
            name: "A321-200".to_string(),
            kind: AircraftKind::Passenger,
            speed_kph: 840.0,
            capacity: 220,
            range_km: 5_900.0,
            runway_ft: 7_000,
            fuel: 6.2,
            co2: 0.16,
            check_cost: 300_000.0,
            check_interval_h: 500.0,
            staff: Staffing { pilots: 2, crew: 8, engineers: 2, technicians: 4 },
            price: Some(114_000_000.0),
        }
    }

    fn config() -> Configuration {
        [(FareClass::Economy, 180), (FareClass::Business, 30), (FareClass::First, 10)]
            .into_iter()
            .collect()
    }

    fn prices() -> TicketPrices {
        TicketPrices::new()
            .with(FareClass::Economy, 900.0)
            .with(FareClass::Business, 2500.0)
            .with(FareClass::First, 4200.0)
    }

    #[test]
    fn breakdown_adds_up() {
        let settings = CostSettings::default();
        let b = simulate(&a321(), &config(), &prices(), 2500.0, 3, &settings).unwrap();
        assert_eq!(b.income, (180.0 * 900.0 + 30.0 * 2500.0 + 10.0 * 4200.0) * 3.0);
        assert!((b.expenses - (b.fuel + b.co2 + b.staff + b.maintenance)).abs() < 1e-6);
        assert!((b.profit - (b.income - b.expenses)).abs() < 1e-6);
        assert!((b.weekly_profit - b.profit * 7.0).abs() < 1e-6);
        assert!((b.hourly_profit - b.profit / 18.0).abs() < 1e-6);
        assert_eq!(b.staff, 2.0 * 200.0 + 8.0 * 150.0 + 2.0 * 250.0 + 4.0 * 225.0);
    }

    #[test]
    fn higher_fuel_price_lowers_profit() {
        let mut settings = CostSettings::default();
        let cheap = simulate(&a321(), &config(), &prices(), 2500.0, 3, &settings).unwrap();
        settings.fuel_price = 1500.0;
        let pricey = simulate(&a321(), &config(), &prices(), 2500.0, 3, &settings).unwrap();
        assert!(pricey.profit < cheap.profit);
    }

    #[test]
    fn higher_ticket_price_raises_income() {
        let settings = CostSettings::default();
        let base = simulate(&a321(), &config(), &prices(), 2500.0, 3, &settings).unwrap();
        let raised = prices().with(FareClass::Business, 2600.0);
        let more = simulate(&a321(), &config(), &raised, 2500.0, 3, &settings).unwrap();
        assert!(more.income > base.income);
        assert_eq!(more.expenses, base.expenses);
    }

    #[test]
    fn easy_mode_halves_check_cost_per_flight_hour() {
        let realism = CostSettings::default();
        let easy = CostSettings { mode: GameMode::Easy, ..CostSettings::default() };
        let r = simulate(&a321(), &config(), &prices(), 3000.0, 2, &realism).unwrap();
        let e = simulate(&a321(), &config(), &prices(), 3000.0, 2, &easy).unwrap();
        // Half the price, two thirds of the flight hours.
        assert!((e.maintenance - r.maintenance * 0.5 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn flights_per_day_fit_activity_window() {
        let ac = a321();
        assert_eq!(max_flights_per_day(&ac, 840.0, 18.0, GameMode::Realism), 18);
        assert_eq!(max_flights_per_day(&ac, 840.0, 18.0, GameMode::Easy), 27);
        assert_eq!(max_flights_per_day(&ac, 0.0, 18.0, GameMode::Realism), 0);
    }

    #[test]
    fn flight_longer_than_window_still_departs_once() {
        let ac = a321();
        // 20 h at 840 kph against an 18 h window
        assert_eq!(max_flights_per_day(&ac, 16_800.0, 18.0, GameMode::Realism), 1);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let bad_hours = CostSettings { activity_hours: 0.0, ..CostSettings::default() };
        assert!(matches!(
            simulate(&a321(), &config(), &prices(), 100.0, 1, &bad_hours),
            Err(EngineError::InvalidSettings(_))
        ));
        let bad_fuel = CostSettings { fuel_price: f64::NAN, ..CostSettings::default() };
        assert!(bad_fuel.validate().is_err());
    }

    #[test]
    fn share_value_growth_is_monotone_and_signed() {
        let profits = [-5.0e6, -1.0e5, 0.0, 1.0e5, 1.0e6, 5.0e6, 2.0e7];
        let growth: Vec<f64> = profits.iter().map(|&p| share_value_growth(p)).collect();
        assert!(growth.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(share_value_growth(0.0), 0.0);
        assert!((share_value_growth(1.0e6) - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn purchase_growth_is_monotone_and_ignores_unpriced() {
        assert_eq!(purchase_share_value_growth(None), 0.0);
        let growth: Vec<f64> = [1.0e6, 1.0e7, 1.0e8, 4.0e8]
            .iter()
            .map(|&p| purchase_share_value_growth(Some(p)))
            .collect();
        assert!(growth.windows(2).all(|w| w[0] < w[1]));
    }
}
