//! Core data models for the flight-economics engine.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A validated (longitude, latitude) pair in decimal degrees.
///
/// Fields are private so every instance has passed [`Coordinate::new`],
/// including ones produced by deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let invalid = |reason| EngineError::InvalidCoordinate { lon, lat, reason };
        if !lon.is_finite() || !lat.is_finite() {
            return Err(invalid("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude outside [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude outside [-180, 180]"));
        }
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = EngineError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.lon, raw.lat)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self { lon: c.lon, lat: c.lat }
    }
}

/// Airport reference record. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: u32,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub icao: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    pub location: Coordinate,
    pub runway_ft: u32,
    /// Demand multiplier, 0-100
    pub market: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftKind {
    #[default]
    Passenger,
    Cargo,
    Vip,
}

impl AircraftKind {
    /// Fare classes sold on this kind of aircraft, in cabin order.
    pub fn fare_classes(&self) -> &'static [FareClass] {
        match self {
            AircraftKind::Passenger | AircraftKind::Vip => {
                &[FareClass::Economy, FareClass::Business, FareClass::First]
            }
            AircraftKind::Cargo => &[FareClass::Light, FareClass::Heavy],
        }
    }
}

/// Fare classes for passenger (Y/J/F) and cargo (L/H) aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FareClass {
    Economy,
    Business,
    First,
    Light,
    Heavy,
}

impl FareClass {
    pub fn code(&self) -> char {
        match self {
            FareClass::Economy => 'Y',
            FareClass::Business => 'J',
            FareClass::First => 'F',
            FareClass::Light => 'L',
            FareClass::Heavy => 'H',
        }
    }

    /// Multiplier applied to per-unit CO2 emission for one allocated unit.
    pub fn co2_weight(&self) -> f64 {
        match self {
            FareClass::Economy | FareClass::Light | FareClass::Heavy => 1.0,
            FareClass::Business => 2.0,
            FareClass::First => 3.0,
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FareClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "economy" => Ok(FareClass::Economy),
            "j" | "business" => Ok(FareClass::Business),
            "f" | "first" => Ok(FareClass::First),
            "l" | "light" => Ok(FareClass::Light),
            "h" | "heavy" => Ok(FareClass::Heavy),
            _ => Err(EngineError::UnknownFareClass(s.to_string())),
        }
    }
}

/// Headcount needed to operate one aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staffing {
    #[serde(default)]
    pub pilots: u32,
    #[serde(default)]
    pub crew: u32,
    #[serde(default)]
    pub engineers: u32,
    #[serde(default)]
    pub technicians: u32,
}

/// Aircraft model as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub kind: AircraftKind,
    pub speed_kph: f64,
    /// Seats or cargo units
    pub capacity: u32,
    pub range_km: f64,
    pub runway_ft: u32,
    /// Fuel burn in lbs per km
    pub fuel: f64,
    /// CO2 in kg per weighted unit per km
    pub co2: f64,
    /// A-check price
    pub check_cost: f64,
    /// A-check interval in flight hours
    pub check_interval_h: f64,
    #[serde(default)]
    pub staff: Staffing,
    /// None when the aircraft is bought with non-monetary currency
    #[serde(default)]
    pub price: Option<f64>,
}

/// Purchasable aircraft modifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifications {
    #[serde(default)]
    pub speed: bool,
    #[serde(default)]
    pub fuel: bool,
    #[serde(default)]
    pub co2: bool,
}

/// Percent reductions earned through staff training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingBonuses {
    /// 0-3 percent
    #[serde(default)]
    pub fuel: u8,
    /// 0-5 percent
    #[serde(default)]
    pub co2: u8,
}

const MAX_FUEL_TRAINING: u8 = 3;
const MAX_CO2_TRAINING: u8 = 5;

/// An alternative engine option for an aircraft model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineVariant {
    pub name: String,
    pub speed_kph: f64,
    pub fuel: f64,
}

impl Aircraft {
    /// Copy of this aircraft with the given modifications applied.
    pub fn with_modifications(&self, mods: Modifications) -> Self {
        let mut out = self.clone();
        if mods.speed {
            out.speed_kph *= 1.1;
        }
        if mods.fuel {
            out.fuel *= 0.9;
        }
        if mods.co2 {
            out.co2 *= 0.9;
        }
        out
    }

    /// Copy of this aircraft with training reductions applied.
    pub fn with_training(&self, training: TrainingBonuses) -> Result<Self> {
        if training.fuel > MAX_FUEL_TRAINING {
            return Err(EngineError::InvalidSettings(format!(
                "fuel training {}% exceeds {MAX_FUEL_TRAINING}%",
                training.fuel
            )));
        }
        if training.co2 > MAX_CO2_TRAINING {
            return Err(EngineError::InvalidSettings(format!(
                "co2 training {}% exceeds {MAX_CO2_TRAINING}%",
                training.co2
            )));
        }
        let mut out = self.clone();
        out.fuel *= 1.0 - f64::from(training.fuel) / 100.0;
        out.co2 *= 1.0 - f64::from(training.co2) / 100.0;
        Ok(out)
    }

    /// Copy of this aircraft fitted with another engine.
    pub fn with_engine(&self, engine: &EngineVariant) -> Self {
        Self {
            speed_kph: engine.speed_kph,
            fuel: engine.fuel,
            ..self.clone()
        }
    }
}

/// Per-class expected passenger or cargo counts for one route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demand(BTreeMap<FareClass, u32>);

impl Demand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: FareClass, count: u32) -> Self {
        self.0.insert(class, count);
        self
    }

    pub fn get(&self, class: FareClass) -> u32 {
        self.0.get(&class).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&v| u64::from(v)).sum()
    }

    /// Split a daily demand evenly over `flights` departures.
    ///
    /// No departures carry no demand.
    pub fn per_flight(&self, flights: u32) -> Self {
        if flights == 0 {
            return Self::new();
        }
        Self(self.0.iter().map(|(&c, &v)| (c, v / flights)).collect())
    }
}

impl FromIterator<(FareClass, u32)> for Demand {
    fn from_iter<I: IntoIterator<Item = (FareClass, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
