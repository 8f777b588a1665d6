//! Game-mode rule sets.
//!
//! Every mode-dependent constant lives in [`ModeRules`]; callers never branch
//! on [`GameMode`] themselves.

use crate::error::EngineError;
use crate::models::FareClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean earth radius used by the reference airport data, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimum market percentage for an airport to serve as a stopover.
pub const STOPOVER_MIN_MARKET: u8 = 89;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Realism,
    Easy,
}

impl GameMode {
    pub fn rules(&self) -> &'static ModeRules {
        match self {
            GameMode::Realism => &REALISM,
            GameMode::Easy => &EASY,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Realism => f.write_str("realism"),
            GameMode::Easy => f.write_str("easy"),
        }
    }
}

impl FromStr for GameMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realism" => Ok(GameMode::Realism),
            "easy" => Ok(GameMode::Easy),
            _ => Err(EngineError::UnknownGameMode(s.to_string())),
        }
    }
}

/// Linear ticket price model: `markup * (slope * distance + intercept)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceCurve {
    pub slope: f64,
    pub intercept: f64,
    pub markup: f64,
}

impl PriceCurve {
    pub fn at(&self, distance_km: f64) -> f64 {
        self.markup * (self.slope * distance_km + self.intercept)
    }
}

/// Constants that differ between game modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeRules {
    /// Stopover airports must fit the aircraft's runway requirement
    pub enforce_runway: bool,
    pub speed_multiplier: f64,
    pub check_cost_multiplier: f64,
    pub fuel_multiplier: f64,
    pub co2_multiplier: f64,
    pub economy: PriceCurve,
    pub business: PriceCurve,
    pub first: PriceCurve,
    pub light: PriceCurve,
    pub heavy: PriceCurve,
}

impl ModeRules {
    pub fn price_curve(&self, class: FareClass) -> &PriceCurve {
        match class {
            FareClass::Economy => &self.economy,
            FareClass::Business => &self.business,
            FareClass::First => &self.first,
            FareClass::Light => &self.light,
            FareClass::Heavy => &self.heavy,
        }
    }
}

static REALISM: ModeRules = ModeRules {
    enforce_runway: true,
    speed_multiplier: 1.0,
    check_cost_multiplier: 1.0,
    fuel_multiplier: 1.0,
    co2_multiplier: 1.0,
    economy: PriceCurve { slope: 0.3, intercept: 150.0, markup: 1.10 },
    business: PriceCurve { slope: 0.6, intercept: 500.0, markup: 1.08 },
    first: PriceCurve { slope: 0.9, intercept: 1000.0, markup: 1.06 },
    light: PriceCurve { slope: 0.0776321822039374, intercept: 85.0567600367807, markup: 1.10 },
    heavy: PriceCurve { slope: 0.0517742799409248, intercept: 24.6369915396414, markup: 1.08 },
};

static EASY: ModeRules = ModeRules {
    enforce_runway: false,
    speed_multiplier: 1.5,
    check_cost_multiplier: 0.5,
    fuel_multiplier: 1.0,
    co2_multiplier: 1.0,
    economy: PriceCurve { slope: 0.4, intercept: 170.0, markup: 1.10 },
    business: PriceCurve { slope: 0.8, intercept: 560.0, markup: 1.08 },
    first: PriceCurve { slope: 1.2, intercept: 1200.0, markup: 1.06 },
    light: PriceCurve { slope: 0.0948283724581252, intercept: 85.2045432642377, markup: 1.10 },
    heavy: PriceCurve { slope: 0.0689663577640275, intercept: 28.2981124272893, markup: 1.08 },
};
