//! Cost settings from environment.

use am4_core::{CostSettings, GameMode, SalaryRates};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: CostSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to the defaults for
    /// unset keys. Set but unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CostSettings::default();
        let salaries = SalaryRates::default();
        let settings = CostSettings {
            fuel_price: parse_or(&lookup, "AM4_FUEL_PRICE", defaults.fuel_price)?,
            co2_price: parse_or(&lookup, "AM4_CO2_PRICE", defaults.co2_price)?,
            salaries: SalaryRates {
                pilot: parse_or(&lookup, "AM4_SALARY_PILOT", salaries.pilot)?,
                crew: parse_or(&lookup, "AM4_SALARY_CREW", salaries.crew)?,
                engineer: parse_or(&lookup, "AM4_SALARY_ENGINEER", salaries.engineer)?,
                technician: parse_or(&lookup, "AM4_SALARY_TECHNICIAN", salaries.technician)?,
            },
            activity_hours: parse_or(&lookup, "AM4_ACTIVITY_HOURS", defaults.activity_hours)?,
            reputation: parse_or(&lookup, "AM4_REPUTATION", defaults.reputation)?,
            mode: parse_or(&lookup, "AM4_MODE", GameMode::Realism)?,
        };
        settings.validate()?;
        Ok(Self { settings })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has invalid value '{raw}'")),
        None => Ok(default),
    }
}
