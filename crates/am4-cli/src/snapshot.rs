//! Reference data snapshot loaded from JSON.

use am4_core::{Aircraft, Airport, Demand};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Demand between two airports, keyed by airport id.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDemand {
    pub from: u32,
    pub to: u32,
    pub demand: Demand,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub airports: Vec<Airport>,
    #[serde(default)]
    pub aircraft: Vec<Aircraft>,
    #[serde(default)]
    pub demand: Vec<RouteDemand>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot = Self::from_json(&raw)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        tracing::info!(
            airports = snapshot.airports.len(),
            aircraft = snapshot.aircraft.len(),
            routes = snapshot.demand.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Find an airport by numeric id, ICAO or IATA code.
    pub fn airport(&self, key: &str) -> Result<&Airport> {
        let key = key.trim();
        let by_id = key.parse::<u32>().ok();
        self.airports
            .iter()
            .find(|a| {
                Some(a.id) == by_id
                    || a.icao.eq_ignore_ascii_case(key)
                    || a.iata.eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| anyhow!("airport '{key}' not found"))
    }

    /// Find an aircraft by numeric id or name.
    pub fn aircraft(&self, key: &str) -> Result<&Aircraft> {
        let key = key.trim();
        let by_id = key.parse::<u32>().ok();
        self.aircraft
            .iter()
            .find(|a| Some(a.id) == by_id || a.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow!("aircraft '{key}' not found"))
    }

    /// Daily demand between two airports in either direction; empty when the
    /// pair is unknown.
    pub fn demand(&self, from: u32, to: u32) -> Demand {
        self.demand
            .iter()
            .find(|d| (d.from == from && d.to == to) || (d.from == to && d.to == from))
            .map(|d| d.demand.clone())
            .unwrap_or_default()
    }
}
