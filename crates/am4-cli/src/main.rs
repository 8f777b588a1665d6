//! AM4 - route, fleet and distance reports from a reference data snapshot.
//!
//! Usage:
//!   am4 --snapshot data.json route EFHK KJFK "A330-200" --order F,J,Y
//!   am4 --snapshot data.json fleet fleet.json
//!   am4 --snapshot data.json distance EFHK BIKF KJFK

use am4_cli::{Config, Snapshot};
use am4_core::{
    distance_multi, evaluate_route, simulate_fleet, AllocationPolicy, FareClass, FleetEntry,
    GameMode, Modifications, RouteRequest, TrainingBonuses,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON snapshot with airports, aircraft and demand
    #[arg(long)]
    snapshot: PathBuf,

    /// Game mode, overrides AM4_MODE
    #[arg(long, global = true)]
    mode: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan, configure and price one aircraft on one route
    Route {
        from: String,
        to: String,
        aircraft: String,
        /// Fill order such as "F,J,Y"; most expensive class first when omitted
        #[arg(long)]
        order: Option<String>,
        /// Departures per day; as many as fit the activity window when omitted
        #[arg(long)]
        flights: Option<u32>,
        #[arg(long)]
        speed_mod: bool,
        #[arg(long)]
        fuel_mod: bool,
        #[arg(long)]
        co2_mod: bool,
        /// Fuel training percent (0-3)
        #[arg(long, default_value_t = 0)]
        fuel_training: u8,
        /// CO2 training percent (0-5)
        #[arg(long, default_value_t = 0)]
        co2_training: u8,
    },
    /// Total profit of a fleet described in a JSON file
    Fleet { fleet: PathBuf },
    /// Great-circle distance along a chain of airports
    Distance {
        #[arg(num_args = 2.., required = true)]
        airports: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("am4=info".parse()?)
                .add_directive("am4_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(mode) = &args.mode {
        config.settings.mode = mode.parse::<GameMode>()?;
    }
    let snapshot = Snapshot::load(&args.snapshot)?;

    match args.command {
        Command::Route {
            from,
            to,
            aircraft,
            order,
            flights,
            speed_mod,
            fuel_mod,
            co2_mod,
            fuel_training,
            co2_training,
        } => {
            let departure = snapshot.airport(&from)?;
            let arrival = snapshot.airport(&to)?;
            let aircraft = snapshot
                .aircraft(&aircraft)?
                .with_modifications(Modifications {
                    speed: speed_mod,
                    fuel: fuel_mod,
                    co2: co2_mod,
                })
                .with_training(TrainingBonuses {
                    fuel: fuel_training,
                    co2: co2_training,
                })?;
            let demand = snapshot.demand(departure.id, arrival.id);

            let request = RouteRequest {
                departure,
                arrival,
                aircraft: &aircraft,
                candidates: &snapshot.airports,
                demand: &demand,
                policy: parse_policy(order.as_deref())?,
                prices: None,
                flights_per_day: flights,
                settings: config.settings,
            };
            match evaluate_route(&request)? {
                Some(result) => print_json(&result)?,
                None => {
                    tracing::warn!(from = %from, to = %to, "route is out of range with no stopover");
                    print_json(&serde_json::json!({ "reachable": false }))?;
                }
            }
        }
        Command::Fleet { fleet } => {
            let raw = fs::read_to_string(&fleet)
                .with_context(|| format!("reading fleet {}", fleet.display()))?;
            let entries: Vec<FleetEntry> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing fleet {}", fleet.display()))?;
            let summary = simulate_fleet(&entries, &config.settings)?;
            print_json(&summary)?;
        }
        Command::Distance { airports } => {
            let points = airports
                .iter()
                .map(|key| snapshot.airport(key).map(|a| a.location))
                .collect::<Result<Vec<_>>>()?;
            print_json(&distance_multi(&points))?;
        }
    }

    Ok(())
}

fn parse_policy(order: Option<&str>) -> Result<AllocationPolicy> {
    let Some(order) = order else {
        return Ok(AllocationPolicy::PriceDescending);
    };
    let classes = order
        .split(|c: char| c == ',' || c == '>')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<FareClass>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("invalid fare class order '{order}'"))?;
    Ok(AllocationPolicy::Preference(classes))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
