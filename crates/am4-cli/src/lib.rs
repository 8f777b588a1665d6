//! AM4 CLI - command line driver for the flight-economics engine.
//!
//! Loads a JSON snapshot of airports, aircraft and demand, reads cost
//! settings from the environment and prints engine results as JSON.

pub mod config;
pub mod snapshot;

pub use config::Config;
pub use snapshot::{RouteDemand, Snapshot};
