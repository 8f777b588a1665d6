//! Precondition failures raised by the engine.
//!
//! Only caller contract violations end up here. Empty results (no stopover,
//! zero demand, spare capacity) are ordinary values.

use crate::models::{AircraftKind, FareClass};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid coordinate (lon {lon}, lat {lat}): {reason}")]
    InvalidCoordinate { lon: f64, lat: f64, reason: &'static str },
    #[error("unknown game mode '{0}', expected 'realism' or 'easy'")]
    UnknownGameMode(String),
    #[error("unknown fare class '{0}'")]
    UnknownFareClass(String),
    #[error("aircraft '{aircraft}' has unusable range {range_km} km")]
    InvalidRange { aircraft: String, range_km: f64 },
    #[error("aircraft '{0}' has zero capacity")]
    ZeroCapacity(String),
    #[error("reputation {0} must be within [0, 100]")]
    InvalidReputation(f64),
    #[error("fare class {class:?} is not offered on {kind:?} aircraft")]
    ClassMismatch { class: FareClass, kind: AircraftKind },
    #[error("fare class {0:?} appears more than once in the preference order")]
    DuplicateClass(FareClass),
    #[error("invalid cost settings: {0}")]
    InvalidSettings(String),
}
