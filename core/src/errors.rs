use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::AircraftId;

/// Structured failure kinds for every fallible mutator in the crate.
///
/// Mutators never panic on caller-supplied input; they return
/// `Result<T, GameError>` instead. Lookup failures inside the simulation
/// loop itself never surface as errors (see the crate-level docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameError {
    InsufficientFunds { have: f64, need: f64 },
    AircraftAlreadyAssigned { aircraft_id: AircraftId },
    NotLeased { aircraft_id: AircraftId },
    NotOwned { aircraft_id: AircraftId },
    AircraftAssigned { aircraft_id: AircraftId },
    RouteExists { origin: String, destination: String },
    UnknownAirport { code: String },
    UnknownAircraftType { name: String },
    UnknownId,
    ImmutableAfterStart,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InsufficientFunds { have, need } => write!(
                f,
                "insufficient funds: need ${:.2}, have ${:.2}",
                need, have
            ),
            GameError::AircraftAlreadyAssigned { aircraft_id } => {
                write!(f, "aircraft {} is already assigned to another route", aircraft_id)
            }
            GameError::NotLeased { aircraft_id } => {
                write!(f, "aircraft {} is not leased", aircraft_id)
            }
            GameError::NotOwned { aircraft_id } => {
                write!(f, "aircraft {} is not owned", aircraft_id)
            }
            GameError::AircraftAssigned { aircraft_id } => {
                write!(f, "aircraft {} is currently assigned to a route", aircraft_id)
            }
            GameError::RouteExists { origin, destination } => {
                write!(f, "a route from {} to {} already exists", origin, destination)
            }
            GameError::UnknownAirport { code } => write!(f, "unknown airport code `{}`", code),
            GameError::UnknownAircraftType { name } => {
                write!(f, "unknown aircraft type `{}`", name)
            }
            GameError::UnknownId => write!(f, "unknown id"),
            GameError::ImmutableAfterStart => write!(f, "catalog data is immutable after start"),
        }
    }
}

impl std::error::Error for GameError {}
