pub mod ai;
pub mod aircraft;
pub mod airline;
pub mod catalog;
pub mod competition;
pub mod errors;
pub mod events;
pub mod fuel;
pub mod ids;
pub mod rng;
pub mod route;
pub mod save;
pub mod simulator;
pub mod world;

pub use ai::{AIPersonality, CompetitorAirline, PersonalityKind};
pub use aircraft::{Aircraft, Ownership};
pub use airline::Airline;
pub use errors::GameError;
pub use events::{EventKind, GameEvent, Severity};
pub use fuel::FuelMarket;
pub use ids::{AircraftId, AirlineId, EventId, RouteId};
pub use route::Route;
pub use save::{SaveCodec, SaveMeta};
pub use world::{DailyReport, World, advance_day, new_world};
