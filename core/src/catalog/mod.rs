pub mod aircraft_types;
pub mod airports;

pub use aircraft_types::{AircraftCategory, AircraftType, aircraft_type_catalog, find_aircraft_type};
pub use airports::{Airport, MarketSize, airport_catalog, distance, find_airport};
