use serde::{Deserialize, Serialize};

use crate::catalog::distance;
use crate::ids::{AircraftId, RouteId};

/// Cruise speed used to derive flight time from distance (nautical miles).
const CRUISE_SPEED_KTS: f64 = 450.0;

/// A route owned by an airline, connecting two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
    pub distance_nm: f64,
    pub assigned_aircraft: Option<AircraftId>,
    pub ticket_price: f64,
    pub daily_flights: u32,
    pub active: bool,
    pub load_factor: f64,
    pub daily_profit: f64,
    pub cumulative_passengers: u64,
    pub day_opened: u64,
}

impl Route {
    pub fn new(id: RouteId, origin: &str, destination: &str, ticket_price: f64, day_opened: u64) -> Self {
        Route {
            id,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_nm: distance(origin, destination),
            assigned_aircraft: None,
            ticket_price,
            daily_flights: 1,
            active: true,
            load_factor: 0.0,
            daily_profit: 0.0,
            cumulative_passengers: 0,
            day_opened,
        }
    }

    pub fn flight_time_hours(&self) -> f64 {
        self.distance_nm / CRUISE_SPEED_KTS
    }

    pub fn days_operating(&self, current_day: u64) -> u64 {
        current_day.saturating_sub(self.day_opened)
    }

    /// Unordered city-pair key, used by the competition solver to find every
    /// route serving the same pair of airports regardless of direction.
    pub fn city_pair_key(&self) -> (String, String) {
        if self.origin <= self.destination {
            (self.origin.clone(), self.destination.clone())
        } else {
            (self.destination.clone(), self.origin.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_time_derives_from_distance() {
        let r = Route::new(RouteId(1), "JFK", "LAX", 300.0, 0);
        assert_eq!(r.distance_nm, 2145.0);
        assert!((r.flight_time_hours() - 2145.0 / 450.0).abs() < 1e-9);
    }

    #[test]
    fn city_pair_key_is_order_independent() {
        let a = Route::new(RouteId(1), "JFK", "LAX", 300.0, 0);
        let b = Route::new(RouteId(2), "LAX", "JFK", 300.0, 0);
        assert_eq!(a.city_pair_key(), b.city_pair_key());
    }

    #[test]
    fn days_operating_derives_from_day_opened() {
        let r = Route::new(RouteId(1), "JFK", "LAX", 300.0, 10);
        assert_eq!(r.days_operating(40), 30);
    }
}
