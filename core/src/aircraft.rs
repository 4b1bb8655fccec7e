use serde::{Deserialize, Serialize};

use crate::catalog::{AircraftType, find_aircraft_type};
use crate::ids::{AircraftId, RouteId};

/// How an aircraft was acquired; leases carry a recurring monthly payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ownership {
    Owned,
    Leased { monthly_payment: f64 },
}

/// A single aircraft in an airline's fleet.
///
/// Catalog data (`AircraftType`) is referenced by name rather than by
/// pointer so the struct stays trivially `Serialize`/`Deserialize`; use
/// [`Aircraft::spec`] to resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub registration: String,
    pub type_name: String,
    pub ownership: Ownership,
    pub assigned_route: Option<RouteId>,
    pub condition: f64,
    pub flight_hours: f64,
    pub day_acquired: u64,
}

impl Aircraft {
    pub fn new(
        id: AircraftId,
        registration: String,
        type_name: String,
        ownership: Ownership,
        day_acquired: u64,
    ) -> Self {
        Aircraft {
            id,
            registration,
            type_name,
            ownership,
            assigned_route: None,
            condition: 1.0,
            flight_hours: 0.0,
            day_acquired,
        }
    }

    /// Resolve this aircraft's catalog spec. Panics only if `type_name` was
    /// never validated against the catalog, which the crate guarantees never
    /// happens for aircraft it constructs itself.
    pub fn spec(&self) -> &'static AircraftType {
        find_aircraft_type(&self.type_name)
            .expect("Aircraft.type_name is always validated against the catalog at creation")
    }

    /// Available iff unassigned and condition is above the minimum threshold.
    pub fn is_available(&self) -> bool {
        self.assigned_route.is_none() && self.condition > 0.3
    }

    pub fn is_leased(&self) -> bool {
        matches!(self.ownership, Ownership::Leased { .. })
    }

    pub fn monthly_lease_payment(&self) -> f64 {
        match self.ownership {
            Ownership::Leased { monthly_payment } => monthly_payment,
            Ownership::Owned => 0.0,
        }
    }

    /// Add flight hours from a day's operation and degrade condition
    /// accordingly (floored at 0).
    pub fn add_flight_hours(&mut self, hours: f64) {
        self.flight_hours += hours;
        self.condition = (self.condition - hours / 10_000.0).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Aircraft {
        Aircraft::new(
            AircraftId(1),
            "N00001".into(),
            "Boeing 737-800".into(),
            Ownership::Owned,
            0,
        )
    }

    #[test]
    fn new_aircraft_starts_full_condition_and_available() {
        let a = sample();
        assert_eq!(a.condition, 1.0);
        assert!(a.is_available());
    }

    #[test]
    fn assigned_aircraft_is_unavailable() {
        let mut a = sample();
        a.assigned_route = Some(RouteId(7));
        assert!(!a.is_available());
    }

    #[test]
    fn condition_degrades_and_floors_at_zero() {
        let mut a = sample();
        a.add_flight_hours(5_000.0);
        assert_eq!(a.condition, 0.5);
        assert!(a.is_available());
        a.add_flight_hours(10_000.0);
        assert_eq!(a.condition, 0.0);
        assert!(!a.is_available());
    }
}
