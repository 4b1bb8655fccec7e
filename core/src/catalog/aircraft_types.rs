use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftCategory {
    Regional,
    NarrowBody,
    WideBody,
    Jumbo,
}

/// A compiled-in, immutable aircraft model record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftType {
    pub name: &'static str,
    pub category: AircraftCategory,
    pub capacity: u32,
    pub range_miles: f64,
    pub purchase_price: f64,
    pub operating_cost_per_hour: f64,
    pub fuel_gal_per_hour: f64,
}

impl AircraftType {
    /// Monthly lease payment: 1.2% of purchase price.
    pub fn monthly_lease(&self) -> f64 {
        self.purchase_price * 0.012
    }

    /// Sale value when sold outright: 70% of purchase price.
    pub fn sale_value(&self) -> f64 {
        self.purchase_price * 0.70
    }

    /// Early-termination penalty when a lease is returned: 2x monthly lease.
    pub fn lease_termination_penalty(&self) -> f64 {
        self.monthly_lease() * 2.0
    }
}

const AIRCRAFT_TYPES: &[AircraftType] = &[
    AircraftType {
        name: "Embraer E175",
        category: AircraftCategory::Regional,
        capacity: 76,
        range_miles: 2200.0,
        purchase_price: 30_000_000.0,
        operating_cost_per_hour: 2_500.0,
        fuel_gal_per_hour: 450.0,
    },
    AircraftType {
        name: "Boeing 737-800",
        category: AircraftCategory::NarrowBody,
        capacity: 162,
        range_miles: 3000.0,
        purchase_price: 90_000_000.0,
        operating_cost_per_hour: 4_500.0,
        fuel_gal_per_hour: 850.0,
    },
    AircraftType {
        name: "Airbus A320",
        category: AircraftCategory::NarrowBody,
        capacity: 150,
        range_miles: 3300.0,
        purchase_price: 85_000_000.0,
        operating_cost_per_hour: 4_200.0,
        fuel_gal_per_hour: 820.0,
    },
    AircraftType {
        name: "Boeing 787-9",
        category: AircraftCategory::WideBody,
        capacity: 280,
        range_miles: 7635.0,
        purchase_price: 250_000_000.0,
        operating_cost_per_hour: 8_500.0,
        fuel_gal_per_hour: 1_650.0,
    },
    AircraftType {
        name: "Airbus A380",
        category: AircraftCategory::Jumbo,
        capacity: 525,
        range_miles: 8000.0,
        purchase_price: 445_000_000.0,
        operating_cost_per_hour: 15_000.0,
        fuel_gal_per_hour: 3_100.0,
    },
];

/// Name of the default reference model the AI fleet-expansion step uses to
/// threshold affordability.
pub const DEFAULT_FLEET_MODEL: &str = "Boeing 737-800";

pub fn aircraft_type_catalog() -> &'static [AircraftType] {
    AIRCRAFT_TYPES
}

pub fn find_aircraft_type(name: &str) -> Option<&'static AircraftType> {
    AIRCRAFT_TYPES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_models() {
        assert_eq!(aircraft_type_catalog().len(), 5);
    }

    #[test]
    fn lease_and_sale_math() {
        let a320 = find_aircraft_type("Airbus A320").unwrap();
        assert_eq!(a320.monthly_lease(), 85_000_000.0 * 0.012);
        assert_eq!(a320.sale_value(), 85_000_000.0 * 0.70);
        assert_eq!(a320.lease_termination_penalty(), 85_000_000.0 * 0.012 * 2.0);
    }

    #[test]
    fn default_fleet_model_resolves() {
        assert!(find_aircraft_type(DEFAULT_FLEET_MODEL).is_some());
    }
}
