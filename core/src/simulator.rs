use crate::aircraft::Aircraft;
use crate::catalog::find_airport;
use crate::route::Route;

const CREW_COST_PER_FLIGHT_HOUR: f64 = 500.0;
const MAINTENANCE_PROXY_FACTOR: f64 = 0.15;
const LOAD_FACTOR_CEILING: f64 = 0.95;

/// One day's derived outcome for a single active, assigned route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSimResult {
    pub passengers: u64,
    pub load_factor: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub added_flight_hours: f64,
}

/// Pure function: derive one day's revenue/cost/load-factor/passengers for a
/// route with an assigned aircraft. Never mutates `route` or `aircraft`,
/// callers apply the returned values and `added_flight_hours` themselves.
///
/// `market_share` is 1.0 when the city pair has no competition.
#[allow(clippy::too_many_arguments)]
pub fn simulate_route(
    route: &Route,
    aircraft: &Aircraft,
    reputation: f64,
    fuel_price_per_gallon: f64,
    event_demand_modifier: f64,
    event_cost_modifier: f64,
    market_share: f64,
) -> RouteSimResult {
    let origin = find_airport(&route.origin);
    let destination = find_airport(&route.destination);

    let base_demand = match (origin, destination) {
        (Some(o), Some(d)) => (o.market_size.base_demand() + d.market_size.base_demand()) as f64 / 2.0,
        _ => 0.0,
    };

    let reputation_mod = 0.5 + reputation / 100.0;
    let adjusted_demand = (base_demand * reputation_mod * event_demand_modifier).round();
    let post_competition_demand = adjusted_demand * market_share;

    let spec = aircraft.spec();
    let capacity = spec.capacity as f64 * route.daily_flights as f64;

    let load_factor = if capacity > 0.0 {
        (post_competition_demand / capacity).min(LOAD_FACTOR_CEILING)
    } else {
        0.0
    };
    let passengers = (capacity * load_factor).floor();

    let revenue = passengers * route.ticket_price;

    let flight_time_hours = route.flight_time_hours();
    let flights = route.daily_flights as f64;

    // Fuel cost intentionally ignores flight-time scaling, matching the
    // source's formula (gal/hr x flights, not gal/hr x flight-hours x
    // flights). Long-haul routes are under-billed for fuel as a result.
    let fuel_cost = spec.fuel_gal_per_hour * flights * fuel_price_per_gallon;
    let crew_cost = flight_time_hours * flights * CREW_COST_PER_FLIGHT_HOUR;
    let airport_fees = origin.map(|a| a.landing_fee).unwrap_or(0.0) * flights
        + destination.map(|a| a.landing_fee).unwrap_or(0.0) * flights;
    let maintenance_proxy = spec.operating_cost_per_hour * flight_time_hours * flights * MAINTENANCE_PROXY_FACTOR;

    let cost = (fuel_cost + crew_cost + airport_fees + maintenance_proxy) * event_cost_modifier;
    let profit = revenue - cost;

    RouteSimResult {
        passengers: passengers as u64,
        load_factor,
        revenue,
        cost,
        profit,
        added_flight_hours: flight_time_hours * flights,
    }
}
