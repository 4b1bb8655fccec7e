use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ai::{CompetitorAirline, PersonalityKind, roll_competitor_event, step_competitor};
use crate::airline::Airline;
use crate::competition::{CarrierMarketInput, CompetitionSolver};
use crate::errors::GameError;
use crate::events::GameEvent;
use crate::fuel::FuelMarket;
use crate::ids::AirlineId;
use crate::simulator::{RouteSimResult, simulate_route};

pub const STARTING_CASH: f64 = 150_000_000.0;
const PLAYER_EVENT_LABEL: &str = "events:player";
const PLAYER_SERVICE_QUALITY: f64 = 0.6;

/// Everything needed to resume a deterministic simulation: the root seed,
/// the current day, the player, every competitor, and the fuel market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub seed: u64,
    pub day: u64,
    pub player: Airline,
    pub competitors: Vec<CompetitorAirline>,
    pub fuel_market: FuelMarket,
}

/// Outcome of a single `advance_day` call for the player's airline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub day: u64,
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
    pub passengers: u64,
    pub cash: f64,
    pub reputation: f64,
    pub new_events: Vec<GameEvent>,
}

/// Create a new world with a player airline based at `hub_code` and one
/// competitor per entry in `competitor_personalities`.
pub fn new_world(
    seed: u64,
    player_name: &str,
    hub_code: &str,
    competitor_personalities: Vec<PersonalityKind>,
) -> Result<World, GameError> {
    if crate::catalog::find_airport(hub_code).is_none() {
        return Err(GameError::UnknownAirport { code: hub_code.to_string() });
    }

    let player = Airline::new(AirlineId(0), player_name, hub_code, STARTING_CASH);
    let catalog = crate::catalog::airport_catalog();
    let competitors = competitor_personalities
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let hub = catalog[i % catalog.len()].code;
            let airline = Airline::new(AirlineId(i as u64 + 1), format!("{:?} Air", kind), hub, STARTING_CASH);
            CompetitorAirline::new(airline, kind)
        })
        .collect();

    Ok(World { seed, day: 0, player, competitors, fuel_market: FuelMarket::new() })
}

impl World {
    pub fn competitors(&self) -> &[CompetitorAirline] {
        &self.competitors
    }

    pub fn fuel_market(&self) -> &FuelMarket {
        &self.fuel_market
    }

    /// Bankruptcy is a read-only flag, not a state transition: negative
    /// cash while the airline still has ongoing operating obligations
    /// (a flown route or a lease payment), a proxy for daily operating
    /// cost. The host decides what to do with it.
    pub fn player_bankrupt(&self) -> bool {
        let has_operating_cost = self.player.daily_lease_cost() > 0.0
            || self.player.routes().iter().any(|r| r.active && r.assigned_aircraft.is_some());
        self.player.cash < 0.0 && has_operating_cost
    }

    fn carrier(&self, airline_index: usize) -> &Airline {
        if airline_index == 0 { &self.player } else { &self.competitors[airline_index - 1].airline }
    }

    fn carrier_service_quality(&self, airline_index: usize) -> f64 {
        if airline_index == 0 { PLAYER_SERVICE_QUALITY } else { self.competitors[airline_index - 1].personality().service_quality }
    }

    fn carrier_mut(&mut self, airline_index: usize) -> &mut Airline {
        if airline_index == 0 { &mut self.player } else { &mut self.competitors[airline_index - 1].airline }
    }

    fn carrier_count(&self) -> usize {
        1 + self.competitors.len()
    }
}

/// The atomic per-day transition from the component design: expire events,
/// update the fuel market, roll new events, run every competitor's AI,
/// simulate every carrier's routes (consulting the competition solver on
/// contested city pairs), then apply today's one-shot event impacts and
/// fold the results into cash/reputation and cumulative totals. One-shot
/// impacts are applied after simulation so today's new events cannot move
/// today's own demand through a reputation change.
pub fn advance_day(world: &mut World) -> DailyReport {
    world.day += 1;
    let day = world.day;

    world.player.day = day;
    world.player.expire_events(day);
    for competitor in &mut world.competitors {
        competitor.airline.day = day;
        competitor.airline.expire_events(day);
    }

    world.fuel_market.update(day, world.seed);
    roll_events_and_shocks(world, day);
    run_competitor_ai(world, day);

    let tallies = simulate_all_routes(world, day);
    apply_one_shot_event_impacts(world, day);
    for (i, tally) in tallies.iter().enumerate() {
        fold_tally_into_airline(world.carrier_mut(i), *tally);
        apply_reputation_drift(world.carrier_mut(i), tally.passengers);
    }

    let new_events = world.player.events.iter().filter(|e| e.day_occurred == day).cloned().collect();

    DailyReport {
        day,
        revenue: tallies[0].revenue,
        costs: tallies[0].cost,
        profit: tallies[0].revenue - tallies[0].cost,
        passengers: tallies[0].passengers,
        cash: world.player.cash,
        reputation: world.player.reputation,
        new_events,
    }
}

fn roll_events_and_shocks(world: &mut World, day: u64) {
    let mut cooldowns = std::mem::take(&mut world.player.event_cooldowns);
    let event = crate::events::EventEngine::roll(world.seed, day, PLAYER_EVENT_LABEL, 0, &mut cooldowns);
    world.player.event_cooldowns = cooldowns;
    if let Some(event) = event {
        let shock = event.fuel_shock.then_some((event.fuel_shock_magnitude, event.duration_days));
        world.player.push_event(event);
        if let Some((magnitude, duration)) = shock {
            world.fuel_market.apply_shock(magnitude, duration);
        }
    }

    for i in 0..world.competitors.len() {
        roll_competitor_event(&mut world.competitors[i], day, world.seed, i as u64);
        let shock = world.competitors[i]
            .airline
            .events
            .last()
            .filter(|e| e.day_occurred == day && e.fuel_shock)
            .map(|e| (e.fuel_shock_magnitude, e.duration_days));
        if let Some((magnitude, duration)) = shock {
            world.fuel_market.apply_shock(magnitude, duration);
        }
    }
}

fn run_competitor_ai(world: &mut World, day: u64) {
    for i in 0..world.competitors.len() {
        let others: Vec<&Airline> = std::iter::once(&world.player)
            .chain(world.competitors.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, c)| &c.airline))
            .collect();
        let mut competitor = world.competitors[i].clone();
        step_competitor(&mut competitor, &others, day, world.seed, i as u64);
        world.competitors[i] = competitor;
    }
}

fn apply_one_shot_event_impacts(world: &mut World, day: u64) {
    for i in 0..world.carrier_count() {
        let airline = world.carrier_mut(i);
        let (financial, reputation) = airline
            .events
            .iter()
            .filter(|e| e.day_occurred == day)
            .fold((0.0, 0.0), |(f, r), e| (f + e.financial_impact, r + e.reputation_impact));
        airline.cash += financial;
        airline.reputation = (airline.reputation + reputation).clamp(0.0, 100.0);
    }
}

/// Per-carrier tally folded into the `DailyReport` and cumulative totals.
#[derive(Debug, Default, Clone, Copy)]
struct DailyTally {
    revenue: f64,
    cost: f64,
    passengers: u64,
}

/// One active, assigned route's result, staged for the mutation pass.
struct RouteUpdate {
    airline_index: usize,
    route_index: usize,
    aircraft_index: usize,
    result: RouteSimResult,
}

fn simulate_all_routes(world: &mut World, day: u64) -> Vec<DailyTally> {
    let carrier_count = world.carrier_count();
    let mut by_pair: HashMap<(String, String), Vec<(usize, usize)>> = HashMap::new();
    for ai in 0..carrier_count {
        for (ri, route) in world.carrier(ai).routes().iter().enumerate() {
            if route.active && route.assigned_aircraft.is_some() {
                by_pair.entry(route.city_pair_key()).or_default().push((ai, ri));
            }
        }
    }

    let mut updates = Vec::new();
    for members in by_pair.values() {
        let inputs: Vec<CarrierMarketInput> = members
            .iter()
            .map(|&(ai, ri)| {
                let airline = world.carrier(ai);
                let route = &airline.routes()[ri];
                CarrierMarketInput {
                    ticket_price: route.ticket_price,
                    reputation: airline.reputation,
                    service_quality: world.carrier_service_quality(ai),
                }
            })
            .collect();
        let shares = CompetitionSolver::market_shares(&inputs);

        for (&(ai, ri), &share) in members.iter().zip(shares.iter()) {
            let airline = world.carrier(ai);
            let route = &airline.routes()[ri];
            let Some(aircraft_id) = route.assigned_aircraft else { continue };
            let Some(aircraft_idx) = airline.aircraft().iter().position(|a| a.id == aircraft_id) else { continue };
            let aircraft = &airline.aircraft()[aircraft_idx];

            let demand_mod = event_modifier(airline, route.id, |e| e.demand_modifier);
            let cost_mod = event_modifier(airline, route.id, |e| e.cost_modifier);

            let result = simulate_route(route, aircraft, airline.reputation, world.fuel_market.price, demand_mod, cost_mod, share);
            updates.push(RouteUpdate { airline_index: ai, route_index: ri, aircraft_index: aircraft_idx, result });
        }
    }

    let mut tallies = vec![DailyTally::default(); carrier_count];
    for update in updates {
        tallies[update.airline_index].revenue += update.result.revenue;
        tallies[update.airline_index].cost += update.result.cost;
        tallies[update.airline_index].passengers += update.result.passengers;

        let airline = world.carrier_mut(update.airline_index);
        airline.routes[update.route_index].load_factor = update.result.load_factor;
        airline.routes[update.route_index].daily_profit = update.result.profit;
        airline.routes[update.route_index].cumulative_passengers += update.result.passengers;
        airline.aircraft[update.aircraft_index].add_flight_hours(update.result.added_flight_hours);
    }
    let _ = day;
    tallies
}

fn event_modifier(airline: &Airline, route_id: crate::ids::RouteId, f: impl Fn(&GameEvent) -> f64) -> f64 {
    let product: f64 = airline.active_events().filter(|e| e.scope.affects(route_id)).map(f).product();
    if product == 0.0 { 1.0 } else { product }
}

fn fold_tally_into_airline(airline: &mut Airline, tally: DailyTally) {
    let lease_cost = airline.daily_lease_cost();
    airline.cash += tally.revenue - tally.cost - lease_cost;
    airline.cumulative_revenue += tally.revenue;
    airline.cumulative_costs += tally.cost + lease_cost;
    airline.cumulative_passengers += tally.passengers;
}

fn apply_reputation_drift(airline: &mut Airline, passengers_today: u64) {
    let target = if passengers_today > 1000 {
        70.0
    } else if passengers_today > 500 {
        60.0
    } else {
        40.0
    };
    airline.reputation = (airline.reputation + 0.10 * (target - airline.reputation)).clamp(0.0, 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_rejects_unknown_hub() {
        let err = new_world(1, "Test", "ZZZ", vec![]).unwrap_err();
        assert_eq!(err, GameError::UnknownAirport { code: "ZZZ".into() });
    }

    #[test]
    fn advancing_a_day_with_no_routes_is_a_no_op_financially() {
        let mut world = new_world(1, "Test", "JFK", vec![PersonalityKind::Balanced]).unwrap();
        let report = advance_day(&mut world);
        assert_eq!(report.revenue, 0.0);
        assert_eq!(report.passengers, 0);
        assert_eq!(world.day, 1);
    }

    #[test]
    fn advancing_a_day_with_an_active_route_generates_revenue() {
        use rand::SeedableRng;
        let mut world = new_world(7, "Test", "JFK", vec![]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let plane = world.player.purchase_aircraft("Boeing 737-800", 0, &mut rng).unwrap();
        let route = world.player.open_route("JFK", "LAX", 300.0, 0).unwrap();
        world.player.assign_aircraft(route, plane).unwrap();

        let report = advance_day(&mut world);
        assert!(report.revenue > 0.0);
        assert!(report.passengers > 0);
        assert_eq!(world.player.routes()[0].cumulative_passengers, report.passengers);
    }

    #[test]
    fn determinism_same_seed_same_outcome() {
        let mut a = new_world(42, "A", "JFK", vec![PersonalityKind::Aggressive]).unwrap();
        let mut b = new_world(42, "A", "JFK", vec![PersonalityKind::Aggressive]).unwrap();
        for _ in 0..10 {
            advance_day(&mut a);
            advance_day(&mut b);
        }
        assert_eq!(a.player.cash, b.player.cash);
        assert_eq!(a.fuel_market.price, b.fuel_market.price);
    }
}
