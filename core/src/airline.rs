use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aircraft::{Aircraft, Ownership};
use crate::catalog::find_aircraft_type;
use crate::errors::GameError;
use crate::events::GameEvent;
use crate::ids::{AircraftId, AirlineId, EventId, RouteId};
use crate::route::Route;

pub const DEFAULT_REPUTATION: f64 = 50.0;

/// The mutable aggregate root for a single carrier (player or competitor).
///
/// Invariants upheld by every mutator on this type:
/// - every `Aircraft` referenced by any `Route`'s `assigned_aircraft` is in
///   `self.aircraft`;
/// - a given aircraft is the assigned aircraft of at most one route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airline {
    pub id: AirlineId,
    pub name: String,
    pub cash: f64,
    pub home_hub: String,
    pub reputation: f64,
    pub routes: Vec<Route>,
    pub aircraft: Vec<Aircraft>,
    pub events: Vec<GameEvent>,
    pub day: u64,
    pub cumulative_passengers: u64,
    pub cumulative_revenue: f64,
    pub cumulative_costs: f64,

    next_aircraft_id: u64,
    next_route_id: u64,
    next_event_id: u64,
    #[serde(default)]
    pub event_cooldowns: HashMap<usize, u64>,
}

impl Airline {
    pub fn new(id: AirlineId, name: impl Into<String>, home_hub: impl Into<String>, starting_cash: f64) -> Self {
        Airline {
            id,
            name: name.into(),
            cash: starting_cash,
            home_hub: home_hub.into(),
            reputation: DEFAULT_REPUTATION,
            routes: Vec::new(),
            aircraft: Vec::new(),
            events: Vec::new(),
            day: 0,
            cumulative_passengers: 0,
            cumulative_revenue: 0.0,
            cumulative_costs: 0.0,
            next_aircraft_id: 0,
            next_route_id: 0,
            next_event_id: 0,
            event_cooldowns: HashMap::new(),
        }
    }

    // ---- read-only views -------------------------------------------------

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn active_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.is_active(self.day))
    }

    pub fn route_by_id(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn aircraft_by_id(&self, id: AircraftId) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    fn route_index(&self, id: RouteId) -> Option<usize> {
        self.routes.iter().position(|r| r.id == id)
    }

    fn aircraft_index(&self, id: AircraftId) -> Option<usize> {
        self.aircraft.iter().position(|a| a.id == id)
    }

    fn next_event_id(&mut self) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    pub fn push_event(&mut self, mut event: GameEvent) -> EventId {
        let id = self.next_event_id();
        event.id = id;
        self.events.push(event);
        id
    }

    /// Drop events whose active predicate is false for `day` (and that can
    /// never become active again, i.e. have already ended).
    pub fn expire_events(&mut self, day: u64) {
        self.events.retain(|e| e.day_occurred + e.duration_days > day || e.day_occurred == day);
    }

    // ---- route mutators ---------------------------------------------------

    pub fn open_route(&mut self, origin: &str, destination: &str, ticket_price: f64, day: u64) -> Result<RouteId, GameError> {
        if self
            .routes
            .iter()
            .any(|r| r.origin == origin && r.destination == destination)
        {
            return Err(GameError::RouteExists {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }
        let id = RouteId(self.next_route_id);
        self.next_route_id += 1;
        let route = Route::new(id, origin, destination, ticket_price, day);
        self.routes.push(route);
        Ok(id)
    }

    /// Close a route, unassigning its aircraft first.
    pub fn close_route(&mut self, route_id: RouteId) -> Result<(), GameError> {
        let idx = self.route_index(route_id).ok_or(GameError::UnknownId)?;
        if self.routes[idx].assigned_aircraft.is_some() {
            self.unassign_aircraft(route_id)?;
        }
        self.routes[idx].active = false;
        Ok(())
    }

    pub fn assign_aircraft(&mut self, route_id: RouteId, aircraft_id: AircraftId) -> Result<(), GameError> {
        let route_idx = self.route_index(route_id).ok_or(GameError::UnknownId)?;
        let aircraft_idx = self.aircraft_index(aircraft_id).ok_or(GameError::UnknownId)?;

        if self.aircraft[aircraft_idx].assigned_route.is_some() {
            return Err(GameError::AircraftAlreadyAssigned { aircraft_id });
        }

        if let Some(previous) = self.routes[route_idx].assigned_aircraft
            && let Some(i) = self.aircraft_index(previous)
        {
            self.aircraft[i].assigned_route = None;
        }

        self.routes[route_idx].assigned_aircraft = Some(aircraft_id);
        self.aircraft[aircraft_idx].assigned_route = Some(route_id);
        Ok(())
    }

    pub fn unassign_aircraft(&mut self, route_id: RouteId) -> Result<(), GameError> {
        let route_idx = self.route_index(route_id).ok_or(GameError::UnknownId)?;
        if let Some(aircraft_id) = self.routes[route_idx].assigned_aircraft.take()
            && let Some(i) = self.aircraft_index(aircraft_id)
        {
            self.aircraft[i].assigned_route = None;
        }
        Ok(())
    }

    pub fn set_ticket_price(&mut self, route_id: RouteId, price: f64) -> Result<(), GameError> {
        let idx = self.route_index(route_id).ok_or(GameError::UnknownId)?;
        self.routes[idx].ticket_price = price.max(0.0);
        Ok(())
    }

    pub fn set_daily_flights(&mut self, route_id: RouteId, flights: u32) -> Result<(), GameError> {
        let idx = self.route_index(route_id).ok_or(GameError::UnknownId)?;
        self.routes[idx].daily_flights = flights.max(1);
        Ok(())
    }

    // ---- aircraft mutators -------------------------------------------------

    fn generate_registration(&self, rng: &mut impl Rng) -> String {
        loop {
            let candidate = format!("N{:05}", rng.gen_range(0..100_000));
            if !self.aircraft.iter().any(|a| a.registration == candidate) {
                return candidate;
            }
        }
    }

    pub fn purchase_aircraft(&mut self, type_name: &str, day: u64, rng: &mut impl Rng) -> Result<AircraftId, GameError> {
        let spec = find_aircraft_type(type_name).ok_or_else(|| GameError::UnknownAircraftType {
            name: type_name.to_string(),
        })?;
        if self.cash < spec.purchase_price {
            return Err(GameError::InsufficientFunds {
                have: self.cash,
                need: spec.purchase_price,
            });
        }
        self.cash -= spec.purchase_price;
        Ok(self.add_aircraft(spec.name, Ownership::Owned, day, rng))
    }

    /// Lease a new aircraft. Never fails on cash, it creates a recurring
    /// obligation rather than an up-front debit.
    pub fn lease_aircraft(&mut self, type_name: &str, day: u64, rng: &mut impl Rng) -> Result<AircraftId, GameError> {
        let spec = find_aircraft_type(type_name).ok_or_else(|| GameError::UnknownAircraftType {
            name: type_name.to_string(),
        })?;
        let ownership = Ownership::Leased {
            monthly_payment: spec.monthly_lease(),
        };
        Ok(self.add_aircraft(spec.name, ownership, day, rng))
    }

    fn add_aircraft(&mut self, type_name: &str, ownership: Ownership, day: u64, rng: &mut impl Rng) -> AircraftId {
        let id = AircraftId(self.next_aircraft_id);
        self.next_aircraft_id += 1;
        let registration = self.generate_registration(rng);
        self.aircraft.push(Aircraft::new(id, registration, type_name.to_string(), ownership, day));
        id
    }

    pub fn sell_aircraft(&mut self, aircraft_id: AircraftId) -> Result<f64, GameError> {
        let idx = self.aircraft_index(aircraft_id).ok_or(GameError::UnknownId)?;
        let aircraft = &self.aircraft[idx];
        if aircraft.is_leased() {
            return Err(GameError::NotOwned { aircraft_id });
        }
        if aircraft.assigned_route.is_some() {
            return Err(GameError::AircraftAssigned { aircraft_id });
        }
        let refund = aircraft.spec().sale_value();
        self.cash += refund;
        self.aircraft.remove(idx);
        Ok(refund)
    }

    pub fn return_leased(&mut self, aircraft_id: AircraftId) -> Result<(), GameError> {
        let idx = self.aircraft_index(aircraft_id).ok_or(GameError::UnknownId)?;
        let aircraft = &self.aircraft[idx];
        if !aircraft.is_leased() {
            return Err(GameError::NotLeased { aircraft_id });
        }
        if aircraft.assigned_route.is_some() {
            return Err(GameError::AircraftAssigned { aircraft_id });
        }
        let penalty = aircraft.spec().lease_termination_penalty();
        if self.cash < penalty {
            return Err(GameError::InsufficientFunds {
                have: self.cash,
                need: penalty,
            });
        }
        self.cash -= penalty;
        self.aircraft.remove(idx);
        Ok(())
    }

    /// Sum of `monthly_lease_payment / 30` over every leased aircraft, the
    /// daily share of lease obligations folded into a day's costs.
    pub fn daily_lease_cost(&self) -> f64 {
        self.aircraft.iter().map(|a| a.monthly_lease_payment() / 30.0).sum()
    }
}
