use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::airline::Airline;
use crate::catalog::{airport_catalog, distance, find_airport};
use crate::catalog::aircraft_types::DEFAULT_FLEET_MODEL;
use crate::catalog::find_aircraft_type;
use crate::errors::GameError;
use crate::events::EventEngine;
use crate::rng::child_rng;

/// Which preset parameter bundle a competitor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalityKind {
    Aggressive,
    Conservative,
    Budget,
    Balanced,
}

/// Immutable parameter bundle driving one competitor's decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AIPersonality {
    pub expansion_rate: f64,
    pub pricing_modifier: f64,
    pub risk_tolerance: f64,
    pub competitive_aggression: f64,
    pub service_quality: f64,
}

impl PersonalityKind {
    pub fn parameters(self) -> AIPersonality {
        match self {
            PersonalityKind::Aggressive => AIPersonality {
                expansion_rate: 0.9,
                pricing_modifier: 0.85,
                risk_tolerance: 0.8,
                competitive_aggression: 0.95,
                service_quality: 0.5,
            },
            PersonalityKind::Conservative => AIPersonality {
                expansion_rate: 0.3,
                pricing_modifier: 1.15,
                risk_tolerance: 0.2,
                competitive_aggression: 0.3,
                service_quality: 0.85,
            },
            PersonalityKind::Budget => AIPersonality {
                expansion_rate: 0.6,
                pricing_modifier: 0.70,
                risk_tolerance: 0.5,
                competitive_aggression: 0.6,
                service_quality: 0.3,
            },
            PersonalityKind::Balanced => AIPersonality {
                expansion_rate: 0.5,
                pricing_modifier: 1.00,
                risk_tolerance: 0.5,
                competitive_aggression: 0.5,
                service_quality: 0.6,
            },
        }
    }
}

/// A single AI-controlled carrier: its airline state plus its behavior
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorAirline {
    pub airline: Airline,
    pub personality_kind: PersonalityKind,
}

impl CompetitorAirline {
    pub fn new(airline: Airline, personality_kind: PersonalityKind) -> Self {
        CompetitorAirline { airline, personality_kind }
    }

    pub fn personality(&self) -> AIPersonality {
        self.personality_kind.parameters()
    }
}

fn distance_score(distance_nm: f64) -> f64 {
    if distance_nm < 500.0 {
        0.6
    } else if distance_nm < 1500.0 {
        1.0
    } else if distance_nm < 2500.0 {
        0.8
    } else {
        0.5
    }
}

fn competition_penalty(existing_carriers: usize, competitive_aggression: f64) -> f64 {
    let base = match existing_carriers {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.2,
    };
    base * (1.0 - 0.5 * competitive_aggression)
}

fn score_route(origin: &str, destination: &str, existing_carriers: usize, personality: &AIPersonality) -> f64 {
    let (Some(o), Some(d)) = (find_airport(origin), find_airport(destination)) else {
        return 0.0;
    };
    let market_score = (o.market_size.score_weight() + d.market_size.score_weight()) as f64 / 8.0;
    let dist_score = distance_score(distance(origin, destination));
    let comp_score = competition_penalty(existing_carriers, personality.competitive_aggression);

    (0.4 * market_score + 0.3 * dist_score + 0.3 * comp_score).clamp(0.0, 1.0)
}

/// Number of distinct active carriers (across `all_carriers`) currently
/// serving the unordered city pair `(a, b)`.
fn carriers_on_pair(all_carriers: &[&Airline], a: &str, b: &str) -> usize {
    all_carriers
        .iter()
        .filter(|airline| {
            airline.routes().iter().any(|r| {
                r.active
                    && ((r.origin == a && r.destination == b) || (r.origin == b && r.destination == a))
            })
        })
        .count()
}

/// Run one competitor's full daily decision sequence: close unprofitable
/// routes, maybe open a new one, adjust prices, maybe expand the fleet.
///
/// `all_carriers` is every airline in the world (player + competitors),
/// used only to read competitive context, it is not mutated here.
pub fn step_competitor(competitor: &mut CompetitorAirline, all_carriers: &[&Airline], current_day: u64, root_seed: u64, index: u64) {
    let personality = competitor.personality();
    let mut rng = child_rng(root_seed, "ai", current_day, index);

    close_unprofitable_routes(competitor, current_day, &personality);
    maybe_open_route(competitor, all_carriers, current_day, &personality, &mut rng);
    adjust_prices(competitor, &personality);
    maybe_expand_fleet(competitor, current_day, &personality, &mut rng);
}

fn close_unprofitable_routes(competitor: &mut CompetitorAirline, current_day: u64, personality: &AIPersonality) {
    let days_tolerance = (30.0 * personality.risk_tolerance).floor() as u64;
    let stale: Vec<_> = competitor
        .airline
        .routes()
        .iter()
        .filter(|r| r.active && r.daily_profit < 0.0 && r.days_operating(current_day) > days_tolerance)
        .map(|r| r.id)
        .collect();

    for route_id in stale {
        let _ = competitor.airline.close_route(route_id);
    }
}

fn maybe_open_route(
    competitor: &mut CompetitorAirline,
    all_carriers: &[&Airline],
    current_day: u64,
    personality: &AIPersonality,
    rng: &mut impl Rng,
) {
    let u: f64 = rng.gen_range(0.0..1.0);
    if u > personality.expansion_rate * 0.20 {
        return;
    }
    let required_cash = 500_000.0 / personality.risk_tolerance;
    if competitor.airline.cash < required_cash {
        return;
    }

    let hub = competitor.airline.home_hub.clone();
    let already_served: Vec<(String, String)> = competitor
        .airline
        .routes()
        .iter()
        .filter(|r| r.active)
        .map(|r| (r.origin.clone(), r.destination.clone()))
        .collect();

    let best = airport_catalog()
        .iter()
        .filter(|a| a.code != hub)
        .filter(|a| {
            !already_served
                .iter()
                .any(|(o, d)| (o == &hub && d == a.code) || (d == &hub && o == a.code))
        })
        .map(|a| {
            let carriers = carriers_on_pair(all_carriers, &hub, a.code);
            let score = score_route(&hub, a.code, carriers, personality);
            (a.code, score)
        })
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap());

    if let Some((dest_code, score)) = best
        && score > 0.5
    {
        let dist = distance(&hub, dest_code);
        let price = dist * 0.13 * personality.pricing_modifier;
        if let Ok(route_id) = competitor.airline.open_route(&hub, dest_code, price, current_day) {
            let spare = competitor.airline.aircraft().iter().find(|a| a.is_available()).map(|a| a.id);
            if let Some(aircraft_id) = spare {
                let _ = competitor.airline.assign_aircraft(route_id, aircraft_id);
            }
        }
    }
}

fn adjust_prices(competitor: &mut CompetitorAirline, personality: &AIPersonality) {
    let updates: Vec<(crate::ids::RouteId, f64)> = competitor
        .airline
        .routes()
        .iter()
        .filter(|r| r.active)
        .filter_map(|r| {
            if r.load_factor > 0.85 {
                Some((r.id, r.ticket_price * (1.0 + 0.05 * personality.service_quality)))
            } else if r.load_factor < 0.60 {
                let dropped = r.ticket_price * (1.0 - 0.10 * (1.0 - personality.pricing_modifier));
                Some((r.id, dropped.max(50.0)))
            } else {
                None
            }
        })
        .collect();

    for (route_id, new_price) in updates {
        let _ = competitor.airline.set_ticket_price(route_id, new_price);
    }
}

fn maybe_expand_fleet(competitor: &mut CompetitorAirline, current_day: u64, personality: &AIPersonality, rng: &mut impl Rng) {
    let has_unassigned_route = competitor.airline.routes().iter().any(|r| r.active && r.assigned_aircraft.is_none());
    if !has_unassigned_route {
        return;
    }

    let reference = find_aircraft_type(DEFAULT_FLEET_MODEL).expect("default fleet model is always in the catalog");
    let threshold = reference.purchase_price * personality.risk_tolerance;
    if competitor.airline.cash < threshold {
        return;
    }

    let can_afford_comfortably = competitor.airline.cash >= 2.0 * reference.purchase_price;
    let should_purchase = matches!(competitor.personality_kind, PersonalityKind::Conservative) || can_afford_comfortably;

    let acquired = if should_purchase {
        match competitor.airline.purchase_aircraft(reference.name, current_day, rng) {
            Ok(id) => Some(id),
            Err(GameError::InsufficientFunds { .. }) => {
                competitor.airline.lease_aircraft(reference.name, current_day, rng).ok()
            }
            Err(_) => None,
        }
    } else {
        competitor.airline.lease_aircraft(reference.name, current_day, rng).ok()
    };

    if let Some(aircraft_id) = acquired
        && let Some(route_id) = competitor
            .airline
            .routes()
            .iter()
            .find(|r| r.active && r.assigned_aircraft.is_none())
            .map(|r| r.id)
    {
        let _ = competitor.airline.assign_aircraft(route_id, aircraft_id);
    }
}

/// Roll a new event for a competitor's airline, honoring its own cooldowns.
pub fn roll_competitor_event(competitor: &mut CompetitorAirline, current_day: u64, root_seed: u64, index: u64) {
    let mut cooldowns = std::mem::take(&mut competitor.airline.event_cooldowns);
    let event = EventEngine::roll(root_seed, current_day, "events:competitor", index, &mut cooldowns);
    competitor.airline.event_cooldowns = cooldowns;
    if let Some(event) = event {
        competitor.airline.push_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AirlineId;

    fn competitor(kind: PersonalityKind, cash: f64) -> CompetitorAirline {
        CompetitorAirline::new(Airline::new(AirlineId(1), "Rival", "ORD", cash), kind)
    }

    #[test]
    fn personality_constants_match_spec_table() {
        let p = PersonalityKind::Aggressive.parameters();
        assert_eq!(p.expansion_rate, 0.9);
        assert_eq!(p.pricing_modifier, 0.85);
        assert_eq!(p.risk_tolerance, 0.8);
        assert_eq!(p.competitive_aggression, 0.95);
        assert_eq!(p.service_quality, 0.5);

        let p = PersonalityKind::Conservative.parameters();
        assert_eq!(p.expansion_rate, 0.3);
        assert_eq!(p.pricing_modifier, 1.15);

        let p = PersonalityKind::Budget.parameters();
        assert_eq!(p.pricing_modifier, 0.70);

        let p = PersonalityKind::Balanced.parameters();
        assert_eq!(p.pricing_modifier, 1.00);
    }

    #[test]
    fn closes_only_routes_past_tolerance_and_unprofitable() {
        let mut c = competitor(PersonalityKind::Conservative, 1_000_000.0);
        // days_tolerance = floor(30 * 0.2) = 6
        let id = c.airline.open_route("ORD", "ATL", 100.0, 0).unwrap();
        {
            let idx = c.airline.routes().iter().position(|r| r.id == id).unwrap();
            c.airline.routes[idx].daily_profit = -10.0;
        }
        let personality = c.personality();
        close_unprofitable_routes(&mut c, 5, &personality);
        assert!(c.airline.route_by_id(id).unwrap().active);
        close_unprofitable_routes(&mut c, 10, &personality);
        assert!(!c.airline.route_by_id(id).unwrap().active);
    }

    #[test]
    fn score_route_clamped_and_sensible() {
        let p = PersonalityKind::Balanced.parameters();
        let score = score_route("ORD", "ATL", 0, &p);
        assert!((0.0..=1.0).contains(&score));
    }
}
