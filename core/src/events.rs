use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, RouteId};
use crate::rng::child_rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Weather,
    Economic,
    Operational,
    Market,
    PositivePR,
    NegativePR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Critical,
}

impl Severity {
    /// Upper bound on the magnitude of a percentage-style impact for this
    /// severity band (demand/cost modifiers are expressed as distance from
    /// 1.0; financial/reputation impacts as a fraction of their own range).
    fn magnitude_range(self) -> (f64, f64) {
        match self {
            Severity::Minor => (0.01, 0.10),
            Severity::Moderate => (0.15, 0.25),
            Severity::Major => (0.30, 0.50),
            Severity::Critical => (0.50, 0.75),
        }
    }
}

/// Which routes a [`GameEvent`] affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventScope {
    AllRoutes,
    Routes(Vec<RouteId>),
}

impl EventScope {
    pub fn affects(&self, route_id: RouteId) -> bool {
        match self {
            EventScope::AllRoutes => true,
            EventScope::Routes(ids) => ids.contains(&route_id),
        }
    }
}

/// A concrete, instantiated game event affecting one airline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub day_occurred: u64,
    pub duration_days: u64,
    pub financial_impact: f64,
    pub reputation_impact: f64,
    pub demand_modifier: f64,
    pub cost_modifier: f64,
    pub scope: EventScope,
    /// Set when this event should also apply a one-shot fuel-market shock.
    pub fuel_shock: bool,
    /// Multiplier passed to `FuelMarket::apply_shock` when `fuel_shock` is
    /// set. Always `>= 1.0`: these templates are fuel-supply disruptions,
    /// so the shock raises price regardless of the event's demand sign.
    /// Unused when `fuel_shock` is false.
    pub fuel_shock_magnitude: f64,
}

impl GameEvent {
    /// Active iff `day_occurred <= day < day_occurred + duration_days`.
    /// Instantaneous events (`duration_days == 0`) are never active.
    pub fn is_active(&self, day: u64) -> bool {
        self.duration_days > 0 && day >= self.day_occurred && day < self.day_occurred + self.duration_days
    }
}

/// Deterministic template an event is instantiated from.
struct EventTemplate {
    kind: EventKind,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    duration_range: (u64, u64),
    /// Whether the financial/reputation impacts are favorable (PR/market
    /// upside) or adverse.
    favorable: bool,
    /// Whether this Economic template additionally shocks the fuel market.
    fuel_shock: bool,
    base_rate: f64,
}

macro_rules! template {
    ($kind:ident, $sev:ident, $title:expr, $desc:expr, $dur:expr, $favorable:expr, $fuel:expr, $rate:expr) => {
        EventTemplate {
            kind: EventKind::$kind,
            severity: Severity::$sev,
            title: $title,
            description: $desc,
            duration_range: $dur,
            favorable: $favorable,
            fuel_shock: $fuel,
            base_rate: $rate,
        }
    };
}

fn templates() -> &'static [EventTemplate] {
    static TEMPLATES: std::sync::OnceLock<Vec<EventTemplate>> = std::sync::OnceLock::new();
    TEMPLATES.get_or_init(|| {
        vec![
            template!(Weather, Minor, "Light Turbulence", "Minor weather delays across the network.", (1, 2), false, false, 0.030),
            template!(Weather, Minor, "Regional Fog", "Morning fog slows ground operations.", (1, 2), false, false, 0.030),
            template!(Weather, Minor, "Seasonal Drizzle", "Persistent light rain causes minor taxi delays.", (1, 3), false, false, 0.025),
            template!(Weather, Moderate, "Thunderstorm Line", "A line of thunderstorms disrupts several routes.", (2, 4), false, false, 0.020),
            template!(Weather, Moderate, "Gusty Crosswinds", "High crosswinds force reduced schedules.", (2, 4), false, false, 0.018),
            template!(Weather, Moderate, "Icy Runways", "De-icing backlogs slow turnarounds.", (2, 5), false, false, 0.016),
            template!(Weather, Major, "Winter Storm", "A major winter storm grounds significant capacity.", (3, 6), false, false, 0.010),
            template!(Weather, Major, "Tropical Storm Warning", "Coastal routes curtailed ahead of a tropical storm.", (3, 6), false, false, 0.009),
            template!(Weather, Critical, "Hurricane Landfall", "Hurricane forces network-wide cancellations.", (5, 10), false, false, 0.004),
            template!(Weather, Critical, "Blizzard Shutdown", "A blizzard shuts down major hub operations.", (4, 8), false, false, 0.004),

            template!(Economic, Minor, "Fuel Price Jitter", "Small movement in spot fuel prices.", (1, 3), false, true, 0.028),
            template!(Economic, Minor, "Mild Inflation Tick", "Operating costs nudge upward.", (2, 4), false, false, 0.025),
            template!(Economic, Minor, "Interest Rate Murmur", "Rate chatter briefly unsettles travel budgets.", (1, 3), false, false, 0.024),
            template!(Economic, Moderate, "Regional Recession Signal", "Softer demand in a key region.", (5, 10), false, false, 0.018),
            template!(Economic, Moderate, "Fuel Supply Squeeze", "Refinery maintenance tightens fuel supply.", (3, 7), false, true, 0.016),
            template!(Economic, Moderate, "Currency Swing", "Exchange-rate swing affects international demand.", (4, 8), false, false, 0.014),
            template!(Economic, Major, "Oil Price Spike", "Crude oil spikes on geopolitical tension.", (5, 12), false, true, 0.008),
            template!(Economic, Major, "Travel Demand Slump", "Macroeconomic headwinds depress travel demand.", (7, 14), false, false, 0.007),
            template!(Economic, Critical, "Global Fuel Crisis", "A global fuel crisis sends energy costs soaring.", (10, 20), false, true, 0.003),
            template!(Economic, Critical, "Economic Downturn", "A sharp downturn sharply reduces travel demand.", (14, 30), false, false, 0.003),

            template!(Operational, Minor, "Crew Scheduling Hiccup", "A scheduling hiccup causes minor delays.", (1, 2), false, false, 0.028),
            template!(Operational, Minor, "Ground Equipment Hiccup", "Ground-support equipment shortage slows turnarounds.", (1, 3), false, false, 0.026),
            template!(Operational, Minor, "Baggage System Hiccup", "A baggage-handling glitch slows boarding.", (1, 2), false, false, 0.025),
            template!(Operational, Moderate, "Maintenance Backlog", "A maintenance backlog raises upkeep costs.", (3, 7), false, false, 0.018),
            template!(Operational, Moderate, "IT Systems Outage", "A booking-systems outage disrupts operations.", (1, 3), false, false, 0.015),
            template!(Operational, Moderate, "Gate Congestion", "Hub gate congestion forces schedule padding.", (2, 5), false, false, 0.014),
            template!(Operational, Major, "Crew Shortage", "A widespread crew shortage forces schedule cuts.", (5, 10), false, false, 0.008),
            template!(Operational, Major, "Fleet Grounding", "A safety bulletin grounds part of the fleet.", (7, 14), false, false, 0.006),
            template!(Operational, Major, "Air Traffic Control Slowdown", "ATC staffing shortages ripple through the schedule.", (5, 12), false, false, 0.006),
            template!(Operational, Critical, "Labor Strike", "A labor strike halts significant operations.", (7, 21), false, false, 0.003),
            template!(Operational, Critical, "Major Safety Incident", "A major safety incident forces a fleet-wide review.", (10, 25), false, false, 0.002),
            template!(Operational, Critical, "Hub Shutdown", "A hub-wide systems failure halts operations entirely.", (5, 15), false, false, 0.002),

            template!(Market, Minor, "Competitor Fare Sale", "A rival briefly discounts fares on shared routes.", (2, 5), false, false, 0.026),
            template!(Market, Minor, "Niche Demand Uptick", "A local event nudges demand upward.", (1, 3), true, false, 0.026),
            template!(Market, Minor, "Loyalty Program Buzz", "A refreshed loyalty program nudges bookings up.", (2, 4), true, false, 0.025),
            template!(Market, Moderate, "New Entrant", "A new carrier enters the market aggressively.", (10, 20), false, false, 0.014),
            template!(Market, Moderate, "Convention Season", "A major convention boosts regional demand.", (3, 7), true, false, 0.016),
            template!(Market, Moderate, "Codeshare Expansion", "A new codeshare agreement widens the route network's reach.", (5, 10), true, false, 0.015),
            template!(Market, Major, "Price War", "An aggressive fare war breaks out on key routes.", (10, 25), false, false, 0.007),
            template!(Market, Major, "Tourism Boom", "A surge in tourism lifts demand broadly.", (10, 20), true, false, 0.007),
            template!(Market, Major, "Rival Bankruptcy", "A competitor's exit frees up demand across the network.", (10, 20), true, false, 0.006),
            template!(Market, Critical, "Market Consolidation", "A merger reshapes competitive dynamics industry-wide.", (20, 45), false, false, 0.002),
            template!(Market, Critical, "Mega Event Boom", "A mega sporting event drives unprecedented demand.", (5, 12), true, false, 0.002),
            template!(Market, Critical, "Industry-Wide Capacity Cut", "Widespread capacity cuts across the industry boost remaining demand.", (15, 30), true, false, 0.002),

            template!(PositivePR, Minor, "Friendly Press Mention", "A friendly local press mention lifts visibility.", (2, 5), true, false, 0.030),
            template!(PositivePR, Minor, "Punctuality Award", "An on-time-performance award draws attention.", (2, 5), true, false, 0.028),
            template!(PositivePR, Moderate, "Customer Service Feature", "A feature story praises customer service.", (5, 10), true, false, 0.016),
            template!(PositivePR, Moderate, "Charity Partnership", "A high-profile charity partnership earns goodwill.", (5, 10), true, false, 0.015),
            template!(PositivePR, Major, "Industry Award Win", "A major industry award drives a reputation surge.", (10, 20), true, false, 0.007),
            template!(PositivePR, Major, "Viral Customer Story", "A viral customer-service story boosts the brand.", (7, 15), true, false, 0.006),
            template!(PositivePR, Critical, "National Recognition", "National recognition for service excellence.", (15, 30), true, false, 0.002),
            template!(PositivePR, Critical, "Landmark Safety Record", "A landmark safety-record milestone makes headlines.", (15, 30), true, false, 0.002),

            template!(NegativePR, Minor, "Minor Complaint Cycle", "A cluster of customer complaints circulates.", (2, 5), false, false, 0.030),
            template!(NegativePR, Minor, "Social Media Gripe", "A minor service gripe trends locally.", (1, 3), false, false, 0.028),
            template!(NegativePR, Moderate, "Service Quality Story", "A news story criticizes service quality.", (5, 10), false, false, 0.016),
            template!(NegativePR, Moderate, "Overbooking Backlash", "Overbooking incidents draw public criticism.", (4, 9), false, false, 0.015),
            template!(NegativePR, Major, "Viral Complaint", "A viral complaint video damages the brand.", (10, 20), false, false, 0.007),
            template!(NegativePR, Major, "Regulatory Inquiry", "Regulators open an inquiry into service practices.", (10, 25), false, false, 0.006),
            template!(NegativePR, Critical, "Safety Scandal", "A safety scandal severely damages public trust.", (20, 40), false, false, 0.002),
            template!(NegativePR, Critical, "Executive Scandal", "An executive scandal dominates the news cycle.", (15, 35), false, false, 0.002),
        ]
    })
}

const COOLDOWN_DAYS: u64 = 3;

/// Pure event-generation logic: rolls at most one new event for an airline
/// on a given day, honoring per-template cooldowns.
pub struct EventEngine;

impl EventEngine {
    /// Attempt to roll a new event. `cooldowns` maps template index to the
    /// day it last fired and is updated in place when a template fires.
    pub fn roll(
        root_seed: u64,
        day: u64,
        label: &str,
        index: u64,
        cooldowns: &mut std::collections::HashMap<usize, u64>,
    ) -> Option<GameEvent> {
        let mut rng = child_rng(root_seed, label, day, index);
        let all = templates();

        for (idx, tmpl) in all.iter().enumerate() {
            if let Some(last) = cooldowns.get(&idx)
                && day < last + COOLDOWN_DAYS
            {
                continue;
            }
            if rng.gen_range(0.0..1.0) < tmpl.base_rate {
                cooldowns.insert(idx, day);
                return Some(Self::instantiate(tmpl, day, &mut rng));
            }
        }
        None
    }

    fn instantiate(tmpl: &EventTemplate, day: u64, rng: &mut impl Rng) -> GameEvent {
        let duration = rng.gen_range(tmpl.duration_range.0..=tmpl.duration_range.1);
        let (lo, hi) = tmpl.severity.magnitude_range();
        let magnitude = rng.gen_range(lo..=hi);
        let sign = if tmpl.favorable { 1.0 } else { -1.0 };

        let financial_impact = sign * magnitude * 2_000_000.0;
        let reputation_impact = sign * magnitude * 20.0;
        let demand_modifier = (1.0 + sign * magnitude).max(0.0);
        let cost_modifier = (1.0 - sign * magnitude * 0.5).max(0.0);

        GameEvent {
            id: EventId(0), // overwritten by Airline::push_event
            kind: tmpl.kind,
            severity: tmpl.severity,
            title: tmpl.title.to_string(),
            description: tmpl.description.to_string(),
            day_occurred: day,
            duration_days: duration,
            financial_impact,
            reputation_impact,
            demand_modifier,
            cost_modifier,
            scope: EventScope::AllRoutes,
            fuel_shock: tmpl.fuel_shock,
            fuel_shock_magnitude: 1.0 + magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_sixty_templates() {
        assert!(templates().len() >= 60, "only {} templates", templates().len());
    }

    #[test]
    fn instantaneous_event_is_never_active() {
        let e = GameEvent {
            id: EventId(0),
            kind: EventKind::Weather,
            severity: Severity::Minor,
            title: "x".into(),
            description: "x".into(),
            day_occurred: 10,
            duration_days: 0,
            financial_impact: 0.0,
            reputation_impact: 0.0,
            demand_modifier: 1.0,
            cost_modifier: 1.0,
            scope: EventScope::AllRoutes,
            fuel_shock: false,
            fuel_shock_magnitude: 1.0,
        };
        assert!(!e.is_active(10));
        assert!(!e.is_active(11));
    }

    #[test]
    fn active_predicate_matches_half_open_window() {
        let e = GameEvent {
            id: EventId(0),
            kind: EventKind::Weather,
            severity: Severity::Minor,
            title: "x".into(),
            description: "x".into(),
            day_occurred: 10,
            duration_days: 3,
            financial_impact: 0.0,
            reputation_impact: 0.0,
            demand_modifier: 1.0,
            cost_modifier: 1.0,
            scope: EventScope::AllRoutes,
            fuel_shock: false,
            fuel_shock_magnitude: 1.0,
        };
        assert!(!e.is_active(9));
        assert!(e.is_active(10));
        assert!(e.is_active(12));
        assert!(!e.is_active(13));
    }

    #[test]
    fn rolling_is_deterministic_for_same_seed() {
        let mut c1 = std::collections::HashMap::new();
        let mut c2 = std::collections::HashMap::new();
        let a = EventEngine::roll(99, 5, "events:player", 0, &mut c1);
        let b = EventEngine::roll(99, 5, "events:player", 0, &mut c2);
        assert_eq!(a.map(|e| e.title), b.map(|e| e.title));
    }
}
