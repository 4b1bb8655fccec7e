use serde::{Deserialize, Serialize};

/// Market-size tier for an airport, mapped to a base-demand magnitude by
/// [`MarketSize::base_demand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSize {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl MarketSize {
    /// Base demand magnitude used by the route simulator.
    pub fn base_demand(self) -> u32 {
        match self {
            MarketSize::Small => 100,
            MarketSize::Medium => 300,
            MarketSize::Large => 600,
            MarketSize::VeryLarge => 1000,
        }
    }

    /// 1..4 weight used by the AI's route-scoring heuristic.
    pub fn score_weight(self) -> u32 {
        match self {
            MarketSize::Small => 1,
            MarketSize::Medium => 2,
            MarketSize::Large => 3,
            MarketSize::VeryLarge => 4,
        }
    }
}

/// A compiled-in, immutable airport record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub market_size: MarketSize,
    pub landing_fee: f64,
    pub hub: bool,
}

const AIRPORTS: &[Airport] = &[
    Airport {
        code: "JFK",
        name: "John F. Kennedy International",
        city: "New York",
        market_size: MarketSize::VeryLarge,
        landing_fee: 2500.0,
        hub: true,
    },
    Airport {
        code: "LAX",
        name: "Los Angeles International",
        city: "Los Angeles",
        market_size: MarketSize::VeryLarge,
        landing_fee: 2200.0,
        hub: true,
    },
    Airport {
        code: "ORD",
        name: "O'Hare International",
        city: "Chicago",
        market_size: MarketSize::VeryLarge,
        landing_fee: 2000.0,
        hub: true,
    },
    Airport {
        code: "ATL",
        name: "Hartsfield-Jackson Atlanta International",
        city: "Atlanta",
        market_size: MarketSize::VeryLarge,
        landing_fee: 1800.0,
        hub: true,
    },
    Airport {
        code: "DFW",
        name: "Dallas/Fort Worth International",
        city: "Dallas",
        market_size: MarketSize::VeryLarge,
        landing_fee: 1900.0,
        hub: true,
    },
    Airport {
        code: "MIA",
        name: "Miami International",
        city: "Miami",
        market_size: MarketSize::Large,
        landing_fee: 1700.0,
        hub: false,
    },
    Airport {
        code: "SEA",
        name: "Seattle-Tacoma International",
        city: "Seattle",
        market_size: MarketSize::Large,
        landing_fee: 1600.0,
        hub: false,
    },
    Airport {
        code: "LAS",
        name: "Harry Reid International",
        city: "Las Vegas",
        market_size: MarketSize::Large,
        landing_fee: 1500.0,
        hub: false,
    },
    Airport {
        code: "BOS",
        name: "Logan International",
        city: "Boston",
        market_size: MarketSize::Large,
        landing_fee: 1800.0,
        hub: false,
    },
    Airport {
        code: "SFO",
        name: "San Francisco International",
        city: "San Francisco",
        market_size: MarketSize::Large,
        landing_fee: 2100.0,
        hub: false,
    },
    Airport {
        code: "DEN",
        name: "Denver International",
        city: "Denver",
        market_size: MarketSize::Medium,
        landing_fee: 1400.0,
        hub: false,
    },
    Airport {
        code: "PHX",
        name: "Phoenix Sky Harbor International",
        city: "Phoenix",
        market_size: MarketSize::Medium,
        landing_fee: 1300.0,
        hub: false,
    },
    Airport {
        code: "MSP",
        name: "Minneapolis-Saint Paul International",
        city: "Minneapolis",
        market_size: MarketSize::Medium,
        landing_fee: 1200.0,
        hub: false,
    },
    Airport {
        code: "DTW",
        name: "Detroit Metropolitan Wayne County",
        city: "Detroit",
        market_size: MarketSize::Medium,
        landing_fee: 1100.0,
        hub: false,
    },
    Airport {
        code: "PHL",
        name: "Philadelphia International",
        city: "Philadelphia",
        market_size: MarketSize::Medium,
        landing_fee: 1300.0,
        hub: false,
    },
];

/// Full airport catalog, in the fixed order listed in the spec.
pub fn airport_catalog() -> &'static [Airport] {
    AIRPORTS
}

/// Look up an airport by its three-letter code.
pub fn find_airport(code: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

const DEFAULT_DISTANCE_NM: f64 = 1000.0;

/// The 35 hand-listed city-pair distances (nautical miles), unordered.
const DISTANCES: &[(&str, &str, f64)] = &[
    ("JFK", "LAX", 2145.0),
    ("JFK", "ORD", 652.0),
    ("JFK", "ATL", 665.0),
    ("JFK", "DFW", 1195.0),
    ("JFK", "MIA", 956.0),
    ("JFK", "SEA", 2153.0),
    ("JFK", "LAS", 2005.0),
    ("JFK", "BOS", 161.0),
    ("JFK", "SFO", 2246.0),
    ("JFK", "DEN", 1391.0),
    ("JFK", "PHX", 1848.0),
    ("JFK", "MSP", 901.0),
    ("JFK", "DTW", 488.0),
    ("JFK", "PHL", 83.0),
    ("LAX", "ORD", 1514.0),
    ("LAX", "ATL", 1706.0),
    ("LAX", "DFW", 1085.0),
    ("LAX", "MIA", 2022.0),
    ("LAX", "SEA", 803.0),
    ("LAX", "LAS", 205.0),
    ("LAX", "BOS", 2218.0),
    ("LAX", "SFO", 293.0),
    ("LAX", "DEN", 830.0),
    ("LAX", "PHX", 337.0),
    ("ORD", "ATL", 524.0),
    ("ORD", "DFW", 689.0),
    ("ORD", "MIA", 1014.0),
    ("ORD", "SEA", 1447.0),
    ("ORD", "DEN", 768.0),
    ("ATL", "DFW", 579.0),
    ("ATL", "MIA", 546.0),
    ("DFW", "SEA", 1413.0),
    ("SEA", "DEN", 818.0),
    ("BOS", "SFO", 2417.0),
    ("DEN", "PHX", 487.0),
];

/// Nautical-mile distance between two airport codes, unordered. Falls back to
/// 1000 NM when the pair is not in the hand-listed table.
pub fn distance(a: &str, b: &str) -> f64 {
    if a.eq_ignore_ascii_case(b) {
        return 0.0;
    }
    DISTANCES
        .iter()
        .find(|(x, y, _)| {
            (x.eq_ignore_ascii_case(a) && y.eq_ignore_ascii_case(b))
                || (x.eq_ignore_ascii_case(b) && y.eq_ignore_ascii_case(a))
        })
        .map(|(_, _, nm)| *nm)
        .unwrap_or(DEFAULT_DISTANCE_NM)
}
