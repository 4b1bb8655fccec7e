use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::child_rng;

pub const FUEL_PRICE_MIN: f64 = 1.50;
pub const FUEL_PRICE_MAX: f64 = 6.00;
pub const FUEL_PRICE_BASELINE: f64 = 3.00;
const TREND_MIN: f64 = -0.2;
const TREND_MAX: f64 = 0.2;
const TREND_UPDATE_INTERVAL_DAYS: u64 = 30;

/// Per-gallon fuel market shared by every carrier in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelMarket {
    pub price: f64,
    pub ema_30d: f64,
    pub trend: f64,
    pub days_since_trend_update: u64,
}

impl Default for FuelMarket {
    fn default() -> Self {
        FuelMarket {
            price: FUEL_PRICE_BASELINE,
            ema_30d: FUEL_PRICE_BASELINE,
            trend: 0.0,
            days_since_trend_update: 0,
        }
    }
}

fn seasonal_multiplier(day: u64) -> f64 {
    let d = day % 365;
    if !(60..335).contains(&d) {
        1.08 // winter
    } else if d < 151 {
        1.02 // spring
    } else if d < 243 {
        1.12 // summer
    } else {
        0.95 // fall
    }
}

impl FuelMarket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fuel market by one day, rooted at `root_seed` so the
    /// sequence replays bit-identically from a given seed.
    pub fn update(&mut self, day: u64, root_seed: u64) {
        let mut rng = child_rng(root_seed, "fuel", day, 0);

        self.days_since_trend_update += 1;
        if self.days_since_trend_update >= TREND_UPDATE_INTERVAL_DAYS {
            self.trend = (self.trend + rng.gen_range(-0.05..0.05)).clamp(TREND_MIN, TREND_MAX);
            self.days_since_trend_update = 0;
        }

        let u: f64 = rng.gen_range(0.0..1.0);
        let daily_pct = if u < 0.70 {
            rng.gen_range(-0.02..0.02)
        } else if u < 0.90 {
            rng.gen_range(-0.05..0.05)
        } else {
            rng.gen_range(-0.10..0.10)
        };

        let daily_change = self.price * daily_pct;
        let seasonal = seasonal_multiplier(day);
        let new_price = ((self.price + daily_change + FUEL_PRICE_BASELINE * self.trend) * seasonal)
            .clamp(FUEL_PRICE_MIN, FUEL_PRICE_MAX);

        self.price = new_price;
        self.ema_30d = (self.ema_30d * 29.0 + new_price) / 30.0;
    }

    /// One-shot multiplicative jolt to the current price. Duration is
    /// accepted but not tracked, see the crate-level design notes.
    pub fn apply_shock(&mut self, magnitude: f64, _duration_days: u64) {
        self.price = (self.price * magnitude).clamp(FUEL_PRICE_MIN, FUEL_PRICE_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_upper_bound() {
        let mut m = FuelMarket {
            price: 5.95,
            ema_30d: 5.95,
            trend: 0.0,
            days_since_trend_update: 0,
        };
        m.apply_shock(1.10, 0);
        assert_eq!(m.price, FUEL_PRICE_MAX);
    }

    #[test]
    fn clamps_at_lower_bound() {
        let mut m = FuelMarket {
            price: 1.55,
            ema_30d: 1.55,
            trend: 0.0,
            days_since_trend_update: 0,
        };
        m.apply_shock(0.50, 0);
        assert_eq!(m.price, FUEL_PRICE_MIN);
    }

    #[test]
    fn update_stays_within_bounds_over_many_days() {
        let mut m = FuelMarket::new();
        for day in 0..2000 {
            m.update(day, 42);
            assert!(m.price >= FUEL_PRICE_MIN && m.price <= FUEL_PRICE_MAX);
        }
    }

    #[test]
    fn deterministic_given_same_seed() {
        let mut a = FuelMarket::new();
        let mut b = FuelMarket::new();
        for day in 0..100 {
            a.update(day, 7);
            b.update(day, 7);
        }
        assert_eq!(a, b);
    }
}
