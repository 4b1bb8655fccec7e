/// One carrier's inputs to a city-pair market-share computation.
#[derive(Debug, Clone, Copy)]
pub struct CarrierMarketInput {
    pub ticket_price: f64,
    pub reputation: f64,
    pub service_quality: f64,
}

const PRICE_WEIGHT: f64 = 0.40;
const REPUTATION_WEIGHT: f64 = 0.35;
const SERVICE_WEIGHT: f64 = 0.25;

/// Partitions demand on a city pair among the carriers serving it.
pub struct CompetitionSolver;

impl CompetitionSolver {
    /// Market share for every entry, in input order, summing to 1.0 (within
    /// float rounding). A single carrier always gets share 1.0.
    pub fn market_shares(carriers: &[CarrierMarketInput]) -> Vec<f64> {
        if carriers.len() <= 1 {
            return vec![1.0; carriers.len()];
        }

        let min_price = carriers.iter().map(|c| c.ticket_price).fold(f64::INFINITY, f64::min);
        let max_price = carriers.iter().map(|c| c.ticket_price).fold(f64::NEG_INFINITY, f64::max);

        let scores: Vec<f64> = carriers
            .iter()
            .map(|c| {
                let price_score = if (max_price - min_price).abs() < 1e-9 {
                    1.0
                } else {
                    0.3 + 0.7 * (max_price - c.ticket_price) / (max_price - min_price)
                };
                let reputation_score = c.reputation / 100.0;
                let service_score = c.service_quality;

                PRICE_WEIGHT * price_score + REPUTATION_WEIGHT * reputation_score + SERVICE_WEIGHT * service_score
            })
            .collect();

        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            let even = 1.0 / carriers.len() as f64;
            return vec![even; carriers.len()];
        }

        scores.iter().map(|s| s / total).collect()
    }
}
