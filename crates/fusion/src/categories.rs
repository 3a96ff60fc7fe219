//! Category weights and decision thresholds.

use common::SignalType;

/// Weight of each sub-score in the combined score.
pub struct CategoryWeights;

impl CategoryWeights {
    pub const TREND: f64 = 0.35;
    pub const MOMENTUM: f64 = 0.40;
    pub const VOLATILITY: f64 = 0.25;

    /// Weighted sum of the three sub-scores.
    pub fn combine(trend: f64, momentum: f64, volatility: f64) -> f64 {
        trend * Self::TREND + momentum * Self::MOMENTUM + volatility * Self::VOLATILITY
    }

    /// Verify weights sum to 1.0
    pub fn verify() -> bool {
        (Self::TREND + Self::MOMENTUM + Self::VOLATILITY - 1.0).abs() < 1e-9
    }
}

/// Combined-score cut-offs. Compiled-in constants.
pub struct DecisionThresholds;

impl DecisionThresholds {
    pub const BUY: f64 = 0.3;
    pub const SELL: f64 = -0.3;
}

/// BUY above the buy threshold, SELL below the sell threshold, HOLD otherwise.
pub fn decide(combined: f64) -> SignalType {
    if combined > DecisionThresholds::BUY {
        SignalType::Buy
    } else if combined < DecisionThresholds::SELL {
        SignalType::Sell
    } else {
        SignalType::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!(CategoryWeights::verify());
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(decide(0.3), SignalType::Hold);
        assert_eq!(decide(0.3001), SignalType::Buy);
        assert_eq!(decide(-0.3), SignalType::Hold);
        assert_eq!(decide(-0.31), SignalType::Sell);
        assert_eq!(decide(0.0), SignalType::Hold);
    }
}
