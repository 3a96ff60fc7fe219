use crate::series::{filled, undefined, Series};

/// RSI (Relative Strength Index) indicator.
///
/// Uses Wilder's smoothed moving average (same as TradingView / standard RSI).
/// Input shorter than `period + 1` closes yields 50 (neutral) for every bar.
/// Otherwise the first `period` entries are undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rsi {
    pub period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    /// Neutral reading used for short input.
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    /// Compute RSI from a slice of close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Series {
        let n = closes.len();
        if n < self.period + 1 {
            return filled(n, Self::NEUTRAL);
        }

        let period = self.period as f64;
        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let initial = &changes[..self.period];

        // First average gain/loss over the initial `period` changes
        let mut avg_gain = initial.iter().filter(|&&c| c > 0.0).sum::<f64>() / period;
        let mut avg_loss = initial.iter().filter(|&&c| c < 0.0).map(|c| c.abs()).sum::<f64>() / period;

        let mut out = undefined(n);
        out[self.period] = rsi_from_averages(avg_gain, avg_loss);

        // Wilder smoothing over remaining changes; change i moves close i -> i + 1
        for (i, &change) in changes.iter().enumerate().skip(self.period) {
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            out[i + 1] = rsi_from_averages(avg_gain, avg_loss);
        }
        out
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
