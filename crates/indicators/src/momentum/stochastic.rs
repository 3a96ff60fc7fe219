use crate::moving_average::sma;
use crate::series::{assert_aligned, filled, rolling_max, rolling_min, undefined, Series};

/// Stochastic oscillator (%K smoothed, %D).
///
/// Raw %K = (close − lowest low) / (highest high − lowest low) · 100 over
/// `k_period` bars, 50 when the window has no range. The returned %K is the
/// SMA of raw %K over `smooth`; %D is the SMA of that over `d_period`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stochastic {
    pub k_period: usize,
    pub d_period: usize,
    pub smooth: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StochasticOutput {
    pub k: Series,
    pub d: Series,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(14, 3, 3)
    }
}

impl Stochastic {
    /// Neutral reading for both lines on short input.
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(k_period: usize, d_period: usize, smooth: usize) -> Self {
        assert!(
            k_period >= 1 && d_period >= 1 && smooth >= 1,
            "Stochastic periods must be >= 1"
        );
        Self {
            k_period,
            d_period,
            smooth,
        }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> StochasticOutput {
        assert_aligned(&[high, low, close]);
        let n = close.len();
        if n < self.k_period {
            return StochasticOutput {
                k: filled(n, Self::NEUTRAL),
                d: filled(n, Self::NEUTRAL),
            };
        }

        let highest = rolling_max(high, self.k_period);
        let lowest = rolling_min(low, self.k_period);
        let mut raw = undefined(n);
        for i in self.k_period - 1..n {
            let range = highest[i] - lowest[i];
            raw[i] = if range == 0.0 {
                Self::NEUTRAL
            } else {
                (close[i] - lowest[i]) / range * 100.0
            };
        }

        let k = sma(&raw, self.smooth);
        let d = sma(&k, self.d_period);
        StochasticOutput { k, d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_neutral() {
        let out = Stochastic::default().compute(&[2.0; 5], &[1.0; 5], &[1.5; 5]);
        assert_eq!(out.k, vec![50.0; 5]);
        assert_eq!(out.d, vec![50.0; 5]);
    }

    #[test]
    fn zero_range_window_reads_fifty() {
        let flat = [10.0; 30];
        let out = Stochastic::default().compute(&flat, &flat, &flat);
        assert!(out.k[14].is_nan() && out.k[15] == 50.0);
        assert!(out.d[16].is_nan() && out.d[17] == 50.0);
        assert_eq!(*out.d.last().unwrap(), 50.0);
    }

    #[test]
    fn close_at_window_high_reads_hundred() {
        let high: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 2.0).collect();
        let out = Stochastic::new(5, 3, 1).compute(&high, &low, &high);
        assert_eq!(out.k[19], 100.0);
    }
}
