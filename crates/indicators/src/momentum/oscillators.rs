//! Window oscillators: Williams %R, CCI, Momentum, Rate of Change.

use crate::series::{
    assert_aligned, filled, rolling_max, rolling_min, typical_prices, undefined, Series,
};

// ─── Williams %R ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilliamsR {
    pub period: usize,
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl WilliamsR {
    pub const NEUTRAL: f64 = -50.0;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self { period }
    }

    /// Values lie in `[-100, 0]`; -50 for short input and zero-range windows.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Series {
        assert_aligned(&[high, low, close]);
        let n = close.len();
        if n < self.period {
            return filled(n, Self::NEUTRAL);
        }
        let highest = rolling_max(high, self.period);
        let lowest = rolling_min(low, self.period);
        let mut out = undefined(n);
        for i in self.period - 1..n {
            let range = highest[i] - lowest[i];
            out[i] = if range == 0.0 {
                Self::NEUTRAL
            } else {
                (highest[i] - close[i]) / range * -100.0
            };
        }
        out
    }
}

// ─── Commodity Channel Index ─────────────────────────────────────────────────

/// Lambert's constant scaling CCI so ~75% of readings fall within ±100.
pub const CCI_CONSTANT: f64 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cci {
    pub period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self { period }
    }

    /// CCI over typical price `(h + l + c) / 3`.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Series {
        let tp = typical_prices(high, low, close);
        let n = tp.len();
        if n < self.period {
            return filled(n, 0.0);
        }

        let period = self.period as f64;
        let mut out = undefined(n);
        for (i, window) in tp.windows(self.period).enumerate() {
            let mean = window.iter().sum::<f64>() / period;
            let mean_deviation = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period;
            let idx = i + self.period - 1;
            out[idx] = if mean_deviation == 0.0 {
                0.0
            } else {
                (tp[idx] - mean) / (CCI_CONSTANT * mean_deviation)
            };
        }
        out
    }
}

// ─── Momentum / ROC ──────────────────────────────────────────────────────────

/// Price difference over `period` bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    pub period: usize,
}

impl Default for Momentum {
    fn default() -> Self {
        Self { period: 10 }
    }
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self { period }
    }

    pub fn compute(&self, closes: &[f64]) -> Series {
        lagged(closes, self.period, |now, then| now - then)
    }
}

/// Percentage change over `period` bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roc {
    pub period: usize,
}

impl Default for Roc {
    fn default() -> Self {
        Self { period: 12 }
    }
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self { period }
    }

    pub fn compute(&self, closes: &[f64]) -> Series {
        lagged(closes, self.period, |now, then| {
            if then == 0.0 {
                0.0
            } else {
                (now - then) / then * 100.0
            }
        })
    }
}

/// `f(close[i], close[i - period])`; zeros when fewer than `period + 1` closes.
fn lagged<F>(closes: &[f64], period: usize, f: F) -> Series
where
    F: Fn(f64, f64) -> f64,
{
    let n = closes.len();
    if n < period + 1 {
        return filled(n, 0.0);
    }
    let mut out = undefined(n);
    for i in period..n {
        out[i] = f(closes[i], closes[i - period]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_fallbacks() {
        let prices = [1.0, 2.0, 3.0];
        assert_eq!(WilliamsR::default().compute(&prices, &prices, &prices), vec![-50.0; 3]);
        assert_eq!(Cci::default().compute(&prices, &prices, &prices), vec![0.0; 3]);
        assert_eq!(Momentum::default().compute(&prices), vec![0.0; 3]);
        assert_eq!(Roc::new(3).compute(&prices), vec![0.0; 3]);
    }

    #[test]
    fn zero_range_bars_are_neutral() {
        let flat = [7.0; 25];
        let w = WilliamsR::default().compute(&flat, &flat, &flat);
        let c = Cci::default().compute(&flat, &flat, &flat);
        assert!(w[12].is_nan());
        assert!(w[13..].iter().all(|&v| v == -50.0));
        assert!(c[18].is_nan());
        assert!(c[19..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn williams_r_at_window_low_is_minus_hundred() {
        let high = [10.0, 11.0, 12.0];
        let low = [9.0, 8.0, 7.0];
        let out = WilliamsR::new(3).compute(&high, &low, &low);
        assert_eq!(out[2], -100.0);
    }

    #[test]
    fn cci_known_value() {
        // flat bars: tp = close = [1, 2, 3]; mean 2, mean deviation 2/3
        let c = [1.0, 2.0, 3.0];
        let out = Cci::new(3).compute(&c, &c, &c);
        let expected = 1.0 / (CCI_CONSTANT * (2.0 / 3.0));
        assert!((out[2] - expected).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn cci_rejects_a_longer_close_column() {
        let hl = [1.0, 2.0, 3.0];
        Cci::new(3).compute(&hl, &hl, &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn williams_r_rejects_short_low_column() {
        WilliamsR::new(2).compute(&[1.0, 2.0], &[1.0], &[1.0, 2.0]);
    }

    #[test]
    fn momentum_and_roc_over_lag() {
        let prices = [100.0, 102.0, 105.0, 110.0];
        let m = Momentum::new(2).compute(&prices);
        let r = Roc::new(2).compute(&prices);
        assert!(m[1].is_nan());
        assert_eq!(&m[2..], &[5.0, 8.0]);
        assert!((r[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn roc_with_zero_prior_price_is_zero() {
        let out = Roc::new(1).compute(&[0.0, 5.0]);
        assert_eq!(out[1], 0.0);
    }
}
