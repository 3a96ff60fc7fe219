//! Static price levels derived from single high/low/close values.

use serde::{Deserialize, Serialize};

/// Standard floor-trader pivot points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl PivotPoints {
    pub fn from_bar(high: f64, low: f64, close: f64) -> Self {
        let pivot = (high + low + close) / 3.0;
        let range = high - low;
        Self {
            pivot,
            r1: 2.0 * pivot - low,
            s1: 2.0 * pivot - high,
            r2: pivot + range,
            s2: pivot - range,
            r3: high + 2.0 * (pivot - low),
            s3: low - 2.0 * (high - pivot),
        }
    }
}

/// Retracement ratios, from the high (0%) to the low (100%).
pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Fibonacci retracement levels between a swing high and low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub high: f64,
    pub low: f64,
}

impl FibonacciLevels {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// Price at `ratio` of the way down from the high.
    pub fn level(&self, ratio: f64) -> f64 {
        self.high - (self.high - self.low) * ratio
    }

    /// `(ratio, price)` for every standard ratio.
    pub fn levels(&self) -> [(f64, f64); 7] {
        FIBONACCI_RATIOS.map(|r| (r, self.level(r)))
    }
}
