use crate::moving_average::ema;
use crate::series::{zip_with, Series};

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal_period),
/// Histogram = MACD − Signal. The signal line starts `signal - 1` bars after
/// the first defined MACD value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// The three aligned MACD lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdOutput {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(
            fast < slow,
            "MACD fast period must be less than slow period"
        );
        Self { fast, slow, signal }
    }

    /// Compute MACD from a slice of close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> MacdOutput {
        let fast = ema(closes, self.fast);
        let slow = ema(closes, self.slow);
        let macd = zip_with(&fast, &slow, |f, s| f - s);
        let signal = ema(&macd, self.signal);
        let histogram = zip_with(&macd, &signal, |m, s| m - s);
        MacdOutput {
            macd,
            signal,
            histogram,
        }
    }
}
