use crate::moving_average::ema;
use crate::series::{assert_aligned, filled, Series};

/// True range per bar. The first bar has no previous close, so it is `high − low`.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Series {
    assert_aligned(&[high, low, close]);
    let mut tr = Vec::with_capacity(close.len());
    for i in 0..close.len() {
        let hl = high[i] - low[i];
        if i == 0 {
            tr.push(hl);
        } else {
            let prev_close = close[i - 1];
            tr.push(
                hl.max((high[i] - prev_close).abs())
                    .max((low[i] - prev_close).abs()),
            );
        }
    }
    tr
}

/// Average True Range, EMA-smoothed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atr {
    pub period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }

    /// Zeros when fewer than two bars; otherwise EMA of the true range.
    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Series {
        assert_aligned(&[high, low, close]);
        if close.len() < 2 {
            return filled(close.len(), 0.0);
        }
        ema(&true_range(high, low, close), self.period)
    }
}
