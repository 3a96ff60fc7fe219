use crate::series::{assert_aligned, undefined, Series};
use crate::volatility::Atr;

/// Direction of a SuperTrend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// +1 for up, −1 for down.
    pub fn sign(self) -> f64 {
        match self {
            Trend::Up => 1.0,
            Trend::Down => -1.0,
        }
    }
}

/// SuperTrend: ATR bands around the bar midpoint that ratchet with price and
/// flip the trend when the close crosses the opposite band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperTrend {
    pub period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuperTrendOutput {
    /// The active band (lower band in an uptrend, upper band in a downtrend).
    pub value: Series,
    /// +1 / −1, undefined before the first bar with an ATR.
    pub direction: Series,
    /// Final (ratcheted) upper band.
    pub upper: Series,
    /// Final (ratcheted) lower band.
    pub lower: Series,
}

impl Default for SuperTrend {
    fn default() -> Self {
        Self::new(10, 3.0)
    }
}

impl SuperTrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "SuperTrend period must be >= 1");
        assert!(multiplier > 0.0, "SuperTrend multiplier must be positive");
        Self { period, multiplier }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> SuperTrendOutput {
        let atr = Atr::new(self.period).compute(high, low, close);
        self.compute_with_atr(high, low, close, &atr)
    }

    /// Same as [`SuperTrend::compute`] with a precomputed ATR of `period`.
    pub fn compute_with_atr(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        atr: &[f64],
    ) -> SuperTrendOutput {
        assert_aligned(&[high, low, close, atr]);
        let n = close.len();
        let mut out = SuperTrendOutput {
            value: undefined(n),
            direction: undefined(n),
            upper: undefined(n),
            lower: undefined(n),
        };
        let Some(start) = atr.iter().position(|v| !v.is_nan()) else {
            return out;
        };

        let basic = |i: usize| {
            let mid = (high[i] + low[i]) / 2.0;
            let offset = self.multiplier * atr[i];
            (mid + offset, mid - offset)
        };

        let (upper0, lower0) = basic(start);
        let mut state = (Trend::Up, upper0);
        out.value[start] = upper0;
        out.direction[start] = Trend::Up.sign();
        out.upper[start] = upper0;
        out.lower[start] = lower0;

        for i in start + 1..n {
            let (basic_upper, basic_lower) = basic(i);
            let (trend, active) = state;
            let prev_close = close[i - 1];

            let final_upper = if basic_upper < active || prev_close > active {
                basic_upper
            } else {
                active
            };
            let final_lower = if basic_lower > active || prev_close < active {
                basic_lower
            } else {
                active
            };

            state = match trend {
                Trend::Up if close[i] < final_lower => (Trend::Down, final_upper),
                Trend::Up => (Trend::Up, final_lower),
                Trend::Down if close[i] > final_upper => (Trend::Up, final_lower),
                Trend::Down => (Trend::Down, final_upper),
            };

            out.value[i] = state.1;
            out.direction[i] = state.0.sign();
            out.upper[i] = final_upper;
            out.lower[i] = final_lower;
        }
        out
    }
}
