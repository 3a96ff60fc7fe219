//! Volume-based indicators. Only computed when every bar carries a volume.

use crate::series::{assert_aligned, filled, typical_prices, undefined, Series};

/// On-balance volume. Starts at the first bar's volume; zeros for fewer than two bars.
pub fn obv(close: &[f64], volume: &[f64]) -> Series {
    assert_aligned(&[close, volume]);
    let n = close.len();
    if n < 2 {
        return filled(n, 0.0);
    }
    let mut out = Vec::with_capacity(n);
    out.push(volume[0]);
    for i in 1..n {
        let prev = out[i - 1];
        let next = if close[i] > close[i - 1] {
            prev + volume[i]
        } else if close[i] < close[i - 1] {
            prev - volume[i]
        } else {
            prev
        };
        out.push(next);
    }
    out
}

/// Cumulative volume-weighted typical price; 0 while no volume has traded.
pub fn vwap(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Series {
    assert_aligned(&[close, volume]);
    let mut cum_pv = 0.0;
    let mut cum_vol = 0.0;
    typical_prices(high, low, close)
        .into_iter()
        .zip(volume)
        .map(|(tp, &vol)| {
            cum_pv += tp * vol;
            cum_vol += vol;
            if cum_vol == 0.0 {
                0.0
            } else {
                cum_pv / cum_vol
            }
        })
        .collect()
}

/// Money Flow Index: volume-weighted RSI over typical price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mfi {
    pub period: usize,
}

impl Default for Mfi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Mfi {
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MFI period must be >= 1");
        Self { period }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Series {
        assert_aligned(&[high, low, close, volume]);
        let n = close.len();
        if n < self.period + 1 {
            return filled(n, Self::NEUTRAL);
        }

        let tp = typical_prices(high, low, close);
        let mut positive = vec![0.0; n];
        let mut negative = vec![0.0; n];
        for i in 1..n {
            let flow = tp[i] * volume[i];
            if tp[i] > tp[i - 1] {
                positive[i] = flow;
            } else if tp[i] < tp[i - 1] {
                negative[i] = flow;
            }
        }

        let mut out = undefined(n);
        for i in self.period..n {
            let window = i + 1 - self.period..=i;
            let pos: f64 = positive[window.clone()].iter().sum();
            let neg: f64 = negative[window].iter().sum();
            out[i] = if neg == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + pos / neg)
            };
        }
        out
    }
}

/// Volume outputs of the indicator bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeIndicators {
    pub obv: Series,
    pub mfi: Series,
    pub vwap: Series,
}

impl VolumeIndicators {
    pub fn compute(mfi: Mfi, high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Self {
        Self {
            obv: obv(close, volume),
            mfi: mfi.compute(high, low, close, volume),
            vwap: vwap(high, low, close, volume),
        }
    }
}
