use crate::moving_average::ema;
use crate::series::{assert_aligned, undefined, zip_with, Series};
use crate::volatility::Atr;

/// Average Directional Index with the +DI / −DI lines it is built from.
///
/// Directional movement and DX are smoothed with the same EMA as ATR.
/// Input shorter than `period + 1` bars is undefined throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adx {
    pub period: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdxOutput {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Adx {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self { period }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> AdxOutput {
        let atr = Atr::new(self.period).compute(high, low, close);
        self.compute_with_atr(high, low, close, &atr)
    }

    /// Same as [`Adx::compute`] with a precomputed ATR of the same period.
    pub fn compute_with_atr(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        atr: &[f64],
    ) -> AdxOutput {
        assert_aligned(&[high, low, close, atr]);
        let n = close.len();
        if n < self.period + 1 {
            return AdxOutput {
                adx: undefined(n),
                plus_di: undefined(n),
                minus_di: undefined(n),
            };
        }

        let mut plus_dm = vec![0.0; n];
        let mut minus_dm = vec![0.0; n];
        for i in 1..n {
            let up = high[i] - high[i - 1];
            let down = low[i - 1] - low[i];
            if up > down && up > 0.0 {
                plus_dm[i] = up;
            }
            if down > up && down > 0.0 {
                minus_dm[i] = down;
            }
        }

        let plus_di = directional_index(&ema(&plus_dm, self.period), atr);
        let minus_di = directional_index(&ema(&minus_dm, self.period), atr);

        let dx = zip_with(&plus_di, &minus_di, |p, m| {
            let sum = p + m;
            if sum.is_nan() {
                f64::NAN
            } else if sum == 0.0 {
                0.0
            } else {
                (p - m).abs() / sum * 100.0
            }
        });

        AdxOutput {
            adx: ema(&dx, self.period),
            plus_di,
            minus_di,
        }
    }
}

fn directional_index(dm_smooth: &[f64], atr: &[f64]) -> Series {
    zip_with(dm_smooth, atr, |dm, a| {
        if dm.is_nan() || a.is_nan() {
            f64::NAN
        } else if a == 0.0 {
            0.0
        } else {
            dm / a * 100.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_undefined() {
        let out = Adx::default().compute(&[1.0; 14], &[1.0; 14], &[1.0; 14]);
        assert!(out.adx.iter().all(|v| v.is_nan()));
        assert!(out.plus_di.iter().all(|v| v.is_nan()));
        assert_eq!(out.minus_di.len(), 14);
    }

    #[test]
    fn flat_market_has_zero_directional_index() {
        let flat = [5.0; 40];
        let out = Adx::default().compute(&flat, &flat, &flat);
        assert_eq!(out.plus_di[39], 0.0);
        assert_eq!(out.minus_di[39], 0.0);
        assert_eq!(out.adx[39], 0.0);
    }

    #[test]
    fn steady_uptrend_favours_plus_di() {
        let high: Vec<f64> = (0..60).map(|i| 101.0 + i as f64).collect();
        let low: Vec<f64> = (0..60).map(|i| 99.0 + i as f64).collect();
        let close: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = Adx::default().compute(&high, &low, &close);
        // ADX warms up after two chained EMAs
        assert!(out.adx[25].is_nan() && !out.adx[26].is_nan());
        assert!(out.plus_di[59] > out.minus_di[59]);
        assert_eq!(out.minus_di[59], 0.0);
        assert!(out.adx[59] > 25.0);
    }
}
