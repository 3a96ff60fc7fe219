use super::{Atr, Bands};
use crate::moving_average::ema;
use crate::series::{assert_aligned, rolling_max, rolling_min, zip_with, Series};

/// Keltner channels: EMA of close ± `multiplier` × ATR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keltner {
    pub ema_period: usize,
    pub atr_period: usize,
    pub multiplier: f64,
}

impl Default for Keltner {
    fn default() -> Self {
        Self::new(20, 10, 2.0)
    }
}

impl Keltner {
    pub fn new(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        assert!(ema_period >= 1 && atr_period >= 1, "Keltner periods must be >= 1");
        Self {
            ema_period,
            atr_period,
            multiplier,
        }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> Bands {
        let atr = Atr::new(self.atr_period).compute(high, low, close);
        self.compute_with_atr(close, &atr)
    }

    /// Same as [`Keltner::compute`] with a precomputed ATR of `atr_period`.
    pub fn compute_with_atr(&self, close: &[f64], atr: &[f64]) -> Bands {
        assert_aligned(&[close, atr]);
        let middle = ema(close, self.ema_period);
        let upper = zip_with(&middle, atr, |m, a| m + self.multiplier * a);
        let lower = zip_with(&middle, atr, |m, a| m - self.multiplier * a);
        Bands {
            upper,
            middle,
            lower,
        }
    }
}

/// Donchian channels: highest high / lowest low over `period` bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donchian {
    pub period: usize,
}

impl Default for Donchian {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Donchian {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self { period }
    }

    pub fn compute(&self, high: &[f64], low: &[f64]) -> Bands {
        assert_aligned(&[high, low]);
        let upper: Series = rolling_max(high, self.period);
        let lower: Series = rolling_min(low, self.period);
        let middle = zip_with(&upper, &lower, |u, l| (u + l) / 2.0);
        Bands {
            upper,
            middle,
            lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donchian_tracks_window_extremes() {
        let high = [5.0, 7.0, 6.0, 4.0];
        let low = [3.0, 4.0, 2.0, 1.0];
        let bands = Donchian::new(3).compute(&high, &low);
        assert!(bands.upper[1].is_nan());
        assert_eq!(&bands.upper[2..], &[7.0, 7.0]);
        assert_eq!(&bands.lower[2..], &[2.0, 1.0]);
        assert_eq!(bands.middle[3], 4.0);
    }

    #[test]
    fn donchian_short_input_is_undefined() {
        let bands = Donchian::default().compute(&[1.0; 5], &[0.5; 5]);
        assert!(bands.middle.iter().all(|v| v.is_nan()));
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn donchian_rejects_misaligned_columns() {
        Donchian::new(2).compute(&[3.0, 4.0, 5.0], &[1.0]);
    }

    #[test]
    fn keltner_envelope_is_symmetric() {
        let high = [11.0; 30];
        let low = [9.0; 30];
        let close = [10.0; 30];
        let bands = Keltner::default().compute(&high, &low, &close);
        assert_eq!(bands.middle[29], 10.0);
        assert_eq!(bands.upper[29], 14.0);
        assert_eq!(bands.lower[29], 6.0);
    }
}
