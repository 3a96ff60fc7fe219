//! Moving averages: SMA, EMA, WMA, DEMA, TEMA, KAMA.
//!
//! All functions return a series aligned with the input. Input shorter than
//! the period yields an all-undefined series.

use crate::series::{first_defined, rolling, undefined, zip_with, Series};

/// Floor for KAMA's volatility term when prices did not move.
const KAMA_MIN_VOLATILITY: f64 = 1e-10;

/// Simple moving average. A window containing an undefined value is undefined.
pub fn sma(values: &[f64], period: usize) -> Series {
    assert!(period >= 1, "SMA period must be >= 1");
    rolling(values, period, |w| w.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average with multiplier `2 / (period + 1)`.
///
/// Leading undefined values are skipped: the seed is the simple mean of the
/// first `period` defined values, placed on the last of them. This lets EMAs
/// be chained (DEMA, TEMA, MACD signal line, ATR-based DX smoothing).
pub fn ema(values: &[f64], period: usize) -> Series {
    assert!(period >= 1, "EMA period must be >= 1");
    let mut out = undefined(values.len());
    let Some(start) = first_defined(values) else {
        return out;
    };
    if values.len() - start < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed_idx = start + period - 1;
    let mut prev = values[start..=seed_idx].iter().sum::<f64>() / period as f64;
    out[seed_idx] = prev;

    for (slot, &value) in out[seed_idx + 1..].iter_mut().zip(&values[seed_idx + 1..]) {
        prev += k * (value - prev);
        *slot = prev;
    }
    out
}

/// Linearly weighted moving average, weights `1..=period` (newest heaviest).
pub fn wma(values: &[f64], period: usize) -> Series {
    assert!(period >= 1, "WMA period must be >= 1");
    let weight_sum = (period * (period + 1)) as f64 / 2.0;
    rolling(values, period, |w| {
        w.iter()
            .enumerate()
            .map(|(i, v)| v * (i + 1) as f64)
            .sum::<f64>()
            / weight_sum
    })
}

/// Double EMA: `2·EMA − EMA(EMA)`.
pub fn dema(values: &[f64], period: usize) -> Series {
    let ema1 = ema(values, period);
    let ema2 = ema(&ema1, period);
    zip_with(&ema1, &ema2, |e1, e2| 2.0 * e1 - e2)
}

/// Triple EMA: `3·EMA − 3·EMA(EMA) + EMA(EMA(EMA))`.
pub fn tema(values: &[f64], period: usize) -> Series {
    let ema1 = ema(values, period);
    let ema2 = ema(&ema1, period);
    let ema3 = ema(&ema2, period);
    ema1.iter()
        .zip(&ema2)
        .zip(&ema3)
        .map(|((e1, e2), e3)| 3.0 * e1 - 3.0 * e2 + e3)
        .collect()
}

/// Kaufman's adaptive moving average.
///
/// The efficiency ratio (net change over `period` bars divided by the sum of
/// absolute bar-to-bar changes) interpolates between the fast and slow
/// smoothing constants; the result is squared. Seeded with the price at
/// `period - 1`.
pub fn kama(values: &[f64], period: usize, fast: usize, slow: usize) -> Series {
    assert!(period >= 1, "KAMA period must be >= 1");
    let n = values.len();
    let mut out = undefined(n);
    if n < period {
        return out;
    }

    let fast_sc = 2.0 / (fast as f64 + 1.0);
    let slow_sc = 2.0 / (slow as f64 + 1.0);

    out[period - 1] = values[period - 1];
    for i in period..n {
        let change = (values[i] - values[i - period]).abs();
        let volatility: f64 = values[i - period..=i]
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .sum();
        let volatility = if volatility == 0.0 {
            KAMA_MIN_VOLATILITY
        } else {
            volatility
        };
        let er = change / volatility;
        let sc = (er * (fast_sc - slow_sc) + slow_sc).powi(2);
        out[i] = out[i - 1] + sc * (values[i] - out[i - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sma_warm_up_and_values() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn short_input_is_undefined() {
        let prices = [1.0, 2.0];
        assert!(sma(&prices, 3).iter().all(|v| v.is_nan()));
        assert!(ema(&prices, 3).iter().all(|v| v.is_nan()));
        assert!(wma(&prices, 3).iter().all(|v| v.is_nan()));
        assert!(kama(&prices, 3, 2, 30).iter().all(|v| v.is_nan()));
        assert_eq!(ema(&prices, 3).len(), 2);
    }

    #[test]
    fn ema_of_constant_series_is_constant_from_seed() {
        let prices = vec![42.0; 30];
        let out = ema(&prices, 10);
        assert!(out[..9].iter().all(|v| v.is_nan()));
        assert!(out[9..].iter().all(|&v| v == 42.0));
    }

    #[test]
    fn ema_seed_is_simple_mean_then_recursive() {
        let out = ema(&[2.0, 4.0, 6.0, 8.0], 3);
        assert_close(out[2], 4.0);
        // k = 0.5
        assert_close(out[3], 6.0);
    }

    #[test]
    fn ema_skips_leading_undefined_values() {
        let values = [f64::NAN, f64::NAN, 1.0, 2.0, 3.0];
        let out = ema(&values, 3);
        assert!(out[..4].iter().all(|v| v.is_nan()));
        assert_close(out[4], 2.0);
    }

    #[test]
    fn wma_weights_newest_heaviest() {
        let out = wma(&[1.0, 2.0, 3.0], 3);
        // (1*1 + 2*2 + 3*3) / 6
        assert_close(out[2], 14.0 / 6.0);
    }

    #[test]
    fn dema_and_tema_track_linear_trend() {
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let d = dema(&prices, 5);
        let t = tema(&prices, 5);
        // chained warm-up: 2*(period-1) and 3*(period-1)
        assert!(d[7].is_nan() && !d[8].is_nan());
        assert!(t[11].is_nan() && !t[12].is_nan());
        // both remove most of the EMA lag on a steady trend
        let e = ema(&prices, 5);
        let last = prices[79];
        assert!((last - d[79]).abs() < (last - e[79]).abs());
        assert!((last - t[79]).abs() <= (last - d[79]).abs() + 1e-9);
    }

    #[test]
    fn kama_is_flat_when_prices_are_flat() {
        let out = kama(&[5.0; 20], 10, 2, 30);
        assert!(out[..9].iter().all(|v| v.is_nan()));
        assert!(out[9..].iter().all(|&v| v == 5.0));
    }

    #[test]
    fn kama_tracks_an_efficient_trend_closely() {
        // Perfectly efficient move: ER = 1, smoothing constant = (2/3)^2.
        let trend: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let out = kama(&trend, 10, 2, 30);
        assert_eq!(out[9], 9.0);
        let lag = trend[29] - out[29];
        assert!(lag > 0.0 && lag < 1.25, "lag {lag}");
    }
}
