//! Helpers for indicator output series.
//!
//! An indicator output has exactly one entry per input bar. Positions that
//! cannot be computed yet hold `f64::NAN`, the undefined sentinel.

/// One value per input bar, `NAN` where undefined.
pub type Series = Vec<f64>;

/// A series of `len` undefined values.
pub fn undefined(len: usize) -> Series {
    vec![f64::NAN; len]
}

/// A series of `len` copies of `value`. Used for short-input fallbacks.
pub fn filled(len: usize, value: f64) -> Series {
    vec![value; len]
}

/// Last value of the series, or `None` when empty or undefined.
pub fn latest(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| !v.is_nan())
}

/// Index of the first defined value.
pub fn first_defined(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_nan())
}

/// Rolling maximum over `period` values; first `period - 1` entries undefined.
pub fn rolling_max(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Rolling minimum over `period` values; first `period - 1` entries undefined.
pub fn rolling_min(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Typical price `(high + low + close) / 3` per bar.
pub fn typical_prices(high: &[f64], low: &[f64], close: &[f64]) -> Series {
    assert_aligned(&[high, low, close]);
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect()
}

/// Panics unless every input column has the same number of bars.
pub(crate) fn assert_aligned(columns: &[&[f64]]) {
    if let Some((first, rest)) = columns.split_first() {
        for column in rest {
            assert_eq!(
                column.len(),
                first.len(),
                "indicator input columns must have equal lengths"
            );
        }
    }
}

/// Apply `f` to every full trailing window, aligned on the window's last index.
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> Series
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = undefined(values.len());
    if period == 0 || values.len() < period {
        return out;
    }
    for (i, window) in values.windows(period).enumerate() {
        out[i + period - 1] = f(window);
    }
    out
}

/// Element-wise combination of two aligned series.
pub(crate) fn zip_with<F>(a: &[f64], b: &[f64], f: F) -> Series
where
    F: Fn(f64, f64) -> f64,
{
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}
