use crate::series::{assert_aligned, rolling_max, rolling_min, undefined, zip_with, Series};

/// Ichimoku Kinko Hyo lines.
///
/// Senkou spans are returned aligned with the bar they are computed on; no
/// forward displacement is applied. Chikou is the close `kijun` bars ahead, so
/// its trailing `kijun` entries are undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ichimoku {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IchimokuOutput {
    pub tenkan_sen: Series,
    pub kijun_sen: Series,
    pub senkou_span_a: Series,
    pub senkou_span_b: Series,
    pub chikou_span: Series,
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9, 26, 52)
    }
}

impl Ichimoku {
    pub fn new(tenkan: usize, kijun: usize, senkou_b: usize) -> Self {
        assert!(
            tenkan >= 1 && kijun >= 1 && senkou_b >= 1,
            "Ichimoku periods must be >= 1"
        );
        Self {
            tenkan,
            kijun,
            senkou_b,
        }
    }

    pub fn compute(&self, high: &[f64], low: &[f64], close: &[f64]) -> IchimokuOutput {
        assert_aligned(&[high, low, close]);
        let tenkan_sen = midpoint(high, low, self.tenkan);
        let kijun_sen = midpoint(high, low, self.kijun);
        let senkou_span_a = zip_with(&tenkan_sen, &kijun_sen, |t, k| (t + k) / 2.0);
        let senkou_span_b = midpoint(high, low, self.senkou_b);

        let mut chikou_span = undefined(close.len());
        if close.len() > self.kijun {
            chikou_span[..close.len() - self.kijun].copy_from_slice(&close[self.kijun..]);
        }

        IchimokuOutput {
            tenkan_sen,
            kijun_sen,
            senkou_span_a,
            senkou_span_b,
            chikou_span,
        }
    }
}

/// `(highest high + lowest low) / 2` over `period` bars.
fn midpoint(high: &[f64], low: &[f64], period: usize) -> Series {
    zip_with(&rolling_max(high, period), &rolling_min(low, period), |h, l| {
        (h + l) / 2.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_warm_up_per_window() {
        let high: Vec<f64> = (0..60).map(|i| 11.0 + i as f64).collect();
        let low: Vec<f64> = (0..60).map(|i| 9.0 + i as f64).collect();
        let close: Vec<f64> = (0..60).map(|i| 10.0 + i as f64).collect();
        let out = Ichimoku::default().compute(&high, &low, &close);
        assert!(out.tenkan_sen[7].is_nan() && !out.tenkan_sen[8].is_nan());
        assert!(out.kijun_sen[24].is_nan() && !out.kijun_sen[25].is_nan());
        assert!(out.senkou_span_a[24].is_nan() && !out.senkou_span_a[25].is_nan());
        assert!(out.senkou_span_b[50].is_nan() && !out.senkou_span_b[51].is_nan());
        // tenkan over bars 0..=8: (max high 19 + min low 9) / 2
        assert_eq!(out.tenkan_sen[8], 14.0);
        assert!(out.tenkan_sen[59] > out.kijun_sen[59]);
    }

    #[test]
    fn chikou_is_close_shifted_back() {
        let close: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let out = Ichimoku::default().compute(&close, &close, &close);
        assert_eq!(out.chikou_span[0], 26.0);
        assert_eq!(out.chikou_span[3], 29.0);
        assert!(out.chikou_span[4..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn short_input_is_undefined_per_line() {
        let close = [1.0; 5];
        let out = Ichimoku::default().compute(&close, &close, &close);
        assert!(out.tenkan_sen.iter().all(|v| v.is_nan()));
        assert!(out.chikou_span.iter().all(|v| v.is_nan()));
    }
}
