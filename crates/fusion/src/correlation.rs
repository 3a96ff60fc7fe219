//! Cross-pair analysis: how a cross (e.g. BTCXAU) relates to its two USD legs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use common::PriceSeries;
use indicators::series::{latest, undefined, Series};

/// Window of the rolling return correlation.
pub const ROLLING_CORRELATION_WINDOW: usize = 20;
/// Bars spanned by the leg momentum, inclusive of the last bar.
pub const MOMENTUM_LOOKBACK: usize = 20;
/// Below this absolute correlation the legs are considered decoupled.
pub const LOW_CORRELATION: f64 = 0.3;
/// Momentum gap, in percentage points, that counts as a divergence.
pub const DIVERGENCE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossPairRecommendation {
    /// Base leg outran the quote leg: the cross looks overvalued.
    MeanReversionSell,
    /// Quote leg outran the base leg: the cross looks undervalued.
    MeanReversionBuy,
    NoOpportunity,
}

/// Advisory report; fields are `None` when the inputs are too short.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub cross_symbol: String,
    /// Pearson correlation of the aligned percentage returns.
    pub correlation: Option<f64>,
    /// Rolling correlation over the aligned returns.
    pub rolling_correlation: Series,
    pub base_price: Option<f64>,
    pub quote_price: Option<f64>,
    /// Base close divided by quote close.
    pub implied_cross_price: Option<f64>,
    /// Percentage change over [`MOMENTUM_LOOKBACK`] bars.
    pub base_momentum: Option<f64>,
    pub quote_momentum: Option<f64>,
    /// `base_momentum − quote_momentum`.
    pub divergence: Option<f64>,
    pub recommendation: CrossPairRecommendation,
    pub timestamp: DateTime<Utc>,
}

impl CorrelationReport {
    /// Most recent defined value of [`CorrelationReport::rolling_correlation`].
    pub fn latest_rolling_correlation(&self) -> Option<f64> {
        latest(&self.rolling_correlation)
    }
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recommendation {
            CrossPairRecommendation::MeanReversionSell => {
                write!(f, "{} may be overvalued - consider SELL", self.cross_symbol)
            }
            CrossPairRecommendation::MeanReversionBuy => {
                write!(f, "{} may be undervalued - consider BUY", self.cross_symbol)
            }
            CrossPairRecommendation::NoOpportunity => f.write_str("No clear arbitrage opportunity"),
        }
    }
}

/// Compare the two legs of `cross_symbol`. Never fails: missing inputs yield
/// `None` fields and [`CrossPairRecommendation::NoOpportunity`].
pub fn analyze_cross_pair(
    cross_symbol: &str,
    base: &PriceSeries,
    quote: &PriceSeries,
) -> CorrelationReport {
    let base_closes = base.closes();
    let quote_closes = quote.closes();

    let base_returns = pct_change(&base_closes);
    let quote_returns = pct_change(&quote_closes);
    let common_len = base_returns.len().min(quote_returns.len());
    let base_returns = &base_returns[base_returns.len() - common_len..];
    let quote_returns = &quote_returns[quote_returns.len() - common_len..];

    let correlation = pearson(base_returns, quote_returns);
    let rolling_correlation = rolling_pearson(base_returns, quote_returns, ROLLING_CORRELATION_WINDOW);

    let base_price = base.last_close();
    let quote_price = quote.last_close();
    let implied_cross_price = match (base_price, quote_price) {
        (Some(b), Some(q)) if q != 0.0 => Some(b / q),
        _ => None,
    };

    let base_momentum = lookback_momentum(&base_closes);
    let quote_momentum = lookback_momentum(&quote_closes);
    let divergence = base_momentum.zip(quote_momentum).map(|(b, q)| b - q);

    let recommendation = match (correlation, divergence) {
        (Some(c), Some(d)) if c.abs() < LOW_CORRELATION && d.abs() > DIVERGENCE_THRESHOLD => {
            if d > 0.0 {
                CrossPairRecommendation::MeanReversionSell
            } else {
                CrossPairRecommendation::MeanReversionBuy
            }
        }
        _ => CrossPairRecommendation::NoOpportunity,
    };

    debug!(
        cross = cross_symbol,
        returns = common_len,
        correlation = ?correlation,
        divergence = ?divergence,
        ?recommendation,
        "Cross-pair analysis"
    );

    CorrelationReport {
        cross_symbol: cross_symbol.to_string(),
        correlation,
        rolling_correlation,
        base_price,
        quote_price,
        implied_cross_price,
        base_momentum,
        quote_momentum,
        divergence,
        recommendation,
        timestamp: Utc::now(),
    }
}

/// Bar-to-bar fractional returns; a zero prior close counts as no change.
fn pct_change(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { w[1] / w[0] - 1.0 })
        .collect()
}

/// `(close[-1] / close[-LOOKBACK] − 1) · 100`.
fn lookback_momentum(closes: &[f64]) -> Option<f64> {
    if closes.len() < MOMENTUM_LOOKBACK {
        return None;
    }
    let then = closes[closes.len() - MOMENTUM_LOOKBACK];
    let now = *closes.last()?;
    (then != 0.0).then(|| (now / then - 1.0) * 100.0)
}

/// Pearson correlation; `None` with fewer than two points or no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn rolling_pearson(x: &[f64], y: &[f64], window: usize) -> Series {
    let mut out = undefined(x.len());
    if x.len() < window {
        return out;
    }
    for end in window..=x.len() {
        let start = end - window;
        out[end - 1] = pearson(&x[start..end], &y[start..end]).unwrap_or(f64::NAN);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_extremes() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let inv = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &inv).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&x, &[1.0; 4]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn short_inputs_give_no_opportunity() {
        let base = PriceSeries::from_closes(&[100.0, 101.0]);
        let quote = PriceSeries::default();
        let report = analyze_cross_pair("BTCXAU", &base, &quote);
        assert_eq!(report.correlation, None);
        assert_eq!(report.divergence, None);
        assert_eq!(report.implied_cross_price, None);
        assert!(report.rolling_correlation.is_empty());
        assert_eq!(report.latest_rolling_correlation(), None);
        assert_eq!(report.recommendation, CrossPairRecommendation::NoOpportunity);
        assert_eq!(report.to_string(), "No clear arbitrage opportunity");
    }

    #[test]
    fn proportional_legs_are_fully_correlated() {
        let base: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let quote: Vec<f64> = base.iter().map(|c| c / 50.0).collect();
        let report = analyze_cross_pair(
            "BTCXAU",
            &PriceSeries::from_closes(&base),
            &PriceSeries::from_closes(&quote),
        );
        let rolling = report.latest_rolling_correlation().unwrap();
        assert!((rolling - 1.0).abs() < 1e-9, "rolling {rolling}");
        assert!(report.rolling_correlation[..ROLLING_CORRELATION_WINDOW - 1]
            .iter()
            .all(|v| v.is_nan()));
        assert_eq!(report.recommendation, CrossPairRecommendation::NoOpportunity);
    }

    #[test]
    fn decoupled_outperforming_base_suggests_selling_the_cross() {
        // base rallies ~1% a bar with alternating noise; quote oscillates flat
        let base: Vec<f64> = (0..40)
            .map(|i| 100.0 * 1.01f64.powi(i) * if i % 2 == 0 { 1.0 } else { 1.002 })
            .collect();
        let quote: Vec<f64> = (0..40)
            .map(|i| 2_000.0 + if i % 3 == 0 { 5.0 } else { -2.0 })
            .collect();
        let report = analyze_cross_pair(
            "BTCXAU",
            &PriceSeries::from_closes(&base),
            &PriceSeries::from_closes(&quote),
        );
        let corr = report.correlation.unwrap();
        assert!(corr.abs() < LOW_CORRELATION, "corr {corr}");
        assert!(report.divergence.unwrap() > DIVERGENCE_THRESHOLD);
        assert_eq!(report.recommendation, CrossPairRecommendation::MeanReversionSell);
        assert_eq!(report.to_string(), "BTCXAU may be overvalued - consider SELL");
        let implied = report.implied_cross_price.unwrap();
        assert!((implied - base[39] / quote[39]).abs() < 1e-12);
        assert_eq!(report.rolling_correlation.len(), 39);
    }
}
