//! Trend, momentum and volatility sub-scores.
//!
//! Each sub-score is the mean of the sub-signals that fired, 0 when none
//! did. Sub-signals whose inputs are undefined on the last bar are skipped.

use serde::{Deserialize, Serialize};

use common::InstrumentConfig;
use indicators::{IndicatorBundle, IndicatorId, CROSSOVER_EMA_PERIODS};

use crate::categories::CategoryWeights;

/// ADX level above which a trend counts as strong.
pub const STRONG_TREND_ADX: f64 = 25.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Band width, relative to the middle band, under which the bands are squeezed.
pub const BOLLINGER_SQUEEZE_WIDTH: f64 = 0.02;
/// ATR, in units of the instrument's spread tolerance, that counts as active.
pub const ACTIVE_ATR_SPREADS: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FusionScores {
    pub trend: f64,
    pub momentum: f64,
    pub volatility: f64,
    /// Weighted combination of the three sub-scores.
    pub combined: f64,
}

impl FusionScores {
    pub fn from_bundle(bundle: &IndicatorBundle, instrument: &InstrumentConfig) -> Self {
        let trend = trend_score(bundle);
        let momentum = momentum_score(bundle);
        let volatility = volatility_score(bundle, instrument);
        Self {
            trend,
            momentum,
            volatility,
            combined: CategoryWeights::combine(trend, momentum, volatility),
        }
    }
}

pub fn trend_score(bundle: &IndicatorBundle) -> f64 {
    let mut votes = Vec::new();
    let [fast_period, slow_period] = CROSSOVER_EMA_PERIODS;

    if let (Some(fast), Some(slow)) = (
        bundle.latest(IndicatorId::Ema(fast_period)),
        bundle.latest(IndicatorId::Ema(slow_period)),
    ) {
        votes.push(if fast > slow { 0.5 } else { -0.5 });
    }

    if let Some(adx) = bundle.latest(IndicatorId::Adx) {
        if adx > STRONG_TREND_ADX {
            let strength = (adx / 50.0).min(1.0);
            let bullish = matches!(
                (bundle.latest(IndicatorId::PlusDi), bundle.latest(IndicatorId::MinusDi)),
                (Some(plus), Some(minus)) if plus > minus
            );
            votes.push(if bullish { strength } else { -strength });
        }
    }

    if let Some(direction) = bundle.latest(IndicatorId::SuperTrendDirection) {
        votes.push(direction * 0.5);
    }

    if let (Some(tenkan), Some(kijun)) = (
        bundle.latest(IndicatorId::IchimokuTenkanSen),
        bundle.latest(IndicatorId::IchimokuKijunSen),
    ) {
        votes.push(if tenkan > kijun { 0.3 } else { -0.3 });
    }

    mean(&votes)
}

pub fn momentum_score(bundle: &IndicatorBundle) -> f64 {
    let mut votes = Vec::new();

    if let Some(rsi) = bundle.latest(IndicatorId::Rsi) {
        votes.push(if rsi < RSI_OVERSOLD {
            1.0
        } else if rsi > RSI_OVERBOUGHT {
            -1.0
        } else {
            (50.0 - rsi) / 50.0
        });
    }

    if let (Some(macd), Some(signal)) = (
        bundle.latest(IndicatorId::Macd),
        bundle.latest(IndicatorId::MacdSignal),
    ) {
        votes.push(if macd > signal { 0.5 } else { -0.5 });
    }

    if let Some(k) = bundle.latest(IndicatorId::StochK) {
        if k < 20.0 {
            votes.push(0.8);
        } else if k > 80.0 {
            votes.push(-0.8);
        } else if let Some(d) = bundle.latest(IndicatorId::StochD) {
            votes.push(if k > d { 0.3 } else { -0.3 });
        }
    }

    if let Some(wr) = bundle.latest(IndicatorId::WilliamsR) {
        if wr < -80.0 {
            votes.push(0.7);
        } else if wr > -20.0 {
            votes.push(-0.7);
        }
    }

    if let Some(cci) = bundle.latest(IndicatorId::Cci) {
        if cci < -100.0 {
            votes.push(0.6);
        } else if cci > 100.0 {
            votes.push(-0.6);
        }
    }

    mean(&votes)
}

pub fn volatility_score(bundle: &IndicatorBundle, instrument: &InstrumentConfig) -> f64 {
    let mut votes = Vec::new();

    if let (Some(upper), Some(middle), Some(lower)) = (
        bundle.latest(IndicatorId::BbUpper),
        bundle.latest(IndicatorId::BbMiddle),
        bundle.latest(IndicatorId::BbLower),
    ) {
        let width = if middle != 0.0 {
            (upper - lower) / middle
        } else {
            0.0
        };
        if width < BOLLINGER_SQUEEZE_WIDTH {
            votes.push(0.3);
        }
    }

    if let Some(atr) = bundle.latest(IndicatorId::Atr) {
        if atr > 0.0 && atr / instrument.spread_tolerance > ACTIVE_ATR_SPREADS {
            votes.push(0.2);
        }
    }

    mean(&votes)
}

fn mean(votes: &[f64]) -> f64 {
    if votes.is_empty() {
        return 0.0;
    }
    (votes.iter().sum::<f64>() / votes.len() as f64).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::InstrumentRegistry;
    use indicators::{Bands, MacdOutput, StochasticOutput};

    fn gold() -> InstrumentConfig {
        InstrumentRegistry::with_defaults()
            .get("XAUUSD")
            .unwrap()
            .clone()
    }

    #[test]
    fn all_undefined_bundle_scores_zero() {
        let bundle = IndicatorBundle {
            len: 3,
            ..Default::default()
        };
        let scores = FusionScores::from_bundle(&bundle, &gold());
        assert_eq!(scores, FusionScores::default());
    }

    #[test]
    fn momentum_averages_fired_signals() {
        let bundle = IndicatorBundle {
            len: 1,
            rsi: vec![25.0],
            macd: MacdOutput {
                macd: vec![1.0],
                signal: vec![0.5],
                histogram: vec![0.5],
            },
            // %D undefined: the %K-vs-%D vote is skipped
            stochastic: StochasticOutput {
                k: vec![50.0],
                d: vec![f64::NAN],
            },
            williams_r: vec![-50.0],
            cci: vec![-150.0],
            ..Default::default()
        };
        // (1.0 + 0.5 + 0.6) / 3
        assert!((momentum_score(&bundle) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn equal_emas_vote_bearish() {
        let bundle = IndicatorBundle {
            len: 1,
            ema: vec![(9, vec![10.0]), (21, vec![10.0])],
            ..Default::default()
        };
        assert_eq!(trend_score(&bundle), -0.5);
    }

    #[test]
    fn strong_adx_scales_with_level() {
        let bundle = IndicatorBundle {
            len: 1,
            adx: indicators::AdxOutput {
                adx: vec![40.0],
                plus_di: vec![30.0],
                minus_di: vec![10.0],
            },
            ..Default::default()
        };
        assert!((trend_score(&bundle) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn squeeze_and_active_atr_add_up() {
        let bundle = IndicatorBundle {
            len: 1,
            bollinger: Bands {
                upper: vec![100.5],
                middle: vec![100.0],
                lower: vec![99.5],
            },
            // 2.0 / 0.5 spread tolerance = 4 spreads
            atr: vec![2.0],
            ..Default::default()
        };
        assert!((volatility_score(&bundle, &gold()) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_middle_band_counts_as_squeeze() {
        let bundle = IndicatorBundle {
            len: 1,
            bollinger: Bands {
                upper: vec![1.0],
                middle: vec![0.0],
                lower: vec![-1.0],
            },
            atr: vec![0.0],
            ..Default::default()
        };
        assert!((volatility_score(&bundle, &gold()) - 0.3).abs() < 1e-12);
    }
}
