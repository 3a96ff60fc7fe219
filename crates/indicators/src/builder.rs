use std::collections::HashMap;

use tracing::debug;

use common::{Hlcv, PriceSeries};

use crate::bundle::IndicatorBundle;
use crate::config::IndicatorConfig;
use crate::levels::{FibonacciLevels, PivotPoints};
use crate::momentum::{Cci, Macd, Momentum, Roc, Rsi, Stochastic, WilliamsR};
use crate::moving_average::{dema, ema, kama, sma, tema, wma};
use crate::series::Series;
use crate::trend::{Adx, Ichimoku, SuperTrend};
use crate::volatility::{Atr, Bollinger, Donchian, Keltner};
use crate::volume::{Mfi, VolumeIndicators};

/// Computes a full [`IndicatorBundle`] from a price series.
pub struct IndicatorSetBuilder<'a> {
    config: &'a IndicatorConfig,
}

impl<'a> IndicatorSetBuilder<'a> {
    pub fn new(config: &'a IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, series: &PriceSeries) -> IndicatorBundle {
        self.build_columns(&series.columns())
    }

    /// Build from column arrays. An empty input gives an empty bundle.
    pub fn build_columns(&self, cols: &Hlcv) -> IndicatorBundle {
        let n = cols.len();
        if n == 0 {
            return IndicatorBundle::default();
        }
        let cfg = self.config;
        let (high, low, close) = (cols.high(), cols.low(), cols.close());

        // ─── Moving averages ─────────────────────────────────────────────────
        let sma_list = cfg
            .sma_periods
            .iter()
            .map(|&p| (p, sma(close, p)))
            .collect();
        let ema_list = cfg
            .ema_periods
            .iter()
            .map(|&p| (p, ema(close, p)))
            .collect();

        // ─── ATR and its dependents ──────────────────────────────────────────
        let mut atr_cache: HashMap<usize, Series> = HashMap::new();
        let mut atr_for = |period: usize| -> Series {
            atr_cache
                .entry(period)
                .or_insert_with(|| Atr::new(period).compute(high, low, close))
                .clone()
        };
        let atr = atr_for(cfg.atr_period);
        let keltner_atr = atr_for(cfg.keltner.atr_period);
        let supertrend_atr = atr_for(cfg.supertrend.period);
        let adx_atr = atr_for(cfg.adx_period);

        let keltner = Keltner::new(
            cfg.keltner.ema_period,
            cfg.keltner.atr_period,
            cfg.keltner.multiplier,
        )
        .compute_with_atr(close, &keltner_atr);
        let supertrend = SuperTrend::new(cfg.supertrend.period, cfg.supertrend.multiplier)
            .compute_with_atr(high, low, close, &supertrend_atr);
        let adx = Adx::new(cfg.adx_period).compute_with_atr(high, low, close, &adx_atr);

        // ─── Oscillators and bands ───────────────────────────────────────────
        let macd = Macd::new(cfg.macd.fast, cfg.macd.slow, cfg.macd.signal).compute(close);
        let bollinger = Bollinger::new(cfg.bollinger.period, cfg.bollinger.std_dev).compute(close);
        let stochastic = Stochastic::new(
            cfg.stochastic.k_period,
            cfg.stochastic.d_period,
            cfg.stochastic.smooth,
        )
        .compute(high, low, close);
        let cci = Cci::new(cfg.cci_period).compute(high, low, close);
        let williams_r = WilliamsR::new(cfg.williams_period).compute(high, low, close);
        let roc = Roc::new(cfg.roc_period).compute(close);
        let momentum = Momentum::new(cfg.momentum_period).compute(close);
        let donchian = Donchian::new(cfg.donchian_period).compute(high, low);
        let rsi = Rsi::new(cfg.rsi_period).compute(close);

        let ichimoku = Ichimoku::new(
            cfg.ichimoku.tenkan,
            cfg.ichimoku.kijun,
            cfg.ichimoku.senkou_b,
        )
        .compute(high, low, close);

        // ─── Volume (only when every bar has one) ────────────────────────────
        let volume = cols.volume().map(|vol| {
            VolumeIndicators::compute(Mfi::new(cfg.mfi_period), high, low, close, vol)
        });

        // ─── Static levels ───────────────────────────────────────────────────
        let last = n - 1;
        let pivots = PivotPoints::from_bar(high[last], low[last], close[last]);
        let window = n.saturating_sub(cfg.donchian_period);
        let swing_high = high[window..].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let swing_low = low[window..].iter().copied().fold(f64::INFINITY, f64::min);
        let fibonacci = FibonacciLevels::new(swing_high, swing_low);

        debug!(
            bars = n,
            has_volume = volume.is_some(),
            atr_periods = atr_cache.len(),
            "Built indicator bundle"
        );

        IndicatorBundle {
            len: n,
            sma: sma_list,
            ema: ema_list,
            wma: wma(close, cfg.wma_period),
            dema: dema(close, cfg.dema_period),
            tema: tema(close, cfg.tema_period),
            kama: kama(close, cfg.kama.period, cfg.kama.fast, cfg.kama.slow),
            atr,
            keltner,
            supertrend,
            adx,
            macd,
            bollinger,
            stochastic,
            cci,
            williams_r,
            roc,
            momentum,
            donchian,
            rsi,
            ichimoku,
            volume,
            pivots: Some(pivots),
            fibonacci: Some(fibonacci),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::IndicatorId;
    use common::{Hlcv, PriceBar};

    fn rising_bars(n: usize, with_volume: bool) -> PriceSeries {
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                let bar = PriceBar::new(c - 0.5, c + 1.0, c - 1.0, c);
                if with_volume {
                    bar.with_volume(1_000.0)
                } else {
                    bar
                }
            })
            .collect()
    }

    #[test]
    fn empty_series_gives_empty_bundle() {
        let cfg = IndicatorConfig::default();
        let bundle = IndicatorSetBuilder::new(&cfg).build(&PriceSeries::default());
        assert!(bundle.is_empty());
        assert!(bundle.pivots.is_none());
        assert_eq!(bundle.signal_strength(), 0.0);
    }

    #[test]
    fn every_output_matches_input_length() {
        let cfg = IndicatorConfig::default();
        let bundle = IndicatorSetBuilder::new(&cfg).build(&rising_bars(120, true));
        let ids = [
            IndicatorId::Sma(200),
            IndicatorId::Ema(9),
            IndicatorId::Kama,
            IndicatorId::Rsi,
            IndicatorId::MacdHistogram,
            IndicatorId::StochD,
            IndicatorId::KcLower,
            IndicatorId::DcMiddle,
            IndicatorId::MinusDi,
            IndicatorId::IchimokuChikouSpan,
            IndicatorId::SuperTrendDirection,
            IndicatorId::Obv,
            IndicatorId::Vwap,
        ];
        for id in ids {
            assert_eq!(bundle.get(id).map(<[f64]>::len), Some(120), "{id}");
        }
        // SMA 200 never warms up on 120 bars
        assert_eq!(bundle.latest(IndicatorId::Sma(200)), None);
        assert!(bundle.latest(IndicatorId::Ema(9)).is_some());
    }

    #[test]
    fn column_input_matches_bar_input() {
        let cfg = IndicatorConfig::default();
        let series = rising_bars(60, true);
        let bars = series.bars();
        let cols = Hlcv::from_arrays(
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            series.closes(),
            Some(vec![1_000.0; 60]),
        )
        .unwrap();
        let builder = IndicatorSetBuilder::new(&cfg);
        let from_columns = builder.build_columns(&cols);
        let from_bars = builder.build(&series);
        assert_eq!(
            from_columns.latest(IndicatorId::Cci),
            from_bars.latest(IndicatorId::Cci)
        );
        assert_eq!(
            from_columns.latest(IndicatorId::Vwap),
            from_bars.latest(IndicatorId::Vwap)
        );
    }

    #[test]
    fn volume_outputs_require_volume() {
        let cfg = IndicatorConfig::default();
        let bundle = IndicatorSetBuilder::new(&cfg).build(&rising_bars(50, false));
        assert!(bundle.volume.is_none());
        assert_eq!(bundle.get(IndicatorId::Mfi), None);
    }

    #[test]
    fn static_levels_come_from_the_tail() {
        let cfg = IndicatorConfig::default();
        let bundle = IndicatorSetBuilder::new(&cfg).build(&rising_bars(50, false));
        let pivots = bundle.pivots.unwrap();
        // last bar: high 150, low 148, close 149
        assert_eq!(pivots.pivot, 149.0);
        let fib = bundle.fibonacci.unwrap();
        // trailing 20 bars: closes 130..=149
        assert_eq!(fib.high, 150.0);
        assert_eq!(fib.low, 129.0);
    }
}
