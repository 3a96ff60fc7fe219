use std::fmt;

use crate::levels::{FibonacciLevels, PivotPoints};
use crate::momentum::{MacdOutput, StochasticOutput};
use crate::series::{latest, Series};
use crate::trend::{AdxOutput, IchimokuOutput, SuperTrendOutput};
use crate::volatility::Bands;
use crate::volume::VolumeIndicators;

/// Every indicator output for one price series.
///
/// All series have `len` entries. Volume outputs are absent, not filled,
/// when the input had no volume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorBundle {
    pub len: usize,
    pub sma: Vec<(usize, Series)>,
    pub ema: Vec<(usize, Series)>,
    pub wma: Series,
    pub dema: Series,
    pub tema: Series,
    pub kama: Series,
    pub atr: Series,
    pub keltner: Bands,
    pub supertrend: SuperTrendOutput,
    pub adx: AdxOutput,
    pub macd: MacdOutput,
    pub bollinger: Bands,
    pub stochastic: StochasticOutput,
    pub cci: Series,
    pub williams_r: Series,
    pub roc: Series,
    pub momentum: Series,
    pub donchian: Bands,
    pub rsi: Series,
    pub ichimoku: IchimokuOutput,
    pub volume: Option<VolumeIndicators>,
    pub pivots: Option<PivotPoints>,
    pub fibonacci: Option<FibonacciLevels>,
}

/// Name of one output series in an [`IndicatorBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorId {
    Sma(usize),
    Ema(usize),
    Wma,
    Dema,
    Tema,
    Kama,
    Rsi,
    Macd,
    MacdSignal,
    MacdHistogram,
    StochK,
    StochD,
    WilliamsR,
    Cci,
    Momentum,
    Roc,
    BbUpper,
    BbMiddle,
    BbLower,
    Atr,
    KcUpper,
    KcMiddle,
    KcLower,
    DcUpper,
    DcMiddle,
    DcLower,
    Adx,
    PlusDi,
    MinusDi,
    IchimokuTenkanSen,
    IchimokuKijunSen,
    IchimokuSenkouSpanA,
    IchimokuSenkouSpanB,
    IchimokuChikouSpan,
    SuperTrend,
    SuperTrendDirection,
    Obv,
    Mfi,
    Vwap,
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndicatorId::Sma(p) => return write!(f, "sma_{p}"),
            IndicatorId::Ema(p) => return write!(f, "ema_{p}"),
            IndicatorId::Wma => "wma",
            IndicatorId::Dema => "dema",
            IndicatorId::Tema => "tema",
            IndicatorId::Kama => "kama",
            IndicatorId::Rsi => "rsi",
            IndicatorId::Macd => "macd",
            IndicatorId::MacdSignal => "macd_signal",
            IndicatorId::MacdHistogram => "macd_histogram",
            IndicatorId::StochK => "stoch_k",
            IndicatorId::StochD => "stoch_d",
            IndicatorId::WilliamsR => "williams_r",
            IndicatorId::Cci => "cci",
            IndicatorId::Momentum => "momentum",
            IndicatorId::Roc => "roc",
            IndicatorId::BbUpper => "bb_upper",
            IndicatorId::BbMiddle => "bb_middle",
            IndicatorId::BbLower => "bb_lower",
            IndicatorId::Atr => "atr",
            IndicatorId::KcUpper => "kc_upper",
            IndicatorId::KcMiddle => "kc_middle",
            IndicatorId::KcLower => "kc_lower",
            IndicatorId::DcUpper => "dc_upper",
            IndicatorId::DcMiddle => "dc_middle",
            IndicatorId::DcLower => "dc_lower",
            IndicatorId::Adx => "adx",
            IndicatorId::PlusDi => "plus_di",
            IndicatorId::MinusDi => "minus_di",
            IndicatorId::IchimokuTenkanSen => "ichimoku_tenkan_sen",
            IndicatorId::IchimokuKijunSen => "ichimoku_kijun_sen",
            IndicatorId::IchimokuSenkouSpanA => "ichimoku_senkou_span_a",
            IndicatorId::IchimokuSenkouSpanB => "ichimoku_senkou_span_b",
            IndicatorId::IchimokuChikouSpan => "ichimoku_chikou_span",
            IndicatorId::SuperTrend => "supertrend",
            IndicatorId::SuperTrendDirection => "supertrend_direction",
            IndicatorId::Obv => "obv",
            IndicatorId::Mfi => "mfi",
            IndicatorId::Vwap => "vwap",
        };
        f.write_str(name)
    }
}

impl IndicatorBundle {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sma(&self, period: usize) -> Option<&[f64]> {
        find_period(&self.sma, period)
    }

    pub fn ema(&self, period: usize) -> Option<&[f64]> {
        find_period(&self.ema, period)
    }

    /// Output series by name. `None` for a moving-average period that was
    /// not configured or a volume output when the input had no volume.
    pub fn get(&self, id: IndicatorId) -> Option<&[f64]> {
        let volume = self.volume.as_ref();
        let series = match id {
            IndicatorId::Sma(p) => return self.sma(p),
            IndicatorId::Ema(p) => return self.ema(p),
            IndicatorId::Wma => &self.wma,
            IndicatorId::Dema => &self.dema,
            IndicatorId::Tema => &self.tema,
            IndicatorId::Kama => &self.kama,
            IndicatorId::Rsi => &self.rsi,
            IndicatorId::Macd => &self.macd.macd,
            IndicatorId::MacdSignal => &self.macd.signal,
            IndicatorId::MacdHistogram => &self.macd.histogram,
            IndicatorId::StochK => &self.stochastic.k,
            IndicatorId::StochD => &self.stochastic.d,
            IndicatorId::WilliamsR => &self.williams_r,
            IndicatorId::Cci => &self.cci,
            IndicatorId::Momentum => &self.momentum,
            IndicatorId::Roc => &self.roc,
            IndicatorId::BbUpper => &self.bollinger.upper,
            IndicatorId::BbMiddle => &self.bollinger.middle,
            IndicatorId::BbLower => &self.bollinger.lower,
            IndicatorId::Atr => &self.atr,
            IndicatorId::KcUpper => &self.keltner.upper,
            IndicatorId::KcMiddle => &self.keltner.middle,
            IndicatorId::KcLower => &self.keltner.lower,
            IndicatorId::DcUpper => &self.donchian.upper,
            IndicatorId::DcMiddle => &self.donchian.middle,
            IndicatorId::DcLower => &self.donchian.lower,
            IndicatorId::Adx => &self.adx.adx,
            IndicatorId::PlusDi => &self.adx.plus_di,
            IndicatorId::MinusDi => &self.adx.minus_di,
            IndicatorId::IchimokuTenkanSen => &self.ichimoku.tenkan_sen,
            IndicatorId::IchimokuKijunSen => &self.ichimoku.kijun_sen,
            IndicatorId::IchimokuSenkouSpanA => &self.ichimoku.senkou_span_a,
            IndicatorId::IchimokuSenkouSpanB => &self.ichimoku.senkou_span_b,
            IndicatorId::IchimokuChikouSpan => &self.ichimoku.chikou_span,
            IndicatorId::SuperTrend => &self.supertrend.value,
            IndicatorId::SuperTrendDirection => &self.supertrend.direction,
            IndicatorId::Obv => return volume.map(|v| v.obv.as_slice()),
            IndicatorId::Mfi => return volume.map(|v| v.mfi.as_slice()),
            IndicatorId::Vwap => return volume.map(|v| v.vwap.as_slice()),
        };
        Some(series.as_slice())
    }

    /// Last defined value of an output, if any.
    pub fn latest(&self, id: IndicatorId) -> Option<f64> {
        self.get(id).and_then(latest)
    }

    /// Quick directional read of the latest values in `[-1, 1]`; positive is
    /// bullish. Averages RSI, MACD histogram, Stochastic %K, ADX/DI and
    /// SuperTrend votes. Undefined RSI, histogram, %K and ADX fall back to
    /// their neutral readings.
    pub fn signal_strength(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mut votes = Vec::with_capacity(5);

        let rsi = latest(&self.rsi).unwrap_or(50.0);
        votes.push(if rsi < 30.0 {
            1.0
        } else if rsi > 70.0 {
            -1.0
        } else {
            (50.0 - rsi) / 50.0
        });

        let histogram = latest(&self.macd.histogram).unwrap_or(0.0);
        votes.push((histogram / 10.0).clamp(-1.0, 1.0));

        let k = latest(&self.stochastic.k).unwrap_or(50.0);
        votes.push(if k < 20.0 {
            1.0
        } else if k > 80.0 {
            -1.0
        } else {
            (50.0 - k) / 50.0
        });

        let adx = latest(&self.adx.adx).unwrap_or(0.0);
        if adx > 25.0 {
            if let (Some(plus), Some(minus)) = (latest(&self.adx.plus_di), latest(&self.adx.minus_di)) {
                votes.push(if plus > minus { 0.5 } else { -0.5 });
            }
        }

        if let Some(direction) = latest(&self.supertrend.direction) {
            votes.push(direction * 0.5);
        }

        votes.iter().sum::<f64>() / votes.len() as f64
    }
}

fn find_period(list: &[(usize, Series)], period: usize) -> Option<&[f64]> {
    list.iter()
        .find(|(p, _)| *p == period)
        .map(|(_, s)| s.as_slice())
}
