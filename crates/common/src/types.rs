use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One OHLCV observation.
///
/// Callers are expected to supply bars where `high >= max(open, close, low)`
/// and `low <= min(open, close, high)`. The engine does not check this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume: None,
            timestamp: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

}

/// Bars in ascending time order (oldest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    /// Series where every bar is flat at its close (open = high = low = close).
    pub fn from_closes(closes: &[f64]) -> Self {
        closes
            .iter()
            .map(|&c| PriceBar::new(c, c, c, c))
            .collect()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn push(&mut self, bar: PriceBar) {
        self.bars.push(bar);
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// True only when every bar carries a volume.
    pub fn has_volume(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|b| b.volume.is_some())
    }

    /// Column view used by the indicator library.
    pub fn columns(&self) -> Hlcv {
        let volume = if self.has_volume() {
            Some(self.bars.iter().map(|b| b.volume.unwrap_or(0.0)).collect())
        } else {
            None
        };
        Hlcv {
            high: self.bars.iter().map(|b| b.high).collect(),
            low: self.bars.iter().map(|b| b.low).collect(),
            close: self.closes(),
            volume,
        }
    }
}

impl FromIterator<PriceBar> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceBar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// High/low/close (+ optional volume) columns of equal length.
///
/// Only built through [`Hlcv::from_arrays`] or [`PriceSeries::columns`], so
/// the columns are always aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hlcv {
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Option<Vec<f64>>,
}

impl Hlcv {
    /// Build from independent arrays. Every column must match `close` in length.
    pub fn from_arrays(
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Option<Vec<f64>>,
    ) -> Result<Self> {
        let expected = close.len();
        check_len("high", expected, high.len())?;
        check_len("low", expected, low.len())?;
        if let Some(v) = &volume {
            check_len("volume", expected, v.len())?;
        }
        Ok(Self {
            high,
            low,
            close,
            volume,
        })
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> Option<&[f64]> {
        self.volume.as_deref()
    }
}

fn check_len(column: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            column,
            expected,
            found,
        })
    }
}

/// Recommendation carried by a [`TradingSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
    Close,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Buy => write!(f, "BUY"),
            SignalType::Sell => write!(f, "SELL"),
            SignalType::Hold => write!(f, "HOLD"),
            SignalType::Close => write!(f, "CLOSE"),
        }
    }
}

/// Indicator values captured at the time a signal was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: f64,
    /// Price position inside the Bollinger Bands, 0 = lower band, 1 = upper band.
    pub bb_position: f64,
    pub atr: f64,
    pub adx: f64,
    pub trend_score: f64,
    pub momentum_score: f64,
    pub volatility_score: f64,
}

/// Output of one evaluation. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub symbol: String,
    pub signal_type: SignalType,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// Absolute combined score.
    pub strength: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
    pub indicators: IndicatorSnapshot,
    pub timestamp: DateTime<Utc>,
    pub rationale: String,
}

impl TradingSignal {
    pub fn is_actionable(&self) -> bool {
        matches!(self.signal_type, SignalType::Buy | SignalType::Sell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_requires_every_bar() {
        let mut series = PriceSeries::from_closes(&[1.0, 2.0]);
        assert!(!series.has_volume());
        assert!(series.columns().volume().is_none());

        let series_with_volume: PriceSeries = [1.0, 2.0]
            .iter()
            .map(|&c| PriceBar::new(c, c, c, c).with_volume(10.0))
            .collect();
        assert!(series_with_volume.has_volume());

        series.push(PriceBar::new(3.0, 3.0, 3.0, 3.0).with_volume(5.0));
        assert!(!series.has_volume());
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = Hlcv::from_arrays(vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0], None).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                column: "low",
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn aligned_columns_are_accepted() {
        let cols = Hlcv::from_arrays(
            vec![2.0, 3.0],
            vec![1.0, 2.0],
            vec![1.5, 2.5],
            Some(vec![10.0, 20.0]),
        )
        .unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols.close(), &[1.5, 2.5]);
        assert_eq!(cols.volume(), Some(&[10.0, 20.0][..]));

        let err = Hlcv::from_arrays(vec![1.0], vec![1.0], vec![1.0], Some(vec![])).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { column: "volume", .. }));
    }

    #[test]
    fn signal_type_serializes_uppercase() {
        let json = serde_json::to_string(&SignalType::Hold).unwrap();
        assert_eq!(json, "\"HOLD\"");
        assert_eq!(SignalType::Sell.to_string(), "SELL");
    }
}
