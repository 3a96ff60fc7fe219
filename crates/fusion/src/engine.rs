use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use common::{
    Error, IndicatorSnapshot, InstrumentConfig, InstrumentRegistry, PriceSeries, Result,
    SignalType, TradingSignal,
};
use indicators::{IndicatorBundle, IndicatorConfig, IndicatorId, IndicatorSetBuilder};
use risk::RiskLevels;

use crate::categories::decide;
use crate::history::SignalHistory;
use crate::rationale::rationale;
use crate::scoring::FusionScores;

/// Evaluates price series against configured instruments and keeps a bounded
/// log of the signals it produced. Safe to share across threads.
pub struct SignalEngine {
    instruments: InstrumentRegistry,
    indicator_config: IndicatorConfig,
    history: SignalHistory,
}

/// Per-instrument entry of [`EngineStatus`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentStatus {
    pub symbol: String,
    pub continuous_trading: bool,
    pub max_allocation: f64,
    /// Type of the most recent signal still in the history.
    pub last_signal: Option<SignalType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub instruments: Vec<InstrumentStatus>,
    pub signals_recorded: usize,
    pub history_capacity: usize,
}

impl SignalEngine {
    pub fn new(
        instruments: InstrumentRegistry,
        indicator_config: IndicatorConfig,
        history_capacity: usize,
    ) -> Self {
        Self {
            instruments,
            indicator_config,
            history: SignalHistory::new(history_capacity),
        }
    }

    /// Evaluate `series` for `symbol`, stamped with the current time.
    pub fn evaluate(&self, symbol: &str, series: &PriceSeries) -> Result<TradingSignal> {
        self.evaluate_at(symbol, series, Utc::now())
    }

    /// Evaluate `series` for `symbol` with an explicit timestamp.
    ///
    /// Fails with [`Error::ConfigurationNotFound`] for an unknown symbol and
    /// [`Error::EmptySeries`] when there are no bars. The signal is appended
    /// to the history before it is returned.
    pub fn evaluate_at(
        &self,
        symbol: &str,
        series: &PriceSeries,
        timestamp: DateTime<Utc>,
    ) -> Result<TradingSignal> {
        let instrument = self.instruments.get(symbol).map_err(|e| {
            warn!(symbol, "Evaluation requested for unknown symbol");
            e
        })?;
        let price = series.last_close().ok_or(Error::EmptySeries)?;

        let bundle = IndicatorSetBuilder::new(&self.indicator_config).build(series);
        let signal = fuse(instrument, &bundle, price, timestamp);

        info!(
            symbol,
            signal = %signal.signal_type,
            confidence = signal.confidence,
            entry = signal.entry_price,
            stop_loss = signal.stop_loss,
            take_profit = signal.take_profit,
            size = signal.position_size,
            "Signal generated"
        );
        self.history.record(signal.clone());
        Ok(signal)
    }

    /// Up to `n` most recent signals, oldest first.
    pub fn latest_signals(&self, n: usize) -> Vec<TradingSignal> {
        self.history.latest(n)
    }

    pub fn history(&self) -> &SignalHistory {
        &self.history
    }

    pub fn instruments(&self) -> &InstrumentRegistry {
        &self.instruments
    }

    pub fn indicator_config(&self) -> &IndicatorConfig {
        &self.indicator_config
    }

    /// Trading status of every configured instrument.
    pub fn status(&self) -> EngineStatus {
        let instruments = self
            .instruments
            .symbols()
            .into_iter()
            .filter_map(|symbol| self.instruments.get(symbol).ok())
            .map(|cfg| InstrumentStatus {
                symbol: cfg.symbol.clone(),
                continuous_trading: cfg.continuous_trading,
                max_allocation: cfg.max_allocation,
                last_signal: self.history.latest_for(&cfg.symbol).map(|s| s.signal_type),
            })
            .collect();
        EngineStatus {
            instruments,
            signals_recorded: self.history.len(),
            history_capacity: self.history.capacity(),
        }
    }
}

/// Combine an indicator bundle into a signal. Pure: the same inputs always
/// give the same signal.
pub fn fuse(
    instrument: &InstrumentConfig,
    bundle: &IndicatorBundle,
    price: f64,
    timestamp: DateTime<Utc>,
) -> TradingSignal {
    let scores = FusionScores::from_bundle(bundle, instrument);
    let signal_type = decide(scores.combined);
    let confidence = scores.combined.abs().min(1.0);

    debug!(
        symbol = %instrument.symbol,
        trend = scores.trend,
        momentum = scores.momentum,
        volatility = scores.volatility,
        combined = scores.combined,
        indicator_strength = bundle.signal_strength(),
        "Fusion scores"
    );

    let levels = RiskLevels::compute(
        signal_type,
        price,
        bundle.latest(IndicatorId::Atr),
        confidence,
        instrument,
    );
    let snapshot = snapshot(bundle, price, &scores);
    let rationale = rationale(signal_type, &instrument.symbol, scores.combined, &snapshot);

    TradingSignal {
        symbol: instrument.symbol.clone(),
        signal_type,
        confidence,
        strength: scores.combined.abs(),
        entry_price: price,
        stop_loss: levels.stop_loss,
        take_profit: levels.take_profit,
        position_size: levels.position_size,
        indicators: snapshot,
        timestamp,
        rationale,
    }
}

/// Latest indicator readings, with neutral fallbacks for undefined values.
fn snapshot(bundle: &IndicatorBundle, price: f64, scores: &FusionScores) -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi: bundle.latest(IndicatorId::Rsi).unwrap_or(50.0),
        macd: bundle.latest(IndicatorId::Macd).unwrap_or(0.0),
        bb_position: bundle.bollinger.position(price).unwrap_or(0.5),
        atr: bundle.latest(IndicatorId::Atr).unwrap_or(0.0),
        adx: bundle.latest(IndicatorId::Adx).unwrap_or(0.0),
        trend_score: scores.trend,
        momentum_score: scores.momentum,
        volatility_score: scores.volatility,
    }
}
