mod bars;
mod executor;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use common::{Config, InstrumentFileConfig, InstrumentRegistry, SignalExecutor, TradingSignal};
use fusion::{analyze_cross_pair, CorrelationReport, EngineStatus, SignalEngine};
use indicators::IndicatorConfig;

use executor::DryRunExecutor;

/// Everything printed to stdout at the end of a run.
#[derive(Serialize)]
struct RunReport {
    signals: Vec<TradingSignal>,
    status: EngineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    cross_pair: Option<CorrelationReport>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("invalid environment configuration")?;

    // ── Logging ──────────────────────────────────────────────────────────────
    logging::init(cfg.log_format);
    info!(bars = %cfg.bars_path.display(), capacity = cfg.history_capacity, "SigFuse starting");

    // ── Instruments & indicator parameters ────────────────────────────────────
    let instruments = match &cfg.instruments_path {
        Some(path) => InstrumentRegistry::from_file(InstrumentFileConfig::load(path)?)?,
        None => {
            info!("INSTRUMENTS_PATH not set, using built-in instruments");
            InstrumentRegistry::with_defaults()
        }
    };
    let indicator_config = match &cfg.indicators_path {
        Some(path) => IndicatorConfig::load(path)?,
        None => IndicatorConfig::default(),
    };

    // ── Price data ────────────────────────────────────────────────────────────
    let bars = Arc::new(bars::load(&cfg.bars_path)?);

    // ── Engine ────────────────────────────────────────────────────────────────
    let engine = Arc::new(SignalEngine::new(
        instruments,
        indicator_config,
        cfg.history_capacity,
    ));
    let executor: Arc<dyn SignalExecutor> = Arc::new(DryRunExecutor);

    // ── Evaluate every symbol on the blocking pool ────────────────────────────
    let mut handles = Vec::with_capacity(bars.len());
    for symbol in bars.keys().cloned() {
        let engine = Arc::clone(&engine);
        let bars = Arc::clone(&bars);
        handles.push(tokio::task::spawn_blocking(move || {
            let result = engine.evaluate(&symbol, &bars[&symbol]);
            (symbol, result)
        }));
    }

    for handle in handles {
        let (symbol, result) = handle.await.context("evaluation task panicked")?;
        match result {
            Ok(signal) if signal.is_actionable() => {
                let outcome = executor.execute(&signal).await;
                if outcome.success {
                    info!(symbol = %symbol, order_id = ?outcome.order_id, "Signal handed to executor");
                } else {
                    warn!(symbol = %symbol, error = ?outcome.error, "Executor refused signal");
                }
            }
            Ok(_) => {}
            Err(e) => warn!(symbol = %symbol, error = %e, "Evaluation failed"),
        }
    }

    // ── Cross-pair analysis ───────────────────────────────────────────────────
    let cross_pair = cfg.cross_pair.as_ref().and_then(|spec| {
        match (bars.get(&spec.base), bars.get(&spec.quote)) {
            (Some(base), Some(quote)) => {
                let report = analyze_cross_pair(&spec.cross, base, quote);
                info!(
                    cross = %spec.cross,
                    correlation = ?report.correlation,
                    rolling_correlation = ?report.latest_rolling_correlation(),
                    divergence = ?report.divergence,
                    "{report}"
                );
                Some(report)
            }
            _ => {
                warn!(
                    cross = %spec.cross,
                    base = %spec.base,
                    quote = %spec.quote,
                    "Cross-pair legs missing from bars file, skipping analysis"
                );
                None
            }
        }
    });

    // ── Report ────────────────────────────────────────────────────────────────
    let report = RunReport {
        signals: engine.latest_signals(cfg.history_capacity),
        status: engine.status(),
        cross_pair,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(signals = report.signals.len(), "SigFuse finished");
    Ok(())
}
