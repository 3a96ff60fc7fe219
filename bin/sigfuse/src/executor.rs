use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use common::{ExecutionResult, SignalExecutor, TradingSignal};

/// Records actionable signals as simulated orders. Nothing leaves the process.
#[derive(Debug, Default)]
pub struct DryRunExecutor;

#[async_trait]
impl SignalExecutor for DryRunExecutor {
    async fn execute(&self, signal: &TradingSignal) -> ExecutionResult {
        if !signal.is_actionable() {
            return ExecutionResult::failed(format!(
                "{} signals are not executable",
                signal.signal_type
            ));
        }
        if signal.position_size <= 0.0 {
            return ExecutionResult::failed("position size is zero");
        }

        let order_id = Uuid::new_v4().to_string();
        info!(
            order_id = %order_id,
            symbol = %signal.symbol,
            side = %signal.signal_type,
            size = signal.position_size,
            entry = signal.entry_price,
            stop_loss = signal.stop_loss,
            take_profit = signal.take_profit,
            "Dry-run order recorded"
        );
        ExecutionResult::filled(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{IndicatorSnapshot, SignalType};

    fn signal(signal_type: SignalType, position_size: f64) -> TradingSignal {
        TradingSignal {
            symbol: "BTCUSD".into(),
            signal_type,
            confidence: 0.5,
            strength: 0.5,
            entry_price: 50_000.0,
            stop_loss: 49_000.0,
            take_profit: 52_000.0,
            position_size,
            indicators: IndicatorSnapshot {
                rsi: 40.0,
                macd: 1.0,
                bb_position: 0.4,
                atr: 300.0,
                adx: 30.0,
                trend_score: 0.5,
                momentum_score: 0.5,
                volatility_score: 0.2,
            },
            timestamp: Utc::now(),
            rationale: String::new(),
        }
    }

    #[tokio::test]
    async fn actionable_signal_gets_an_order_id() {
        let result = DryRunExecutor.execute(&signal(SignalType::Buy, 0.005)).await;
        assert!(result.success);
        let id = result.order_id.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn hold_and_empty_size_are_refused() {
        let hold = DryRunExecutor.execute(&signal(SignalType::Hold, 0.005)).await;
        assert!(!hold.success);
        assert_eq!(hold.error.as_deref(), Some("HOLD signals are not executable"));

        let empty = DryRunExecutor.execute(&signal(SignalType::Sell, 0.0)).await;
        assert!(!empty.success);
        assert!(empty.order_id.is_none());
    }
}
