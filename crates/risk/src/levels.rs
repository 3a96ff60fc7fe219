use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{InstrumentConfig, SignalType};

use crate::{
    position_size, FALLBACK_ATR_FRACTION, STOP_LOSS_ATR_MULTIPLE, TAKE_PROFIT_ATR_MULTIPLE,
};

/// Exit levels and size attached to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
}

impl RiskLevels {
    /// `atr` is the latest ATR, `None` while it is still warming up.
    pub fn compute(
        signal_type: SignalType,
        price: f64,
        atr: Option<f64>,
        confidence: f64,
        instrument: &InstrumentConfig,
    ) -> Self {
        let atr = effective_atr(price, atr);
        let levels = Self {
            stop_loss: stop_loss(signal_type, price, atr, instrument.stop_loss_pct),
            take_profit: take_profit(signal_type, price, atr, instrument.take_profit_pct),
            position_size: position_size(confidence, instrument),
        };
        debug!(
            symbol = %instrument.symbol,
            %signal_type,
            price,
            atr,
            stop_loss = levels.stop_loss,
            take_profit = levels.take_profit,
            size = levels.position_size,
            "Computed risk levels"
        );
        levels
    }
}

fn effective_atr(price: f64, atr: Option<f64>) -> f64 {
    match atr {
        Some(a) if !a.is_nan() => a,
        _ => price * FALLBACK_ATR_FRACTION,
    }
}

/// Protective stop: the tighter of `2·ATR` and `stop_loss_pct` from entry.
/// Non-directional signals keep the entry price.
pub fn stop_loss(signal_type: SignalType, price: f64, atr: f64, stop_loss_pct: f64) -> f64 {
    let distance = STOP_LOSS_ATR_MULTIPLE * atr;
    match signal_type {
        SignalType::Buy => (price - distance).max(price * (1.0 - stop_loss_pct)),
        SignalType::Sell => (price + distance).min(price * (1.0 + stop_loss_pct)),
        SignalType::Hold | SignalType::Close => price,
    }
}

/// Profit target: the nearer of `4·ATR` and `take_profit_pct` from entry.
/// Non-directional signals keep the entry price.
pub fn take_profit(signal_type: SignalType, price: f64, atr: f64, take_profit_pct: f64) -> f64 {
    let distance = TAKE_PROFIT_ATR_MULTIPLE * atr;
    match signal_type {
        SignalType::Buy => (price + distance).min(price * (1.0 + take_profit_pct)),
        SignalType::Sell => (price - distance).max(price * (1.0 - take_profit_pct)),
        SignalType::Hold | SignalType::Close => price,
    }
}
