use common::{IndicatorSnapshot, SignalType};

use crate::scoring::{RSI_OVERBOUGHT, RSI_OVERSOLD, STRONG_TREND_ADX};

/// Human-readable explanation of a signal, built from its indicator snapshot.
///
/// `"{TYPE} signal for {SYMBOL} (confidence: 0.42). "` followed by the RSI,
/// MACD, ADX and Bollinger observations that apply.
pub fn rationale(
    signal_type: SignalType,
    symbol: &str,
    combined: f64,
    snapshot: &IndicatorSnapshot,
) -> String {
    let mut reasons = Vec::with_capacity(4);

    let rsi = snapshot.rsi;
    if rsi < RSI_OVERSOLD {
        reasons.push(format!("RSI ({rsi:.1}) indicates oversold conditions"));
    } else if rsi > RSI_OVERBOUGHT {
        reasons.push(format!("RSI ({rsi:.1}) indicates overbought conditions"));
    }

    let macd = snapshot.macd;
    if macd > 0.0 {
        reasons.push(format!("MACD ({macd:.4}) shows bullish momentum"));
    } else if macd < 0.0 {
        reasons.push(format!("MACD ({macd:.4}) shows bearish momentum"));
    }

    let adx = snapshot.adx;
    if adx > STRONG_TREND_ADX {
        reasons.push(format!("ADX ({adx:.1}) indicates strong trend"));
    } else {
        reasons.push(format!("ADX ({adx:.1}) indicates ranging market"));
    }

    if snapshot.bb_position < 0.2 {
        reasons.push("Price near lower Bollinger Band".to_string());
    } else if snapshot.bb_position > 0.8 {
        reasons.push("Price near upper Bollinger Band".to_string());
    }

    format!(
        "{signal_type} signal for {symbol} (confidence: {:.2}). {}",
        combined.abs(),
        reasons.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: 50.0,
            macd: 0.0,
            bb_position: 0.5,
            atr: 0.0,
            adx: 0.0,
            trend_score: 0.0,
            momentum_score: 0.0,
            volatility_score: 0.0,
        }
    }

    #[test]
    fn neutral_snapshot_mentions_ranging_market_only() {
        let text = rationale(SignalType::Hold, "XAUUSD", 0.0, &neutral_snapshot());
        assert_eq!(
            text,
            "HOLD signal for XAUUSD (confidence: 0.00). ADX (0.0) indicates ranging market"
        );
    }

    #[test]
    fn bullish_snapshot_lists_every_observation() {
        let snapshot = IndicatorSnapshot {
            rsi: 25.04,
            macd: 1.5,
            bb_position: 0.1,
            adx: 31.2,
            ..neutral_snapshot()
        };
        let text = rationale(SignalType::Buy, "BTCUSD", -0.456, &snapshot);
        assert!(text.starts_with("BUY signal for BTCUSD (confidence: 0.46). "));
        assert!(text.contains("RSI (25.0) indicates oversold conditions"));
        assert!(text.contains("MACD (1.5000) shows bullish momentum"));
        assert!(text.contains("ADX (31.2) indicates strong trend"));
        assert!(text.ends_with("Price near lower Bollinger Band"));
    }
}
