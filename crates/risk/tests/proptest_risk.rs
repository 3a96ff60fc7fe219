use proptest::prelude::*;

use common::{InstrumentRegistry, SignalType};
use risk::{position_size, RiskLevels};

fn instrument_symbols() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("BTCUSD"), Just("XAUUSD"), Just("BTCXAU")]
}

fn directional() -> impl Strategy<Value = SignalType> {
    prop_oneof![Just(SignalType::Buy), Just(SignalType::Sell)]
}

proptest! {
    /// A stop never risks more than the instrument's stop-loss percentage.
    #[test]
    fn stop_loss_never_exceeds_percentage_risk(
        symbol in instrument_symbols(),
        signal_type in directional(),
        price in 0.0001f64..1_000_000.0,
        atr in prop::option::of(0.0f64..100_000.0),
        confidence in 0.0f64..=1.0,
    ) {
        let registry = InstrumentRegistry::with_defaults();
        let cfg = registry.get(symbol).unwrap();
        let levels = RiskLevels::compute(signal_type, price, atr, confidence, cfg);
        let risk = (levels.stop_loss - price).abs() / price;
        prop_assert!(risk <= cfg.stop_loss_pct + 1e-9, "risk {} > {}", risk, cfg.stop_loss_pct);
        let reward = (levels.take_profit - price).abs() / price;
        prop_assert!(reward <= cfg.take_profit_pct + 1e-9);
        // stops sit on the losing side of the entry
        match signal_type {
            SignalType::Buy => prop_assert!(levels.stop_loss <= price && levels.take_profit >= price),
            _ => prop_assert!(levels.stop_loss >= price && levels.take_profit <= price),
        }
    }

    /// Position size never exceeds `lot_size · max_allocation`.
    #[test]
    fn position_size_never_exceeds_cap(
        symbol in instrument_symbols(),
        confidence in 0.0f64..=1.0,
    ) {
        let registry = InstrumentRegistry::with_defaults();
        let cfg = registry.get(symbol).unwrap();
        let size = position_size(confidence, cfg);
        prop_assert!(size >= 0.0);
        prop_assert!(size <= cfg.lot_size * cfg.max_allocation);
    }
}
