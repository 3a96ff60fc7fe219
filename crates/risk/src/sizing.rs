use common::InstrumentConfig;

use crate::BASE_SIZE_LOTS;

/// Size scales with confidence from `min_lot · 10` and is capped at
/// `lot_size · max_allocation`.
pub fn position_size(confidence: f64, instrument: &InstrumentConfig) -> f64 {
    let base = instrument.min_lot * BASE_SIZE_LOTS;
    let cap = instrument.lot_size * instrument.max_allocation;
    (base * confidence).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::InstrumentRegistry;

    #[test]
    fn size_scales_with_confidence() {
        let registry = InstrumentRegistry::with_defaults();
        let gold = registry.get("XAUUSD").unwrap();
        // min_lot 0.01 · 10 · 0.5
        assert!((position_size(0.5, gold) - 0.05).abs() < 1e-12);
        assert_eq!(position_size(0.0, gold), 0.0);
    }

    #[test]
    fn size_is_capped_by_allocation() {
        let mut cfg = InstrumentRegistry::with_defaults()
            .get("BTCUSD")
            .unwrap()
            .clone();
        cfg.min_lot = 1.0;
        // base 10 lots, cap 1.0 · 0.5
        assert_eq!(position_size(1.0, &cfg), 0.5);
    }
}
