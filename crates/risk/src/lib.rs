//! Risk-bearing outputs of a signal: stop-loss, take-profit and position size.
//!
//! ATR-based distances are always capped by the instrument's percentage
//! limits, so a stop never risks more than `stop_loss_pct` of the entry.

pub mod levels;
pub mod sizing;

pub use levels::{stop_loss, take_profit, RiskLevels};
pub use sizing::position_size;

/// Stop distance in ATRs. Compiled-in constant.
pub const STOP_LOSS_ATR_MULTIPLE: f64 = 2.0;

/// Target distance in ATRs. Compiled-in constant.
pub const TAKE_PROFIT_ATR_MULTIPLE: f64 = 4.0;

/// ATR assumed as a fraction of price when no ATR is available yet.
pub const FALLBACK_ATR_FRACTION: f64 = 0.02;

/// Multiple of `min_lot` traded at full confidence. Compiled-in constant.
pub const BASE_SIZE_LOTS: f64 = 10.0;
