//! Trend-strength and trend-following indicators.

pub mod adx;
pub mod ichimoku;
pub mod supertrend;

pub use adx::{Adx, AdxOutput};
pub use ichimoku::{Ichimoku, IchimokuOutput};
pub use supertrend::{SuperTrend, SuperTrendOutput, Trend};
