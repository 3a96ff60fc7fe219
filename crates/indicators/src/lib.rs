//! Technical indicator library.
//!
//! Every indicator maps input columns to a [`Series`] of the same length,
//! with `NAN` marking bars that cannot be computed yet. Short inputs fall back
//! to each indicator's neutral value instead of failing.

pub mod builder;
pub mod bundle;
pub mod config;
pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod series;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use builder::IndicatorSetBuilder;
pub use bundle::{IndicatorBundle, IndicatorId};
pub use config::{IndicatorConfig, CROSSOVER_EMA_PERIODS};
pub use levels::{FibonacciLevels, PivotPoints};
pub use momentum::{Cci, Macd, MacdOutput, Momentum, Roc, Rsi, Stochastic, StochasticOutput, WilliamsR};
pub use series::{latest, Series};
pub use trend::{Adx, AdxOutput, Ichimoku, IchimokuOutput, SuperTrend, SuperTrendOutput, Trend};
pub use volatility::{Atr, Bands, Bollinger, Donchian, Keltner};
pub use volume::{Mfi, VolumeIndicators};
