//! Momentum indicators: RSI, MACD, Stochastic, Williams %R, CCI, Momentum, ROC.

pub mod macd;
pub mod oscillators;
pub mod rsi;
pub mod stochastic;

pub use macd::{Macd, MacdOutput};
pub use oscillators::{Cci, Momentum, Roc, WilliamsR};
pub use rsi::Rsi;
pub use stochastic::{Stochastic, StochasticOutput};
