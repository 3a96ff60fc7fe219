pub mod config;
pub mod error;
pub mod execution;
pub mod instrument;
pub mod types;

pub use config::{Config, CrossPairSpec, LogFormat, DEFAULT_HISTORY_CAPACITY};
pub use error::{Error, Result};
pub use execution::{ExecutionResult, SignalExecutor};
pub use instrument::{InstrumentConfig, InstrumentFileConfig, InstrumentRegistry};
pub use types::*;
