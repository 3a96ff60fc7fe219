use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result};

/// Static per-symbol sizing and risk parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Trading symbol, e.g. "BTCUSD".
    pub symbol: String,
    pub pip_value: f64,
    /// Contract size of one lot.
    pub lot_size: f64,
    /// Smallest tradeable lot.
    pub min_lot: f64,
    pub leverage: u32,
    /// Absolute spread tolerance in quote currency. Used to normalise ATR.
    pub spread_tolerance: f64,
    /// Maximum fraction of a lot allocated to one position (e.g. 0.5 = 50%).
    pub max_allocation: f64,
    /// Maximum loss fraction from entry (e.g. 0.03 = 3%).
    pub stop_loss_pct: f64,
    /// Target gain fraction from entry (e.g. 0.05 = 5%).
    pub take_profit_pct: f64,
    /// Trades around the clock (crypto, gold CFDs).
    #[serde(default = "default_true")]
    pub continuous_trading: bool,
}

fn default_true() -> bool {
    true
}

impl InstrumentConfig {
    fn validate(&self) -> Result<()> {
        let positive = [
            ("pip_value", self.pip_value),
            ("lot_size", self.lot_size),
            ("min_lot", self.min_lot),
            ("spread_tolerance", self.spread_tolerance),
            ("max_allocation", self.max_allocation),
            ("stop_loss_pct", self.stop_loss_pct),
            ("take_profit_pct", self.take_profit_pct),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "instrument '{}': {field} must be a positive number, got {value}",
                    self.symbol
                )));
            }
        }
        if self.max_allocation > 1.0 {
            return Err(Error::Config(format!(
                "instrument '{}': max_allocation must not exceed 1.0",
                self.symbol
            )));
        }
        Ok(())
    }
}

/// Instrument file (TOML).
///
/// Example `config/instruments.toml`:
/// ```toml
/// [[instrument]]
/// symbol = "BTCUSD"
/// pip_value = 0.01
/// lot_size = 1.0
/// min_lot = 0.001
/// leverage = 10
/// spread_tolerance = 50.0
/// max_allocation = 0.5
/// stop_loss_pct = 0.03
/// take_profit_pct = 0.05
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentFileConfig {
    #[serde(rename = "instrument")]
    pub instruments: Vec<InstrumentConfig>,
}

impl InstrumentFileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read instrument config at '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Read-only lookup of instrument parameters by symbol.
#[derive(Debug, Clone, Default)]
pub struct InstrumentRegistry {
    instruments: HashMap<String, InstrumentConfig>,
}

impl InstrumentRegistry {
    /// Validate every entry and index it by symbol. Later duplicates win.
    pub fn new(instruments: Vec<InstrumentConfig>) -> Result<Self> {
        let mut map = HashMap::with_capacity(instruments.len());
        for cfg in instruments {
            cfg.validate()?;
            if map.contains_key(&cfg.symbol) {
                warn!(symbol = %cfg.symbol, "Duplicate instrument entry, keeping the last one");
            }
            map.insert(cfg.symbol.clone(), cfg);
        }
        Ok(Self { instruments: map })
    }

    pub fn from_file(file_cfg: InstrumentFileConfig) -> Result<Self> {
        let registry = Self::new(file_cfg.instruments)?;
        info!(count = registry.len(), "Loaded instrument configuration");
        Ok(registry)
    }

    /// BTCUSD, XAUUSD and the BTCXAU cross with their stock parameters.
    pub fn with_defaults() -> Self {
        let defaults = vec![
            InstrumentConfig {
                symbol: "BTCUSD".into(),
                pip_value: 0.01,
                lot_size: 1.0,
                min_lot: 0.001,
                leverage: 10,
                spread_tolerance: 50.0,
                max_allocation: 0.5,
                stop_loss_pct: 0.03,
                take_profit_pct: 0.05,
                continuous_trading: true,
            },
            InstrumentConfig {
                symbol: "XAUUSD".into(),
                pip_value: 0.01,
                lot_size: 100.0,
                min_lot: 0.01,
                leverage: 50,
                spread_tolerance: 0.50,
                max_allocation: 0.3,
                stop_loss_pct: 0.02,
                take_profit_pct: 0.04,
                continuous_trading: true,
            },
            InstrumentConfig {
                symbol: "BTCXAU".into(),
                pip_value: 0.0001,
                lot_size: 1.0,
                min_lot: 0.001,
                leverage: 5,
                spread_tolerance: 0.01,
                max_allocation: 0.2,
                stop_loss_pct: 0.04,
                take_profit_pct: 0.06,
                continuous_trading: true,
            },
        ];
        Self {
            instruments: defaults
                .into_iter()
                .map(|cfg| (cfg.symbol.clone(), cfg))
                .collect(),
        }
    }

    pub fn get(&self, symbol: &str) -> Result<&InstrumentConfig> {
        self.instruments
            .get(symbol)
            .ok_or_else(|| Error::ConfigurationNotFound(symbol.to_string()))
    }

    /// Symbols in lexical order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.instruments.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
