use std::path::Path;

use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// EMA periods whose crossover drives the trend score. Both must be listed in
/// `ema_periods`.
pub const CROSSOVER_EMA_PERIODS: [usize; 2] = [9, 21];

/// Indicator parameters (TOML). Every field, including fields inside the
/// nested tables, is optional in the file.
///
/// Example `config/indicators.toml`:
/// ```toml
/// sma_periods = [20, 50, 200]
/// rsi_period = 21
///
/// [macd]
/// fast = 8
/// slow = 21
/// signal = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub wma_period: usize,
    pub dema_period: usize,
    pub tema_period: usize,
    pub kama: KamaParams,
    pub rsi_period: usize,
    pub macd: MacdParams,
    pub stochastic: StochasticParams,
    pub williams_period: usize,
    pub cci_period: usize,
    pub momentum_period: usize,
    pub roc_period: usize,
    pub bollinger: BollingerParams,
    pub atr_period: usize,
    pub keltner: KeltnerParams,
    pub donchian_period: usize,
    pub adx_period: usize,
    pub supertrend: SuperTrendParams,
    pub mfi_period: usize,
    pub ichimoku: IchimokuParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KamaParams {
    pub period: usize,
    pub fast: usize,
    pub slow: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    pub k_period: usize,
    pub d_period: usize,
    pub smooth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeltnerParams {
    pub ema_period: usize,
    pub atr_period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperTrendParams {
    pub period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
}

impl Default for KamaParams {
    fn default() -> Self {
        Self {
            period: 10,
            fast: 2,
            slow: 30,
        }
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
            smooth: 3,
        }
    }
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl Default for KeltnerParams {
    fn default() -> Self {
        Self {
            ema_period: 20,
            atr_period: 10,
            multiplier: 2.0,
        }
    }
}

impl Default for SuperTrendParams {
    fn default() -> Self {
        Self {
            period: 10,
            multiplier: 3.0,
        }
    }
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![5, 10, 20, 50, 100, 200],
            ema_periods: vec![9, 12, 21, 50, 100, 200],
            wma_period: 20,
            dema_period: 20,
            tema_period: 20,
            kama: KamaParams::default(),
            rsi_period: 14,
            macd: MacdParams::default(),
            stochastic: StochasticParams::default(),
            williams_period: 14,
            cci_period: 20,
            momentum_period: 10,
            roc_period: 12,
            bollinger: BollingerParams::default(),
            atr_period: 14,
            keltner: KeltnerParams::default(),
            donchian_period: 20,
            adx_period: 14,
            supertrend: SuperTrendParams::default(),
            mfi_period: 14,
            ichimoku: IchimokuParams::default(),
        }
    }
}

impl IndicatorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read indicator config at '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject parameters the indicator constructors would panic on.
    pub fn validate(&self) -> Result<()> {
        let periods = self
            .sma_periods
            .iter()
            .map(|&p| ("sma_periods", p))
            .chain(self.ema_periods.iter().map(|&p| ("ema_periods", p)))
            .chain([
                ("wma_period", self.wma_period),
                ("dema_period", self.dema_period),
                ("tema_period", self.tema_period),
                ("kama.period", self.kama.period),
                ("rsi_period", self.rsi_period),
                ("macd.fast", self.macd.fast),
                ("macd.signal", self.macd.signal),
                ("stochastic.k_period", self.stochastic.k_period),
                ("stochastic.d_period", self.stochastic.d_period),
                ("stochastic.smooth", self.stochastic.smooth),
                ("williams_period", self.williams_period),
                ("cci_period", self.cci_period),
                ("momentum_period", self.momentum_period),
                ("roc_period", self.roc_period),
                ("bollinger.period", self.bollinger.period),
                ("atr_period", self.atr_period),
                ("keltner.ema_period", self.keltner.ema_period),
                ("keltner.atr_period", self.keltner.atr_period),
                ("donchian_period", self.donchian_period),
                ("adx_period", self.adx_period),
                ("supertrend.period", self.supertrend.period),
                ("mfi_period", self.mfi_period),
                ("ichimoku.tenkan", self.ichimoku.tenkan),
                ("ichimoku.kijun", self.ichimoku.kijun),
                ("ichimoku.senkou_b", self.ichimoku.senkou_b),
            ]);
        for (field, period) in periods {
            if period == 0 {
                return Err(Error::Config(format!("{field} must be >= 1")));
            }
        }
        for period in CROSSOVER_EMA_PERIODS {
            if !self.ema_periods.contains(&period) {
                return Err(Error::Config(format!(
                    "ema_periods must include {period}, the trend score reads EMA({period})"
                )));
            }
        }
        if self.macd.fast >= self.macd.slow {
            return Err(Error::Config(format!(
                "macd.fast ({}) must be less than macd.slow ({})",
                self.macd.fast, self.macd.slow
            )));
        }
        let multipliers = [
            ("bollinger.std_dev", self.bollinger.std_dev),
            ("keltner.multiplier", self.keltner.multiplier),
            ("supertrend.multiplier", self.supertrend.multiplier),
        ];
        for (field, value) in multipliers {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "{field} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
