use std::path::PathBuf;

use crate::{Error, Result};

/// Default number of signals retained by the history log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cross-pair analysis request: `CROSS=BASE/QUOTE`, e.g. `BTCXAU=BTCUSD/XAUUSD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossPairSpec {
    pub cross: String,
    pub base: String,
    pub quote: String,
}

impl std::str::FromStr for CrossPairSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Config(format!("CROSS_PAIR must look like 'BTCXAU=BTCUSD/XAUUSD', got '{s}'"));
        let (cross, legs) = s.split_once('=').ok_or_else(invalid)?;
        let (base, quote) = legs.split_once('/').ok_or_else(invalid)?;
        let (cross, base, quote) = (cross.trim(), base.trim(), quote.trim());
        if cross.is_empty() || base.is_empty() || quote.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            cross: cross.to_string(),
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }
}

/// Runtime configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file mapping symbol → array of bars.
    pub bars_path: PathBuf,
    /// Optional TOML instrument file; built-in instruments when absent.
    pub instruments_path: Option<PathBuf>,
    /// Optional TOML indicator parameter file; defaults when absent.
    pub indicators_path: Option<PathBuf>,
    pub history_capacity: usize,
    pub cross_pair: Option<CrossPairSpec>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the environment. Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let history_capacity = match optional_env("SIGNAL_HISTORY_CAPACITY") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "SIGNAL_HISTORY_CAPACITY must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_HISTORY_CAPACITY,
        };

        let log_format = match optional_env("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            None => LogFormat::Pretty,
            Some(f) if f == "pretty" => LogFormat::Pretty,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{other}'"
                )))
            }
        };

        Ok(Config {
            bars_path: required_env("BARS_PATH")?.into(),
            instruments_path: optional_env("INSTRUMENTS_PATH").map(PathBuf::from),
            indicators_path: optional_env("INDICATORS_PATH").map(PathBuf::from),
            history_capacity,
            cross_pair: optional_env("CROSS_PAIR").map(|s| s.parse()).transpose()?,
            log_format,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        Error::Config(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cross_pair_spec() {
        let spec: CrossPairSpec = "BTCXAU=BTCUSD/XAUUSD".parse().unwrap();
        assert_eq!(spec.cross, "BTCXAU");
        assert_eq!(spec.base, "BTCUSD");
        assert_eq!(spec.quote, "XAUUSD");
    }

    #[test]
    fn rejects_malformed_cross_pair_spec() {
        assert!("BTCXAU".parse::<CrossPairSpec>().is_err());
        assert!("BTCXAU=BTCUSD".parse::<CrossPairSpec>().is_err());
        assert!("=BTCUSD/XAUUSD".parse::<CrossPairSpec>().is_err());
    }
}
