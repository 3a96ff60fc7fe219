use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No instrument configuration for symbol '{0}'")]
    ConfigurationNotFound(String),

    #[error("Price series is empty")]
    EmptySeries,

    #[error("Column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
