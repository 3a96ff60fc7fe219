use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use common::{Error, PriceSeries, Result};

/// Bars file: a JSON object mapping symbol to an array of bars.
///
/// ```json
/// { "BTCUSD": [{ "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 10 }] }
/// ```
pub fn load(path: &Path) -> Result<BTreeMap<String, PriceSeries>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read bars at '{}': {e}", path.display()))
    })?;
    let bars = parse(&content)?;
    info!(symbols = bars.len(), path = %path.display(), "Loaded price bars");
    Ok(bars)
}

pub fn parse(content: &str) -> Result<BTreeMap<String, PriceSeries>> {
    let bars: BTreeMap<String, PriceSeries> = serde_json::from_str(content)?;
    for (symbol, series) in &bars {
        if series.is_empty() {
            warn!(symbol = %symbol, "Symbol has no bars; evaluation will be rejected");
        } else if !series.has_volume() {
            warn!(symbol = %symbol, "Not every bar has a volume; skipping volume indicators");
        }
    }
    Ok(bars)
}
