use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TradingSignal;

/// Outcome reported by an execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn filled(order_id: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            error: Some(error.into()),
        }
    }
}

/// Abstraction over whatever acts on a signal (broker, paper account, journal).
///
/// The signal engine never calls this itself. The orchestrator hands emitted
/// signals over after evaluation.
#[async_trait]
pub trait SignalExecutor: Send + Sync {
    async fn execute(&self, signal: &TradingSignal) -> ExecutionResult;
}
