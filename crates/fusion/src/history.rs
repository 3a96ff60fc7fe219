use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use common::TradingSignal;

/// Bounded, append-only log of emitted signals. Oldest entries are evicted
/// first once `capacity` is reached.
#[derive(Debug)]
pub struct SignalHistory {
    capacity: usize,
    entries: RwLock<VecDeque<TradingSignal>>,
}

impl SignalHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "signal history capacity must be >= 1");
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn record(&self, signal: TradingSignal) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(signal);
    }

    /// Up to `n` most recent signals, oldest first.
    pub fn latest(&self, n: usize) -> Vec<TradingSignal> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Most recent signal recorded for `symbol`.
    pub fn latest_for(&self, symbol: &str) -> Option<TradingSignal> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().rev().find(|s| s.symbol == symbol).cloned()
    }

    /// Every retained signal, oldest first.
    pub fn snapshot(&self) -> Vec<TradingSignal> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
