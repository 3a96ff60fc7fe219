//! Signal fusion: turns an indicator bundle into one trading recommendation.

pub mod categories;
pub mod correlation;
pub mod engine;
pub mod history;
pub mod rationale;
pub mod scoring;

pub use categories::{decide, CategoryWeights, DecisionThresholds};
pub use correlation::{analyze_cross_pair, CorrelationReport, CrossPairRecommendation};
pub use engine::{fuse, EngineStatus, InstrumentStatus, SignalEngine};
pub use history::SignalHistory;
pub use rationale::rationale;
pub use scoring::FusionScores;
