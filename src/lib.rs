#![deny(unreachable_pub)]

// Core modules
mod errors;
pub mod types;

// Feature modules
pub mod assessment;

// Re-exports
pub use assessment::config::AssessmentConfig;
pub use assessment::infra::{init_logging, LogConfig, LogFormat};
pub use assessment::reference::{EventTree, FailureRate, ReferenceTables};
pub use assessment::risk::{
    AcceptanceCriterion, ComponentSummary, FacilitySummary, FnLineCriterion, ParetoMetric,
    RiskAggregator, RiskClass, RiskValue,
};
pub use assessment::scenario::{Project, ScenarioGenerator, ScenarioRecord, ScenarioSet};
pub use errors::{Error, Result};
pub use types::*;
