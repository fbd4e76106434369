//! Quantitative risk assessment engine.
//!
//! Data flows one way:
//!
//! - **reference**: event trees and failure frequencies
//! - **inventory** / **physics**: released mass and hazard zones per branch
//! - **damage**: monetary loss of one scenario
//! - **scenario**: `ScenarioGenerator` turns equipment into `ScenarioRecord`s
//! - **risk**: `RiskAggregator` summarizes a complete `ScenarioSet`
//!
//! `config` and `infra` carry the tunable assumptions and logging.

pub mod config;
pub mod damage;
pub mod infra;
pub mod inventory;
pub mod physics;
pub mod reference;
pub mod risk;
pub mod scenario;

#[cfg(test)]
mod tests;
