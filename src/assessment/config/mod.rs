//! Configuration types for the assessment engine.
//!
//! This module is organized into focused submodules:
//!
//! - `core`: Top-level `AssessmentConfig`, TOML loading
//! - `environment`: Weather and ambient conditions
//! - `release`: Release fractions, spill and orifice assumptions
//! - `damage`: Unit-cost tables for the damage estimator
//! - `harm`: Casualty/injured and damage-degree policy
//! - `aggregation`: F/G binning, Pareto and dB_R settings

mod aggregation;
mod core;
mod damage;
mod environment;
mod harm;
mod release;

pub use aggregation::*;
pub use self::core::*;
pub use damage::*;
pub use environment::*;
pub use harm::*;
pub use release::*;
