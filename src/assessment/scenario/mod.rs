//! Scenario orchestration.
//!
//! - `record`: `ScenarioRecord`, one (equipment, severity, branch) outcome
//! - `profile`: `EquipmentProfile`, the per-archetype rules
//! - `generator`: `ScenarioGenerator`, one equipment instance at a time
//! - `project`: `Project` input and the complete `ScenarioSet`

mod generator;
mod profile;
mod project;
mod record;

pub use generator::*;
pub use profile::*;
pub use project::*;
pub use record::*;
