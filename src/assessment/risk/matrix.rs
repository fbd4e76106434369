//! Risk-matrix rows and acceptance criteria.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::scenario::ScenarioRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Acceptable,
    Tolerable,
    Unacceptable,
}

/// Classifies a (frequency, consequence) point.
///
/// Acceptance thresholds are regulatory policy and are supplied by the
/// caller; [`FnLineCriterion`] is one ready-made implementation.
pub trait AcceptanceCriterion: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn classify(&self, frequency: f64, casualties: u32, damage: f64) -> RiskClass;
}

/// Two F·N^α limit lines on the F/N plane.
///
/// A point below `acceptable / N^α` is acceptable, one at or above
/// `unacceptable / N^α` is unacceptable, anything between is tolerable.
/// Scenarios without fatalities are acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FnLineCriterion {
    /// F·N^α at or below this is acceptable, 1/yr
    pub acceptable: f64,
    /// F·N^α at or above this is unacceptable, 1/yr
    pub unacceptable: f64,
    /// Risk aversion exponent
    pub alpha: f64,
}

impl Default for FnLineCriterion {
    fn default() -> Self {
        Self {
            acceptable: 1e-6,
            unacceptable: 1e-4,
            alpha: 1.0,
        }
    }
}

impl FnLineCriterion {
    pub fn new(acceptable: f64, unacceptable: f64, alpha: f64) -> Self {
        Self {
            acceptable,
            unacceptable,
            alpha,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.acceptable > 0.0) {
            return Err(format!("acceptable must be > 0.0, got {}", self.acceptable));
        }
        if !(self.unacceptable > self.acceptable) {
            return Err(format!(
                "unacceptable ({}) must exceed acceptable ({})",
                self.unacceptable, self.acceptable
            ));
        }
        if !(self.alpha > 0.0) {
            return Err(format!("alpha must be > 0.0, got {}", self.alpha));
        }
        Ok(())
    }
}

impl AcceptanceCriterion for FnLineCriterion {
    fn name(&self) -> &str {
        "fn-line"
    }

    fn classify(&self, frequency: f64, casualties: u32, _damage: f64) -> RiskClass {
        if casualties == 0 {
            return RiskClass::Acceptable;
        }
        let weighted = frequency * f64::from(casualties).powf(self.alpha);
        if weighted <= self.acceptable {
            RiskClass::Acceptable
        } else if weighted >= self.unacceptable {
            RiskClass::Unacceptable
        } else {
            RiskClass::Tolerable
        }
    }
}

/// One scenario placed on the frequency/consequence plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrixRow {
    pub scenario_index: u32,
    pub label: String,
    pub hazard_component: String,
    pub frequency: f64,
    pub casualties: u32,
    pub injured: u32,
    pub total_damage: f64,
    /// Set only when a criterion was supplied
    pub class: Option<RiskClass>,
}

pub fn risk_matrix(
    records: &[ScenarioRecord],
    criterion: Option<&dyn AcceptanceCriterion>,
) -> Vec<RiskMatrixRow> {
    records
        .iter()
        .map(|r| RiskMatrixRow {
            scenario_index: r.index,
            label: r.label(),
            hazard_component: r.hazard_component.clone(),
            frequency: r.probability,
            casualties: r.casualties,
            injured: r.injured,
            total_damage: r.damage.total,
            class: criterion.map(|c| c.classify(r.probability, r.casualties, r.damage.total)),
        })
        .collect()
}
