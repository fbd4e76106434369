//! Base failure frequencies.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::{Archetype, Severity};

/// Annual frequency of a full and a partial loss of containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureRate {
    /// Full rupture, 1/yr
    pub full: f64,
    /// Partial release (leak), 1/yr
    pub partial: f64,
}

impl FailureRate {
    pub fn new(full: f64, partial: f64) -> Self {
        Self { full, partial }
    }

    pub fn get(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Full => self.full,
            Severity::Partial => self.partial,
        }
    }

    pub fn validate(&self, archetype: Archetype, category: u8) -> Result<()> {
        for severity in Severity::ALL {
            let rate = self.get(severity);
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::table(format!(
                    "{archetype} / category {category}: {severity} frequency is {rate}"
                )));
            }
        }
        Ok(())
    }
}
