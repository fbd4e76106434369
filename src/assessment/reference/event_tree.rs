//! Event trees: ordered hazard branches with conditional weights.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::errors::{Error, Result};
use crate::types::{Archetype, Branch, Severity, SubstanceCategory};

/// Tolerance on the sum of branch weights.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// One outcome of a release with its conditional probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedBranch {
    pub branch: Branch,
    pub weight: f64,
}

impl WeightedBranch {
    pub fn new(branch: Branch, weight: f64) -> Self {
        Self { branch, weight }
    }
}

/// Branch list of one severity; at most one entry per branch kind.
pub type BranchList = SmallVec<[WeightedBranch; 5]>;

/// Branches per severity for one (archetype, substance category) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTree {
    full: BranchList,
    partial: BranchList,
}

impl EventTree {
    pub fn new(full: BranchList, partial: BranchList) -> Self {
        Self { full, partial }
    }

    /// Build from `(branch, weight)` pairs.
    pub fn from_pairs(full: &[(Branch, f64)], partial: &[(Branch, f64)]) -> Self {
        let collect = |pairs: &[(Branch, f64)]| {
            pairs
                .iter()
                .map(|&(branch, weight)| WeightedBranch::new(branch, weight))
                .collect()
        };
        Self::new(collect(full), collect(partial))
    }

    /// Ordered branches for `severity`.
    pub fn branches(&self, severity: Severity) -> &[WeightedBranch] {
        match severity {
            Severity::Full => &self.full,
            Severity::Partial => &self.partial,
        }
    }

    /// Total number of branches over both severities.
    pub fn len(&self) -> usize {
        self.full.len() + self.partial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.partial.is_empty()
    }

    /// Reject empty or duplicated lists, bad weights and severities that
    /// disagree on the branch set.
    pub fn validate(&self, archetype: Archetype, category: SubstanceCategory) -> Result<()> {
        for severity in Severity::ALL {
            let list = self.branches(severity);
            if list.is_empty() {
                return Err(Error::table(format!(
                    "{archetype} / {category} / {severity}: empty branch list"
                )));
            }
            for (i, entry) in list.iter().enumerate() {
                if !entry.weight.is_finite() || entry.weight < 0.0 {
                    return Err(Error::table(format!(
                        "{archetype} / {category} / {severity}: weight of {} is {}",
                        entry.branch, entry.weight
                    )));
                }
                if list[..i].iter().any(|e| e.branch == entry.branch) {
                    return Err(Error::table(format!(
                        "{archetype} / {category} / {severity}: duplicate branch {}",
                        entry.branch
                    )));
                }
            }
            let sum: f64 = list.iter().map(|e| e.weight).sum();
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(Error::BranchWeights {
                    archetype,
                    category,
                    severity,
                    sum,
                });
            }
        }

        let same_set = self.full.len() == self.partial.len()
            && self
                .full
                .iter()
                .all(|f| self.partial.iter().any(|p| p.branch == f.branch));
        if !same_set {
            return Err(Error::table(format!(
                "{archetype} / {category}: full and partial severities list different branches"
            )));
        }
        Ok(())
    }
}
