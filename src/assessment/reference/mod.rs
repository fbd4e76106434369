//! Reference tables: failure frequencies and event trees.
//!
//! Tables are immutable once built. Every lookup either finds its key or
//! fails with a configuration error; a missing entry is never read as zero.
//!
//! Tables load from TOML:
//!
//! ```toml
//! [[failure_rate]]
//! archetype = "tank"
//! category = 1
//! full = 5e-6
//! partial = 1e-4
//!
//! [[event_tree]]
//! archetype = "tank"
//! category = "flammable_liquid"
//! full = [{ branch = "pool_fire", weight = 0.3 }, { branch = "no_effect", weight = 0.7 }]
//! partial = [{ branch = "pool_fire", weight = 0.1 }, { branch = "no_effect", weight = 0.9 }]
//! ```

mod builtin;
mod event_tree;
mod failure_rate;

pub use event_tree::*;
pub use failure_rate::*;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::infra::targets;
use crate::errors::{Error, Result};
use crate::types::{Archetype, Branch, Severity, SubstanceCategory};

/// Failure categories covered by the built-in tables.
pub const BUILTIN_CATEGORIES: [u8; 3] = [1, 2, 3];

/// Failure frequency and event tree lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    event_trees: BTreeMap<(Archetype, SubstanceCategory), EventTree>,
    failure_rates: BTreeMap<(Archetype, u8), FailureRate>,
}

impl ReferenceTables {
    /// Tables with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Generic tables covering every archetype, every substance category
    /// and failure categories 1-3.
    pub fn builtin() -> Self {
        let mut tables = Self::empty();
        for archetype in Archetype::ALL {
            for category in SubstanceCategory::ALL {
                tables
                    .event_trees
                    .insert((archetype, category), builtin::event_tree(archetype, category));
            }
            for (category, rate) in BUILTIN_CATEGORIES
                .into_iter()
                .zip(builtin::failure_rates(archetype))
            {
                tables.failure_rates.insert((archetype, category), rate);
            }
        }
        tables
    }

    /// Add or replace an event tree after validating it.
    pub fn insert_event_tree(
        &mut self,
        archetype: Archetype,
        category: SubstanceCategory,
        tree: EventTree,
    ) -> Result<()> {
        tree.validate(archetype, category)?;
        self.event_trees.insert((archetype, category), tree);
        Ok(())
    }

    /// Add or replace a failure rate after validating it.
    pub fn insert_failure_rate(
        &mut self,
        archetype: Archetype,
        category: u8,
        rate: FailureRate,
    ) -> Result<()> {
        if category == 0 {
            return Err(Error::table(format!("{archetype}: failure category 0")));
        }
        rate.validate(archetype, category)?;
        self.failure_rates.insert((archetype, category), rate);
        Ok(())
    }

    pub fn event_tree(&self, archetype: Archetype, category: SubstanceCategory) -> Result<&EventTree> {
        self.event_trees
            .get(&(archetype, category))
            .ok_or(Error::MissingEventTree { archetype, category })
    }

    pub fn failure_rate(&self, archetype: Archetype, category: u8) -> Result<FailureRate> {
        self.failure_rates
            .get(&(archetype, category))
            .copied()
            .ok_or(Error::MissingFailureRate { archetype, category })
    }

    /// Re-check every entry.
    pub fn validate(&self) -> Result<()> {
        for (&(archetype, category), tree) in &self.event_trees {
            tree.validate(archetype, category)?;
        }
        for (&(archetype, category), rate) in &self.failure_rates {
            rate.validate(archetype, category)?;
        }
        Ok(())
    }

    pub fn event_tree_count(&self) -> usize {
        self.event_trees.len()
    }

    pub fn failure_rate_count(&self) -> usize {
        self.failure_rates.len()
    }

    /// Parse and validate tables from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: TablesFile = toml::from_str(s)?;
        let mut tables = Self::empty();

        for entry in file.failure_rate {
            let key = (entry.archetype, entry.category);
            if tables.failure_rates.contains_key(&key) {
                return Err(Error::table(format!(
                    "duplicate failure rate for {} / category {}",
                    entry.archetype, entry.category
                )));
            }
            tables.insert_failure_rate(
                entry.archetype,
                entry.category,
                FailureRate::new(entry.full, entry.partial),
            )?;
        }

        for entry in file.event_tree {
            let key = (entry.archetype, entry.category);
            if tables.event_trees.contains_key(&key) {
                return Err(Error::table(format!(
                    "duplicate event tree for {} / {}",
                    entry.archetype, entry.category
                )));
            }
            let tree = EventTree::new(parse_branches(&entry.full)?, parse_branches(&entry.partial)?);
            tables.insert_event_tree(entry.archetype, entry.category, tree)?;
        }

        debug!(
            target: targets::REFERENCE,
            event_trees = tables.event_trees.len(),
            failure_rates = tables.failure_rates.len(),
            "Parsed reference tables"
        );
        Ok(tables)
    }

    /// Load tables from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let tables = Self::from_toml_str(&content)?;
        info!(
            target: targets::REFERENCE,
            path = %path.display(),
            event_trees = tables.event_trees.len(),
            failure_rates = tables.failure_rates.len(),
            "Loaded reference tables"
        );
        Ok(tables)
    }

    /// Serialize in the format accepted by [`ReferenceTables::from_toml_str`].
    pub fn to_toml_string(&self) -> Result<String> {
        let file = TablesFile {
            failure_rate: self
                .failure_rates
                .iter()
                .map(|(&(archetype, category), rate)| FailureRateEntry {
                    archetype,
                    category,
                    full: rate.full,
                    partial: rate.partial,
                })
                .collect(),
            event_tree: self
                .event_trees
                .iter()
                .map(|(&(archetype, category), tree)| EventTreeEntry {
                    archetype,
                    category,
                    full: branch_entries(tree, Severity::Full),
                    partial: branch_entries(tree, Severity::Partial),
                })
                .collect(),
        };
        toml::to_string(&file).map_err(|e| Error::Toml(e.to_string()))
    }
}

// On-disk layout. Branch tags stay strings until validation so an unknown
// tag surfaces as `Error::UnknownBranch` rather than a parse error.

#[derive(Debug, Default, Serialize, Deserialize)]
struct TablesFile {
    #[serde(default)]
    failure_rate: Vec<FailureRateEntry>,
    #[serde(default)]
    event_tree: Vec<EventTreeEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FailureRateEntry {
    archetype: Archetype,
    category: u8,
    full: f64,
    partial: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct EventTreeEntry {
    archetype: Archetype,
    category: SubstanceCategory,
    full: Vec<BranchEntry>,
    partial: Vec<BranchEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BranchEntry {
    branch: String,
    weight: f64,
}

fn parse_branches(entries: &[BranchEntry]) -> Result<BranchList> {
    entries
        .iter()
        .map(|e| -> Result<WeightedBranch> {
            Ok(WeightedBranch::new(e.branch.parse::<Branch>()?, e.weight))
        })
        .collect()
}

fn branch_entries(tree: &EventTree, severity: Severity) -> Vec<BranchEntry> {
    tree.branches(severity)
        .iter()
        .map(|e| BranchEntry {
            branch: e.branch.as_str().to_string(),
            weight: e.weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_TABLE: &str = r#"
        [[failure_rate]]
        archetype = "tank"
        category = 1
        full = 5e-6
        partial = 1e-4

        [[event_tree]]
        archetype = "tank"
        category = "flammable_liquid"
        full = [{ branch = "pool_fire", weight = 0.3 }, { branch = "no_effect", weight = 0.7 }]
        partial = [{ branch = "pool_fire", weight = 0.1 }, { branch = "no_effect", weight = 0.9 }]
    "#;

    #[test]
    fn test_builtin_covers_every_key() {
        let tables = ReferenceTables::builtin();
        assert!(tables.validate().is_ok());
        for archetype in Archetype::ALL {
            for category in SubstanceCategory::ALL {
                assert!(tables.event_tree(archetype, category).is_ok());
            }
            for category in BUILTIN_CATEGORIES {
                assert!(tables.failure_rate(archetype, category).is_ok());
            }
        }
        assert_eq!(tables.event_tree_count(), 20);
        assert_eq!(tables.failure_rate_count(), 15);
    }

    #[test]
    fn test_builtin_weights_sum_to_one() {
        let tables = ReferenceTables::builtin();
        for archetype in Archetype::ALL {
            for category in SubstanceCategory::ALL {
                let tree = tables.event_tree(archetype, category).unwrap();
                for severity in Severity::ALL {
                    let sum: f64 = tree.branches(severity).iter().map(|b| b.weight).sum();
                    assert!((sum - 1.0).abs() <= WEIGHT_TOLERANCE, "{archetype}/{category}/{severity}: {sum}");
                }
            }
        }
    }

    #[test]
    fn test_missing_keys_are_errors() {
        let tables = ReferenceTables::builtin();
        assert_eq!(
            tables.failure_rate(Archetype::Pump, 9),
            Err(Error::MissingFailureRate {
                archetype: Archetype::Pump,
                category: 9
            })
        );
        let empty = ReferenceTables::empty();
        assert!(matches!(
            empty.event_tree(Archetype::Tank, SubstanceCategory::Toxic),
            Err(Error::MissingEventTree { .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let tables = ReferenceTables::from_toml_str(SMALL_TABLE).unwrap();
        assert_eq!(tables.event_tree_count(), 1);
        let rate = tables.failure_rate(Archetype::Tank, 1).unwrap();
        assert_eq!(rate.partial, 1e-4);
        let tree = tables
            .event_tree(Archetype::Tank, SubstanceCategory::FlammableLiquid)
            .unwrap();
        assert_eq!(tree.branches(Severity::Full)[0].branch, Branch::PoolFire);
    }

    #[test]
    fn test_unknown_branch_tag_rejected() {
        let toml = SMALL_TABLE.replace("\"pool_fire\", weight = 0.3", "\"jet_fire\", weight = 0.3");
        assert_eq!(
            ReferenceTables::from_toml_str(&toml),
            Err(Error::UnknownBranch("jet_fire".to_string()))
        );
    }

    #[test]
    fn test_bad_weights_rejected_on_load() {
        let toml = SMALL_TABLE.replace("weight = 0.7", "weight = 0.8");
        assert!(matches!(
            ReferenceTables::from_toml_str(&toml),
            Err(Error::BranchWeights { .. })
        ));
    }

    #[test]
    fn test_negative_frequency_rejected_on_load() {
        let toml = SMALL_TABLE.replace("full = 5e-6", "full = -5e-6");
        assert!(matches!(
            ReferenceTables::from_toml_str(&toml),
            Err(Error::Table(_))
        ));
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let doubled = format!("{SMALL_TABLE}\n{SMALL_TABLE}");
        let err = ReferenceTables::from_toml_str(&doubled).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn test_builtin_toml_round_trip() {
        let builtin = ReferenceTables::builtin();
        let text = builtin.to_toml_string().unwrap();
        let parsed = ReferenceTables::from_toml_str(&text).unwrap();
        assert_eq!(parsed, builtin);
    }
}
