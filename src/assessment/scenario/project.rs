//! Project-level generation and the complete scenario set.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::generator::ScenarioGenerator;
use super::record::ScenarioRecord;
use crate::assessment::infra::targets;
use crate::errors::{Error, Result};
use crate::types::{DangerousObject, Equipment, Substance};

/// A facility to assess: its site, substances and equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub object: DangerousObject,
    #[serde(default, rename = "substance")]
    pub substances: Vec<Substance>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

impl Project {
    pub fn new(object: DangerousObject) -> Self {
        Self {
            object,
            substances: Vec::new(),
            equipment: Vec::new(),
        }
    }

    pub fn with_substance(mut self, substance: Substance) -> Self {
        self.substances.push(substance);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.push(equipment);
        self
    }

    pub fn substance(&self, id: &str) -> Result<&Substance> {
        self.substances
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSubstance(id.to_string()))
    }

    /// Check identifiers, references and substance data.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for substance in &self.substances {
            if !ids.insert(substance.id.as_str()) {
                return Err(Error::invalid_input(format!(
                    "duplicate substance id: {}",
                    substance.id
                )));
            }
            substance.validate()?;
        }

        let mut ids = HashSet::new();
        for equipment in &self.equipment {
            if !ids.insert(equipment.id.as_str()) {
                return Err(Error::DuplicateEquipment(equipment.id.clone()));
            }
            self.substance(&equipment.substance_id)?;
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let project: Project = toml::from_str(content)?;
        project.validate()?;
        Ok(project)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

/// Every scenario of a project, numbered contiguously.
///
/// Only a finished generation or an explicit record list produces a set, so
/// aggregation never sees a partial project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    records: Vec<ScenarioRecord>,
}

impl ScenarioSet {
    /// Wrap a caller-owned record list as-is.
    pub fn from_records(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    /// Concatenate per-equipment batches in order and renumber from `start`.
    pub fn from_batches(batches: Vec<Vec<ScenarioRecord>>, start: u32) -> Self {
        let mut records: Vec<ScenarioRecord> = batches.into_iter().flatten().collect();
        for (index, record) in (start..).zip(records.iter_mut()) {
            record.index = index;
        }
        Self { records }
    }

    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl ScenarioGenerator<'_> {
    /// Generate every equipment instance in declaration order, threading
    /// the scenario index from 0. Any failing instance fails the project.
    pub fn generate_project(&self, project: &Project) -> Result<ScenarioSet> {
        project.validate()?;
        let mut records = Vec::new();
        let mut next = 0;
        for equipment in &project.equipment {
            let substance = project.substance(&equipment.substance_id)?;
            let (batch, after) = self.generate(equipment, substance, &project.object, next)?;
            records.extend(batch);
            next = after;
        }
        info!(
            target: targets::SCENARIO,
            object = %project.object.name,
            equipment = project.equipment.len(),
            scenarios = records.len(),
            "Project generated"
        );
        Ok(ScenarioSet::from_records(records))
    }

    /// Generate instances on the rayon pool and renumber afterwards; the
    /// result equals [`ScenarioGenerator::generate_project`].
    #[cfg(feature = "parallel")]
    pub fn generate_project_parallel(&self, project: &Project) -> Result<ScenarioSet> {
        use rayon::prelude::*;

        project.validate()?;
        let batches = project
            .equipment
            .par_iter()
            .map(|equipment| {
                let substance = project.substance(&equipment.substance_id)?;
                self.generate(equipment, substance, &project.object, 0)
                    .map(|(batch, _)| batch)
            })
            .collect::<Result<Vec<_>>>()?;
        let set = ScenarioSet::from_batches(batches, 0);
        info!(
            target: targets::SCENARIO,
            object = %project.object.name,
            equipment = project.equipment.len(),
            scenarios = set.len(),
            "Project generated in parallel"
        );
        Ok(set)
    }
}
