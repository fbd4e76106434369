//! Top-level assessment configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AggregationConfig, DamageConfig, EnvironmentConfig, HarmPolicy, ReleaseConfig};
use crate::errors::{Error, Result};

/// Everything the engine needs besides the reference tables and the project.
///
/// Every section has defaults, so a TOML file only needs the values it
/// overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub environment: EnvironmentConfig,
    pub release: ReleaseConfig,
    pub damage: DamageConfig,
    pub harm: HarmPolicy,
    pub aggregation: AggregationConfig,
}

impl AssessmentConfig {
    pub fn with_environment(mut self, environment: EnvironmentConfig) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_release(mut self, release: ReleaseConfig) -> Self {
        self.release = release;
        self
    }

    pub fn with_damage(mut self, damage: DamageConfig) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_harm(mut self, harm: HarmPolicy) -> Self {
        self.harm = harm;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationConfig) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Validate every section, prefixing the failing section name.
    pub fn validate(&self) -> Result<()> {
        self.environment
            .validate()
            .map_err(|e| Error::config(format!("environment: {e}")))?;
        self.release
            .validate()
            .map_err(|e| Error::config(format!("release: {e}")))?;
        self.damage
            .validate()
            .map_err(|e| Error::config(format!("damage: {e}")))?;
        self.harm
            .validate()
            .map_err(|e| Error::config(format!("harm: {e}")))?;
        self.aggregation
            .validate()
            .map_err(|e| Error::config(format!("aggregation: {e}")))?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssessmentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Toml(e.to_string()))
    }
}
