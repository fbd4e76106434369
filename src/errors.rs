use thiserror::Error;

use crate::types::{Archetype, Branch, Severity, SubstanceCategory};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the assessment engine.
///
/// Every variant is fatal for the unit of work that raised it: a calculator
/// error fails the whole equipment instance, a table error fails the load.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // === Input validation ===
    /// Non-positive or non-finite geometry (length, diameter, volume, fill degree)
    #[error("Invalid geometry: {field} = {value}")]
    InvalidGeometry { field: &'static str, value: f64 },

    /// Any other physically meaningless input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // === Reference table errors ===
    /// No event tree for the archetype/substance category pair
    #[error("No event tree for {archetype} / {category}")]
    MissingEventTree {
        archetype: Archetype,
        category: SubstanceCategory,
    },

    /// No failure frequency for the archetype/failure category pair
    #[error("No failure rate for {archetype} / category {category}")]
    MissingFailureRate { archetype: Archetype, category: u8 },

    /// Branch weights of one event tree severity do not sum to 1
    #[error("Branch weights for {archetype} / {category} / {severity} sum to {sum}, expected 1")]
    BranchWeights {
        archetype: Archetype,
        category: SubstanceCategory,
        severity: Severity,
        sum: f64,
    },

    /// Unrecognized hazard branch tag
    #[error("Unknown hazard branch: {0:?}")]
    UnknownBranch(String),

    /// Event tree names a branch the equipment profile cannot produce
    #[error("Branch {branch} is not applicable to {archetype} with {category}")]
    InapplicableBranch {
        archetype: Archetype,
        category: SubstanceCategory,
        branch: Branch,
    },

    /// Malformed reference table (duplicates, mismatched severities, bad rates)
    #[error("Reference table error: {0}")]
    Table(String),

    // === Project resolution ===
    /// Equipment references a substance that was not supplied
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),

    /// Duplicate equipment identifier within a project
    #[error("Duplicate equipment id: {0}")]
    DuplicateEquipment(String),

    // === Configuration and I/O ===
    /// Configuration failed validation
    #[error("Config error: {0}")]
    Config(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(String),

    /// JSON serialization error
    #[error("Json error: {0}")]
    Json(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(String),
}

// Convenience constructors for common error patterns
impl Error {
    /// Create an input validation error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a reference table error
    pub fn table(msg: impl Into<String>) -> Self {
        Error::Table(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Is this a configuration/reference-data problem rather than bad input?
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingEventTree { .. }
                | Error::MissingFailureRate { .. }
                | Error::BranchWeights { .. }
                | Error::UnknownBranch(_)
                | Error::InapplicableBranch { .. }
                | Error::Table(_)
                | Error::Config(_)
                | Error::Toml(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Toml(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Reject non-finite or non-positive geometry.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidGeometry { field, value })
    }
}

/// Reject non-finite or negative scalar inputs.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must be finite and >= 0, got {value}"
        )))
    }
}
