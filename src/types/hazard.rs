//! Severity and hazard branch tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Loss-of-containment severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Full rupture / complete loss of containment
    Full,
    /// Partial loss of containment (leak)
    Partial,
}

impl Severity {
    /// Emission order used by the scenario generator.
    pub const ALL: [Severity; 2] = [Severity::Full, Severity::Partial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Full => "full",
            Severity::Partial => "partial",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard event type at the end of an event tree path.
///
/// Closed set: every dispatch site matches exhaustively, so adding a branch
/// forces every calculator, policy table and profile to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Branch {
    PoolFire,
    Explosion,
    FlashFire,
    ToxicDispersion,
    NoEffect,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::PoolFire,
        Branch::Explosion,
        Branch::FlashFire,
        Branch::ToxicDispersion,
        Branch::NoEffect,
    ];

    /// Stable tag used in configuration files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::PoolFire => "pool_fire",
            Branch::Explosion => "explosion",
            Branch::FlashFire => "flash_fire",
            Branch::ToxicDispersion => "toxic_dispersion",
            Branch::NoEffect => "no_effect",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Branch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pool_fire" => Ok(Branch::PoolFire),
            "explosion" => Ok(Branch::Explosion),
            "flash_fire" => Ok(Branch::FlashFire),
            "toxic_dispersion" => Ok(Branch::ToxicDispersion),
            "no_effect" => Ok(Branch::NoEffect),
            other => Err(Error::UnknownBranch(other.to_string())),
        }
    }
}

impl TryFrom<String> for Branch {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> Self {
        branch.as_str().to_string()
    }
}
