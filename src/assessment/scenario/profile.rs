//! Per-archetype behaviour of the scenario generator.

use crate::assessment::config::{BranchRules, HarmPolicy, ReleaseConfig};
use crate::assessment::physics::hole_area;
use crate::types::{Archetype, Branch, EquipmentKind, Severity, SubstanceCategory};

/// How the released mass is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseFamily {
    /// Piping inventory times accident rate; leaks scale by the line fraction
    Line,
    /// Vessel contents; partial releases scale by the vessel fraction
    Vessel,
}

/// Equivalent hole of a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoleRule {
    /// Pipe bore, mm: a full rupture opens the whole section, a leak a fraction
    LineBore(f64),
    /// Nominal hole diameters from the release configuration
    Nominal,
}

/// Everything the generator varies by archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentProfile {
    pub archetype: Archetype,
    pub family: ReleaseFamily,
    pub hole: HoleRule,
}

impl EquipmentProfile {
    pub fn for_kind(kind: &EquipmentKind) -> Self {
        let archetype = kind.archetype();
        match kind {
            EquipmentKind::Pipeline(line) | EquipmentKind::Pump(line) => Self {
                archetype,
                family: ReleaseFamily::Line,
                hole: HoleRule::LineBore(line.diameter),
            },
            EquipmentKind::Tank(_) | EquipmentKind::TruckTank(_) | EquipmentKind::TechnologicalDevice(_) => {
                Self {
                    archetype,
                    family: ReleaseFamily::Vessel,
                    hole: HoleRule::Nominal,
                }
            }
        }
    }

    /// Can this equipment produce `branch` with a substance of `category`?
    pub fn admits(&self, branch: Branch, category: SubstanceCategory) -> bool {
        match branch {
            Branch::NoEffect => true,
            Branch::PoolFire => {
                category.is_flammable()
                    && !(self.family == ReleaseFamily::Line && category == SubstanceCategory::LiquefiedGas)
            }
            Branch::Explosion | Branch::FlashFire => category.is_flammable(),
            Branch::ToxicDispersion => category.is_toxic(),
        }
    }

    /// Hole cross-section, m².
    pub fn hole_area(&self, severity: Severity, release: &ReleaseConfig) -> f64 {
        match (self.hole, severity) {
            (HoleRule::LineBore(bore), Severity::Full) => hole_area(bore),
            (HoleRule::LineBore(bore), Severity::Partial) => release.line_leak_fraction * hole_area(bore),
            (HoleRule::Nominal, Severity::Full) => hole_area(release.vessel_full_hole_diameter),
            (HoleRule::Nominal, Severity::Partial) => hole_area(release.vessel_partial_hole_diameter),
        }
    }

    pub fn harm_rules<'a>(&self, policy: &'a HarmPolicy) -> &'a BranchRules {
        policy.rules(self.archetype)
    }
}
