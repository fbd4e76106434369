//! Casualty and damage-degree policy per archetype, branch and severity.
//!
//! Harm counts are exogenous policy, not computed from zone radii. The
//! default table assigns the equipment's `expected_casualties` to full
//! ruptures and a flat minimum number of injured to partial flash fires and
//! toxic releases.

use serde::{Deserialize, Serialize};

use crate::types::{Archetype, Branch, Severity};

/// Injured assumed for partial flash-fire and toxic releases regardless of
/// the expected headcount.
///
/// Flagged for domain-expert review: it is not yet settled whether this is a
/// deliberate minimum-harm convention or should scale with
/// `expected_casualties`.
pub const ASSUMED_MINIMUM_INJURED: u32 = 1;

/// How a headcount is resolved for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Headcount {
    /// Nobody
    None,
    /// The equipment's `expected_casualties`
    Expected,
    /// A fixed number of people
    Fixed(u32),
}

impl Headcount {
    pub fn resolve(&self, expected: u32) -> u32 {
        match self {
            Headcount::None => 0,
            Headcount::Expected => expected,
            Headcount::Fixed(n) => *n,
        }
    }
}

/// Harm assumptions for one (branch, severity) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmRule {
    pub casualties: Headcount,
    pub injured: Headcount,
    /// Share of the asset value destroyed, [0, 1]
    pub damage_degree: f64,
}

impl HarmRule {
    pub const fn new(casualties: Headcount, injured: Headcount, damage_degree: f64) -> Self {
        Self {
            casualties,
            injured,
            damage_degree,
        }
    }

    /// No people harmed, no asset damage.
    pub const fn harmless() -> Self {
        Self::new(Headcount::None, Headcount::None, 0.0)
    }
}

/// Full and partial rules for one branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityRules {
    pub full: HarmRule,
    pub partial: HarmRule,
}

impl SeverityRules {
    pub fn get(&self, severity: Severity) -> &HarmRule {
        match severity {
            Severity::Full => &self.full,
            Severity::Partial => &self.partial,
        }
    }
}

/// Rules for every branch of one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchRules {
    pub pool_fire: SeverityRules,
    pub explosion: SeverityRules,
    pub flash_fire: SeverityRules,
    pub toxic_dispersion: SeverityRules,
    pub no_effect: SeverityRules,
}

impl Default for BranchRules {
    fn default() -> Self {
        use Headcount::{Expected, Fixed, None};

        Self {
            pool_fire: SeverityRules {
                full: HarmRule::new(Expected, Expected, 0.5),
                partial: HarmRule::new(None, Expected, 0.25),
            },
            explosion: SeverityRules {
                full: HarmRule::new(Expected, Expected, 1.0),
                partial: HarmRule::new(None, Expected, 0.5),
            },
            flash_fire: SeverityRules {
                full: HarmRule::new(Expected, Expected, 0.3),
                partial: HarmRule::new(None, Fixed(ASSUMED_MINIMUM_INJURED), 0.15),
            },
            toxic_dispersion: SeverityRules {
                full: HarmRule::new(Expected, Expected, 0.1),
                partial: HarmRule::new(None, Fixed(ASSUMED_MINIMUM_INJURED), 0.05),
            },
            no_effect: SeverityRules {
                full: HarmRule::harmless(),
                partial: HarmRule::harmless(),
            },
        }
    }
}

impl BranchRules {
    pub fn get(&self, branch: Branch) -> &SeverityRules {
        match branch {
            Branch::PoolFire => &self.pool_fire,
            Branch::Explosion => &self.explosion,
            Branch::FlashFire => &self.flash_fire,
            Branch::ToxicDispersion => &self.toxic_dispersion,
            Branch::NoEffect => &self.no_effect,
        }
    }

    pub fn get_mut(&mut self, branch: Branch) -> &mut SeverityRules {
        match branch {
            Branch::PoolFire => &mut self.pool_fire,
            Branch::Explosion => &mut self.explosion,
            Branch::FlashFire => &mut self.flash_fire,
            Branch::ToxicDispersion => &mut self.toxic_dispersion,
            Branch::NoEffect => &mut self.no_effect,
        }
    }
}

/// Harm policy table for all archetypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmPolicy {
    pub pipeline: BranchRules,
    pub pump: BranchRules,
    pub tank: BranchRules,
    pub truck_tank: BranchRules,
    pub technological_device: BranchRules,
}

impl HarmPolicy {
    pub fn rules(&self, archetype: Archetype) -> &BranchRules {
        match archetype {
            Archetype::Pipeline => &self.pipeline,
            Archetype::Pump => &self.pump,
            Archetype::Tank => &self.tank,
            Archetype::TruckTank => &self.truck_tank,
            Archetype::TechnologicalDevice => &self.technological_device,
        }
    }

    pub fn rules_mut(&mut self, archetype: Archetype) -> &mut BranchRules {
        match archetype {
            Archetype::Pipeline => &mut self.pipeline,
            Archetype::Pump => &mut self.pump,
            Archetype::Tank => &mut self.tank,
            Archetype::TruckTank => &mut self.truck_tank,
            Archetype::TechnologicalDevice => &mut self.technological_device,
        }
    }

    pub fn rule(&self, archetype: Archetype, branch: Branch, severity: Severity) -> &HarmRule {
        self.rules(archetype).get(branch).get(severity)
    }

    /// Replace one cell of the table.
    pub fn with_rule(
        mut self,
        archetype: Archetype,
        branch: Branch,
        severity: Severity,
        rule: HarmRule,
    ) -> Self {
        let cell = self.rules_mut(archetype).get_mut(branch);
        match severity {
            Severity::Full => cell.full = rule,
            Severity::Partial => cell.partial = rule,
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for archetype in Archetype::ALL {
            for branch in Branch::ALL {
                for severity in Severity::ALL {
                    let rule = self.rule(archetype, branch, severity);
                    if !(0.0..=1.0).contains(&rule.damage_degree) {
                        return Err(format!(
                            "damage_degree for {archetype}/{branch}/{severity} must be in [0.0, 1.0], got {}",
                            rule.damage_degree
                        ));
                    }
                }
            }
            let no_effect = self.rules(archetype).no_effect;
            for severity in Severity::ALL {
                if no_effect.get(severity) != &HarmRule::harmless() {
                    return Err(format!(
                        "no_effect for {archetype}/{severity} must be harmless"
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_validates() {
        assert!(HarmPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_headcount_resolution() {
        assert_eq!(Headcount::None.resolve(7), 0);
        assert_eq!(Headcount::Expected.resolve(7), 7);
        assert_eq!(Headcount::Fixed(1).resolve(7), 1);
        assert_eq!(Headcount::Fixed(1).resolve(0), 1);
    }

    #[test]
    fn test_default_partial_flash_assumes_minimum_injured() {
        let policy = HarmPolicy::default();
        for archetype in Archetype::ALL {
            let rule = policy.rule(archetype, Branch::FlashFire, Severity::Partial);
            assert_eq!(rule.injured, Headcount::Fixed(ASSUMED_MINIMUM_INJURED));
            assert_eq!(rule.casualties, Headcount::None);
        }
    }

    #[test]
    fn test_with_rule_replaces_single_cell() {
        let policy = HarmPolicy::default().with_rule(
            Archetype::Tank,
            Branch::PoolFire,
            Severity::Full,
            HarmRule::new(Headcount::Fixed(3), Headcount::None, 0.9),
        );
        assert_eq!(
            policy.rule(Archetype::Tank, Branch::PoolFire, Severity::Full).casualties,
            Headcount::Fixed(3)
        );
        assert_eq!(
            policy.rule(Archetype::Pump, Branch::PoolFire, Severity::Full).casualties,
            Headcount::Expected
        );
    }

    #[test]
    fn test_validate_rejects_harmful_no_effect() {
        let policy = HarmPolicy::default().with_rule(
            Archetype::Pump,
            Branch::NoEffect,
            Severity::Full,
            HarmRule::new(Headcount::Expected, Headcount::None, 0.0),
        );
        let err = policy.validate().unwrap_err();
        assert!(err.contains("no_effect"), "{err}");
    }

    #[test]
    fn test_validate_rejects_damage_degree_out_of_range() {
        let policy = HarmPolicy::default().with_rule(
            Archetype::Pipeline,
            Branch::Explosion,
            Severity::Full,
            HarmRule::new(Headcount::Expected, Headcount::Expected, 1.2),
        );
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_headcount_toml_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: Headcount,
            b: Headcount,
        }
        let w: Wrapper = toml::from_str("a = \"expected\"\nb = { fixed = 2 }").unwrap();
        assert_eq!(w.a, Headcount::Expected);
        assert_eq!(w.b, Headcount::Fixed(2));
    }
}
