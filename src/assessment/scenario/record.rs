//! Scenario records.

use serde::{Deserialize, Serialize};

use crate::assessment::damage::DamageBreakdown;
use crate::assessment::physics::{Evaporation, ExplosionZones, FlashZones, PoolFireZones, ToxicZones};
use crate::types::{Archetype, Branch, Equipment, Severity};

/// One accident scenario: an (equipment, severity, branch) outcome with its
/// physical zones, consequences and annual probability.
///
/// Records are built once from [`ScenarioRecord::new`], where every zone,
/// harm and damage field starts at zero, and are not modified after the
/// generator emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Project-wide scenario number
    pub index: u32,
    pub equipment_id: String,
    pub equipment_name: String,
    pub hazard_component: String,
    pub archetype: Archetype,
    pub substance_id: String,
    pub severity: Severity,
    pub branch: Branch,

    /// Substance held by the equipment, t
    pub mass_in_equipment: f64,
    /// Substance released by the accident, t
    pub mass_in_accident: f64,
    /// Substance driving the hazard effect, t
    pub mass_in_factor: f64,
    /// Spill surface, m²
    pub pool_area: f64,
    /// Duration of the release, s
    pub release_duration: f64,
    pub evaporation: Evaporation,

    pub pool_fire: PoolFireZones,
    pub explosion: ExplosionZones,
    pub flash: FlashZones,
    pub toxic: ToxicZones,

    pub casualties: u32,
    pub injured: u32,
    pub damage: DamageBreakdown,

    /// Annual probability, 1/yr
    pub probability: f64,
    /// Expected fatalities per year
    pub casualty_risk: f64,
    /// Expected injuries per year
    pub injury_risk: f64,
    /// Expected loss per year
    pub expected_damage: f64,
    /// Expected released mass per year, t
    pub mass_risk: f64,
}

impl ScenarioRecord {
    /// A record with identity set and every computed field zero.
    pub fn new(index: u32, equipment: &Equipment, severity: Severity, branch: Branch) -> Self {
        Self {
            index,
            equipment_id: equipment.id.clone(),
            equipment_name: equipment.label().to_string(),
            hazard_component: equipment.hazard_component.clone(),
            archetype: equipment.archetype(),
            substance_id: equipment.substance_id.clone(),
            severity,
            branch,
            mass_in_equipment: 0.0,
            mass_in_accident: 0.0,
            mass_in_factor: 0.0,
            pool_area: 0.0,
            release_duration: 0.0,
            evaporation: Evaporation::default(),
            pool_fire: PoolFireZones::default(),
            explosion: ExplosionZones::default(),
            flash: FlashZones::default(),
            toxic: ToxicZones::default(),
            casualties: 0,
            injured: 0,
            damage: DamageBreakdown::default(),
            probability: 0.0,
            casualty_risk: 0.0,
            injury_risk: 0.0,
            expected_damage: 0.0,
            mass_risk: 0.0,
        }
    }

    /// Has no physical zone, harm or damage been recorded?
    pub fn has_no_consequences(&self) -> bool {
        self.mass_in_factor == 0.0
            && self.pool_area == 0.0
            && self.evaporation == Evaporation::default()
            && self.pool_fire == PoolFireZones::default()
            && self.explosion == ExplosionZones::default()
            && self.flash == FlashZones::default()
            && self.toxic == ToxicZones::default()
            && self.casualties == 0
            && self.injured == 0
            && self.damage == DamageBreakdown::default()
            && self.casualty_risk == 0.0
            && self.injury_risk == 0.0
            && self.expected_damage == 0.0
    }

    /// Short label for charts and tables, e.g. `C12 P-101 full/pool_fire`.
    pub fn label(&self) -> String {
        format!(
            "C{} {} {}/{}",
            self.index, self.equipment_name, self.severity, self.branch
        )
    }
}
