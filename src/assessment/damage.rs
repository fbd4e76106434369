//! Damage estimator.
//!
//! Proportional cost model. The asset value of the equipment comes from the
//! unit-cost table; `damage_degree` is the share of it destroyed by the
//! scenario. Everything else is either a fraction of the direct loss or a
//! per-unit charge.

use serde::{Deserialize, Serialize};

use super::config::{DamageConfig, UnitCosts};
use crate::errors::{require_non_negative, Error, Result};
use crate::types::EquipmentKind;

/// Inputs of one damage estimate.
#[derive(Debug, Clone, Copy)]
pub struct DamageInput<'a> {
    pub casualties: u32,
    pub injured: u32,
    pub kind: &'a EquipmentKind,
    /// Contaminated ground, m²
    pub spill_area: f64,
    /// Substance lost from the equipment, t
    pub mass_inside: f64,
    /// Substance reaching the atmosphere, t
    pub mass_outside: f64,
    /// Substance price per tonne
    pub substance_price: f64,
    /// Destroyed share of the asset, [0, 1]
    pub damage_degree: f64,
}

/// Monetary loss of one scenario by component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Destroyed equipment plus lost substance
    pub direct: f64,
    /// Clean-up and liquidation of the accident
    pub liquidation: f64,
    /// Compensation for fatalities and injuries
    pub social: f64,
    /// Lost production
    pub indirect: f64,
    /// Air and soil pollution charges
    pub environmental: f64,
    pub total: f64,
}

/// Replacement value of the equipment.
pub fn asset_value(kind: &EquipmentKind, costs: &UnitCosts) -> f64 {
    match kind {
        EquipmentKind::Pipeline(line) => costs.pipeline_per_metre * line.length * line.diameter / 100.0,
        EquipmentKind::Pump(line) => {
            costs.pump_unit + costs.pump_piping_per_metre * line.length * line.diameter / 100.0
        }
        EquipmentKind::Tank(v) => costs.tank_per_m3 * v.volume,
        EquipmentKind::TruckTank(v) => costs.truck_tank_per_m3 * v.volume,
        EquipmentKind::TechnologicalDevice(v) => costs.device_per_m3 * v.volume,
    }
}

/// Estimate the damage of one scenario.
pub fn estimate_damage(input: &DamageInput<'_>, config: &DamageConfig) -> Result<DamageBreakdown> {
    if !(0.0..=1.0).contains(&input.damage_degree) {
        return Err(Error::invalid_input(format!(
            "damage_degree must be in [0, 1], got {}",
            input.damage_degree
        )));
    }
    let spill_area = require_non_negative("damage.spill_area", input.spill_area)?;
    let mass_inside = require_non_negative("damage.mass_inside", input.mass_inside)?;
    let mass_outside = require_non_negative("damage.mass_outside", input.mass_outside)?;
    let price = require_non_negative("damage.substance_price", input.substance_price)?;
    let asset = require_non_negative("damage.asset_value", asset_value(input.kind, &config.unit_costs))?;

    let direct = asset * input.damage_degree + mass_inside * price;
    let liquidation = config.liquidation_fraction * direct;
    let social = f64::from(input.casualties) * config.fatality_cost
        + f64::from(input.injured) * config.injury_cost;
    let indirect = config.indirect_fraction * direct;
    let environmental =
        config.air_pollution_per_t * mass_outside + config.soil_pollution_per_m2 * spill_area;

    Ok(DamageBreakdown {
        direct,
        liquidation,
        social,
        indirect,
        environmental,
        total: direct + liquidation + social + indirect + environmental,
    })
}
