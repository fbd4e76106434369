//! Unit-cost tables for the damage estimator.

use serde::{Deserialize, Serialize};

/// Replacement cost of equipment by class.
///
/// All figures are in the same currency unit as `Substance::price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCosts {
    /// Pipeline cost per metre per 100 mm of bore
    pub pipeline_per_metre: f64,
    /// Pump unit price (includes its piping)
    pub pump_unit: f64,
    /// Pump piping cost per metre per 100 mm of bore
    pub pump_piping_per_metre: f64,
    /// Storage tank cost per m³
    pub tank_per_m3: f64,
    /// Truck tank cost per m³
    pub truck_tank_per_m3: f64,
    /// Process device cost per m³
    pub device_per_m3: f64,
}

impl Default for UnitCosts {
    fn default() -> Self {
        Self {
            pipeline_per_metre: 8_000.0,
            pump_unit: 1_500_000.0,
            pump_piping_per_metre: 8_000.0,
            tank_per_m3: 30_000.0,
            truck_tank_per_m3: 60_000.0,
            device_per_m3: 150_000.0,
        }
    }
}

/// Damage estimator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    pub unit_costs: UnitCosts,
    /// Liquidation cost as a share of direct losses
    pub liquidation_fraction: f64,
    /// Indirect (lost production) cost as a share of direct losses
    pub indirect_fraction: f64,
    /// Compensation per fatality
    pub fatality_cost: f64,
    /// Compensation per injury
    pub injury_cost: f64,
    /// Air pollution charge per tonne released to the atmosphere
    pub air_pollution_per_t: f64,
    /// Soil contamination charge per m² of spill
    pub soil_pollution_per_m2: f64,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            unit_costs: UnitCosts::default(),
            liquidation_fraction: 0.1,
            indirect_fraction: 0.25,
            fatality_cost: 2_000_000.0,
            injury_cost: 300_000.0,
            air_pollution_per_t: 25_000.0,
            soil_pollution_per_m2: 1_200.0,
        }
    }
}

impl DamageConfig {
    pub fn with_fatality_cost(mut self, cost: f64) -> Self {
        self.fatality_cost = cost;
        self
    }

    pub fn with_liquidation_fraction(mut self, fraction: f64) -> Self {
        self.liquidation_fraction = fraction;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let u = &self.unit_costs;
        for (name, value) in [
            ("unit_costs.pipeline_per_metre", u.pipeline_per_metre),
            ("unit_costs.pump_unit", u.pump_unit),
            ("unit_costs.pump_piping_per_metre", u.pump_piping_per_metre),
            ("unit_costs.tank_per_m3", u.tank_per_m3),
            ("unit_costs.truck_tank_per_m3", u.truck_tank_per_m3),
            ("unit_costs.device_per_m3", u.device_per_m3),
            ("liquidation_fraction", self.liquidation_fraction),
            ("indirect_fraction", self.indirect_fraction),
            ("fatality_cost", self.fatality_cost),
            ("injury_cost", self.injury_cost),
            ("air_pollution_per_t", self.air_pollution_per_t),
            ("soil_pollution_per_m2", self.soil_pollution_per_m2),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(format!("{name} must be finite and >= 0.0, got {value}"));
            }
        }
        Ok(())
    }
}
