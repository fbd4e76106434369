//! Per-component and facility risk figures.

use serde::{Deserialize, Serialize};

use crate::assessment::scenario::ScenarioRecord;

/// A risk level that may be undefined (no risk or no exposed personnel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskValue {
    Defined(f64),
    Undefined,
}

impl RiskValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            RiskValue::Defined(v) => Some(*v),
            RiskValue::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RiskValue::Defined(_))
    }
}

/// Aggregate figures over a group of scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    /// Hazard component name (or the facility name)
    pub name: String,
    pub scenario_count: usize,
    pub max_total_damage: f64,
    pub max_environmental_damage: f64,
    pub max_casualties: u32,
    pub max_injured: u32,
    /// Σ casualty_risk, fatalities per year
    pub collective_fatal_risk: f64,
    /// Σ injury_risk, injuries per year
    pub collective_injury_risk: f64,
    /// Collective fatal risk per employee, 1/yr
    pub individual_risk: RiskValue,
    /// Individual risk in parts per million
    pub ppm: RiskValue,
    /// `10·log10(ppm / reference_ppm)`
    pub db_r: RiskValue,
    /// Highest frequency among scenarios with at least one fatality
    pub max_fatal_frequency: f64,
}

impl ComponentSummary {
    /// Summarize `records` for a site with `employee_count` people.
    pub fn from_records<'a, I>(
        name: impl Into<String>,
        records: I,
        employee_count: u32,
        reference_ppm: f64,
    ) -> Self
    where
        I: IntoIterator<Item = &'a ScenarioRecord>,
    {
        let mut summary = Self {
            name: name.into(),
            scenario_count: 0,
            max_total_damage: 0.0,
            max_environmental_damage: 0.0,
            max_casualties: 0,
            max_injured: 0,
            collective_fatal_risk: 0.0,
            collective_injury_risk: 0.0,
            individual_risk: RiskValue::Undefined,
            ppm: RiskValue::Undefined,
            db_r: RiskValue::Undefined,
            max_fatal_frequency: 0.0,
        };

        for r in records {
            summary.scenario_count += 1;
            summary.max_total_damage = summary.max_total_damage.max(r.damage.total);
            summary.max_environmental_damage =
                summary.max_environmental_damage.max(r.damage.environmental);
            summary.max_casualties = summary.max_casualties.max(r.casualties);
            summary.max_injured = summary.max_injured.max(r.injured);
            summary.collective_fatal_risk += r.casualty_risk;
            summary.collective_injury_risk += r.injury_risk;
            if r.casualties >= 1 {
                summary.max_fatal_frequency = summary.max_fatal_frequency.max(r.probability);
            }
        }

        if employee_count > 0 {
            let individual = summary.collective_fatal_risk / f64::from(employee_count);
            let ppm = individual * 1e6;
            summary.individual_risk = RiskValue::Defined(individual);
            summary.ppm = RiskValue::Defined(ppm);
            if ppm > 0.0 {
                summary.db_r = RiskValue::Defined(10.0 * (ppm / reference_ppm).log10());
            }
        }
        summary
    }
}
