//! Facility-level risk aggregation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::component::ComponentSummary;
use super::curves::{fg_curve, fn_curve, FgPoint, FnPoint};
use super::matrix::{risk_matrix, AcceptanceCriterion, RiskMatrixRow};
use super::pareto::{pareto, ParetoMetric, ParetoSeries};
use crate::assessment::config::AggregationConfig;
use crate::assessment::infra::targets;
use crate::assessment::scenario::{ScenarioRecord, ScenarioSet};
use crate::types::DangerousObject;

/// Everything derived from one complete scenario set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitySummary {
    pub object: DangerousObject,
    /// Figures over every scenario of the facility
    pub facility: ComponentSummary,
    /// One summary per hazard component, in order of first appearance
    pub components: Vec<ComponentSummary>,
    pub fn_curve: Vec<FnPoint>,
    pub fg_curve: Vec<FgPoint>,
    pub pareto: ParetoSeries,
    pub risk_matrix: Vec<RiskMatrixRow>,
    /// Name of the acceptance criterion used to classify the matrix rows
    pub criterion: Option<String>,
}

/// Builds [`FacilitySummary`] values from scenario sets.
#[derive(Debug)]
pub struct RiskAggregator {
    config: AggregationConfig,
    criterion: Option<Box<dyn AcceptanceCriterion>>,
}

impl RiskAggregator {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            config: config.clone(),
            criterion: None,
        }
    }

    /// Classify risk-matrix rows with `criterion`.
    pub fn with_criterion(mut self, criterion: Box<dyn AcceptanceCriterion>) -> Self {
        self.criterion = Some(criterion);
        self
    }

    /// Summarize a complete set. An empty set yields empty curves and
    /// series, zero maxima and undefined risk levels.
    pub fn summarize(
        &self,
        set: &ScenarioSet,
        object: &DangerousObject,
        metric: ParetoMetric,
    ) -> FacilitySummary {
        let records = set.records();
        let employees = object.employee_count;
        let reference = self.config.reference_ppm;

        let components: Vec<ComponentSummary> = group_by_component(records)
            .into_iter()
            .map(|(name, group)| {
                let summary =
                    ComponentSummary::from_records(name, group, employees, reference);
                debug!(
                    target: targets::RISK,
                    component = %summary.name,
                    scenarios = summary.scenario_count,
                    collective_fatal_risk = summary.collective_fatal_risk,
                    "Component summarized"
                );
                summary
            })
            .collect();

        let facility =
            ComponentSummary::from_records(object.name.as_str(), records, employees, reference);

        let summary = FacilitySummary {
            object: object.clone(),
            components,
            fn_curve: fn_curve(records),
            fg_curve: fg_curve(records, self.config.fg_bins),
            pareto: pareto(
                records,
                metric,
                self.config.pareto_marker_pct,
                self.config.pareto_top_n,
            ),
            risk_matrix: risk_matrix(records, self.criterion.as_deref()),
            criterion: self.criterion.as_ref().map(|c| c.name().to_string()),
            facility,
        };

        info!(
            target: targets::RISK,
            object = %object.name,
            scenarios = records.len(),
            components = summary.components.len(),
            collective_fatal_risk = summary.facility.collective_fatal_risk,
            individual_risk = ?summary.facility.individual_risk,
            "Facility risk aggregated"
        );
        summary
    }
}

fn group_by_component(records: &[ScenarioRecord]) -> Vec<(&str, Vec<&ScenarioRecord>)> {
    let mut groups: Vec<(&str, Vec<&ScenarioRecord>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let name = record.hazard_component.as_str();
        let position = *positions.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::risk::matrix::{FnLineCriterion, RiskClass};
    use crate::assessment::risk::test_support::record;
    use crate::assessment::risk::RiskValue;

    fn object(employees: u32) -> DangerousObject {
        DangerousObject {
            name: "Depot".into(),
            employee_count: employees,
            view_space_class: 3,
        }
    }

    fn set() -> ScenarioSet {
        ScenarioSet::from_records(vec![
            record(0, "storage", 1e-4, 2, 1, 3e6),
            record(1, "loading", 1e-3, 1, 0, 1e6),
            record(2, "storage", 1e-5, 0, 3, 2e5),
            record(3, "loading", 5e-3, 0, 0, 0.0),
        ])
    }

    #[test]
    fn test_components_in_first_appearance_order() {
        let aggregator = RiskAggregator::new(&AggregationConfig::default());
        let summary = aggregator.summarize(&set(), &object(10), ParetoMetric::CasualtyRisk);
        let names: Vec<&str> = summary.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["storage", "loading"]);
        assert_eq!(summary.components[0].scenario_count, 2);
        assert_eq!(summary.facility.name, "Depot");
        assert_eq!(summary.facility.scenario_count, 4);
    }

    #[test]
    fn test_collective_risk_is_sum_of_components() {
        let aggregator = RiskAggregator::new(&AggregationConfig::default());
        let s = set();
        let summary = aggregator.summarize(&s, &object(10), ParetoMetric::CasualtyRisk);
        let by_component: f64 = summary
            .components
            .iter()
            .map(|c| c.collective_fatal_risk)
            .sum();
        let direct: f64 = s.iter().map(|r| r.casualty_risk).sum();
        assert!((summary.facility.collective_fatal_risk - direct).abs() < 1e-15);
        assert!((by_component - direct).abs() < 1e-15);
        assert_eq!(summary.fn_curve.len(), 2);
        assert_eq!(summary.fg_curve.len(), 21);
        assert_eq!(summary.pareto.entries.len(), 4);
        assert_eq!(summary.risk_matrix.len(), 4);
        assert_eq!(summary.criterion, None);
    }

    #[test]
    fn test_criterion_classifies_rows() {
        let aggregator = RiskAggregator::new(&AggregationConfig::default())
            .with_criterion(Box::new(FnLineCriterion::default()));
        let summary = aggregator.summarize(&set(), &object(10), ParetoMetric::ExpectedDamage);
        assert_eq!(summary.criterion.as_deref(), Some("fn-line"));
        // 1e-3 · 1 lies above the default upper line
        assert_eq!(summary.risk_matrix[1].class, Some(RiskClass::Unacceptable));
        assert_eq!(summary.risk_matrix[3].class, Some(RiskClass::Acceptable));
    }

    #[test]
    fn test_empty_set_never_fails() {
        let aggregator = RiskAggregator::new(&AggregationConfig::default());
        let summary =
            aggregator.summarize(&ScenarioSet::default(), &object(10), ParetoMetric::InjuryRisk);
        assert!(summary.components.is_empty());
        assert!(summary.fn_curve.is_empty());
        assert!(summary.fg_curve.is_empty());
        assert!(summary.pareto.entries.is_empty());
        assert_eq!(summary.facility.max_total_damage, 0.0);
        assert_eq!(summary.facility.db_r, RiskValue::Undefined);
    }

    #[test]
    fn test_top_n_from_config() {
        let config = AggregationConfig::default().with_pareto_top_n(2);
        let aggregator = RiskAggregator::new(&config);
        let summary = aggregator.summarize(&set(), &object(10), ParetoMetric::CasualtyRisk);
        assert_eq!(summary.pareto.entries.len(), 3);
        assert_eq!(summary.pareto.entries[2].scenario_index, None);
        assert_eq!(summary.pareto.entries[2].cumulative_pct, 100.0);
    }
}
