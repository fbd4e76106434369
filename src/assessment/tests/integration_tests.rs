//! Integration tests for the generate-then-aggregate pipeline.
//!
//! These tests verify that the stages agree with each other:
//! - Built-in reference tables are complete and normalized
//! - Record probabilities follow the failure rate and event tree
//! - Release masses for lines and vessels
//! - Component and facility risk figures add up
//! - Curves, Pareto series and numbering over a real project

use crate::assessment::config::{AggregationConfig, AssessmentConfig, HarmPolicy, HarmRule, Headcount};
use crate::assessment::reference::{ReferenceTables, WEIGHT_TOLERANCE};
use crate::assessment::risk::{FnLineCriterion, ParetoMetric, RiskAggregator, RiskValue};
use crate::assessment::scenario::{Project, ScenarioGenerator, ScenarioRecord, ScenarioSet};
use crate::types::fixtures::{ammonia, chlorine, gasoline, propane};
use crate::types::{
    Archetype, Branch, DangerousObject, Equipment, EquipmentKind, FedVesselGeometry,
    LineGeometry, Severity, SubstanceCategory, VesselGeometry,
};

// =========================================================================
// Fixtures
// =========================================================================

fn object() -> DangerousObject {
    DangerousObject {
        name: "Fuel terminal".into(),
        employee_count: 25,
        view_space_class: 3,
    }
}

fn pipeline() -> Equipment {
    Equipment {
        id: "P-1".into(),
        name: "Unloading line".into(),
        hazard_component: "unloading".into(),
        substance_id: "gasoline".into(),
        pressure: 0.6,
        temperature: 20.0,
        expected_casualties: 2,
        category: 1,
        kind: EquipmentKind::Pipeline(LineGeometry {
            length: 100.0,
            diameter: 100.0,
            accident_rate: 1.0,
            flow: 0.0,
            time_out: 0.0,
        }),
    }
}

fn truck() -> Equipment {
    Equipment {
        id: "TT-1".into(),
        name: "LPG truck".into(),
        hazard_component: "loading".into(),
        substance_id: "propane".into(),
        pressure: 1.6,
        temperature: 20.0,
        expected_casualties: 3,
        category: 2,
        kind: EquipmentKind::TruckTank(VesselGeometry {
            volume: 30.0,
            fill_degree: 0.85,
        }),
    }
}

fn chlorine_tank() -> Equipment {
    Equipment {
        id: "T-1".into(),
        name: "Chlorine store".into(),
        hazard_component: "storage".into(),
        substance_id: "chlorine".into(),
        pressure: 0.8,
        temperature: 20.0,
        expected_casualties: 4,
        category: 1,
        kind: EquipmentKind::Tank(FedVesselGeometry {
            volume: 10.0,
            fill_degree: 0.8,
            bund_area: Some(30.0),
            flow: 0.0,
            time_out: 0.0,
        }),
    }
}

fn project() -> Project {
    Project::new(object())
        .with_substance(gasoline())
        .with_substance(propane())
        .with_substance(chlorine())
        .with_equipment(pipeline())
        .with_equipment(truck())
        .with_equipment(chlorine_tank())
}

fn generate(config: &AssessmentConfig) -> ScenarioSet {
    let tables = ReferenceTables::builtin();
    ScenarioGenerator::new(&tables, config)
        .generate_project(&project())
        .unwrap()
}

fn records_of<'a>(set: &'a ScenarioSet, id: &str) -> Vec<&'a ScenarioRecord> {
    set.iter().filter(|r| r.equipment_id == id).collect()
}

// =========================================================================
// Reference tables
// =========================================================================

#[test]
fn test_builtin_weights_sum_to_one() {
    let tables = ReferenceTables::builtin();
    for archetype in Archetype::ALL {
        for category in SubstanceCategory::ALL {
            let tree = tables.event_tree(archetype, category).unwrap();
            for severity in Severity::ALL {
                let sum: f64 = tree.branches(severity).iter().map(|b| b.weight).sum();
                assert!(
                    (sum - 1.0).abs() <= WEIGHT_TOLERANCE,
                    "{archetype}/{category}/{severity}: {sum}"
                );
            }
        }
    }
}

// =========================================================================
// Generation
// =========================================================================

#[test]
fn test_probability_is_rate_times_weight() {
    let tables = ReferenceTables::builtin();
    let config = AssessmentConfig::default();
    let set = generate(&config);
    let p = project();

    for equipment in &p.equipment {
        let substance = p.substance(&equipment.substance_id).unwrap();
        let tree = tables
            .event_tree(equipment.archetype(), substance.category)
            .unwrap();
        let rate = tables
            .failure_rate(equipment.archetype(), equipment.category)
            .unwrap();
        let expected: Vec<(Severity, Branch, f64)> = Severity::ALL
            .iter()
            .flat_map(|&severity| {
                tree.branches(severity)
                    .iter()
                    .map(move |b| (severity, b.branch, rate.get(severity) * b.weight))
            })
            .collect();
        let records = records_of(&set, &equipment.id);
        assert_eq!(records.len(), expected.len());
        for (record, (severity, branch, probability)) in records.iter().zip(expected) {
            assert_eq!(record.severity, severity);
            assert_eq!(record.branch, branch);
            assert_eq!(record.probability, probability);
        }
    }
}

fn equipment_of(archetype: Archetype, substance_id: &str) -> Equipment {
    let line = LineGeometry {
        length: 50.0,
        diameter: 80.0,
        accident_rate: 1.0,
        flow: 0.0,
        time_out: 0.0,
    };
    let fed = FedVesselGeometry {
        volume: 20.0,
        fill_degree: 0.8,
        bund_area: Some(40.0),
        flow: 0.0,
        time_out: 0.0,
    };
    let kind = match archetype {
        Archetype::Pipeline => EquipmentKind::Pipeline(line),
        Archetype::Pump => EquipmentKind::Pump(line),
        Archetype::Tank => EquipmentKind::Tank(fed),
        Archetype::TechnologicalDevice => EquipmentKind::TechnologicalDevice(fed),
        Archetype::TruckTank => EquipmentKind::TruckTank(VesselGeometry {
            volume: 20.0,
            fill_degree: 0.8,
        }),
    };
    Equipment {
        id: format!("{archetype}-{substance_id}"),
        name: format!("{archetype} with {substance_id}"),
        hazard_component: "matrix".into(),
        substance_id: substance_id.into(),
        pressure: 0.6,
        temperature: 20.0,
        expected_casualties: 2,
        category: 1,
        kind,
    }
}

#[test]
fn test_every_archetype_and_category_follows_its_tree() {
    let tables = ReferenceTables::builtin();
    let config = AssessmentConfig::default();
    let generator = ScenarioGenerator::new(&tables, &config);
    let start = 7;

    for archetype in Archetype::ALL {
        for substance in [gasoline(), propane(), chlorine(), ammonia()] {
            let equipment = equipment_of(archetype, &substance.id);
            let case = format!("{archetype}/{}", substance.id);
            let tree = tables.event_tree(archetype, substance.category).unwrap();
            let rate = tables.failure_rate(archetype, equipment.category).unwrap();

            let (records, next) = generator
                .generate(&equipment, &substance, &object(), start)
                .unwrap();
            assert_eq!(records.len(), tree.len(), "{case}");
            assert_eq!(next, start + records.len() as u32, "{case}");

            let expected = Severity::ALL.iter().flat_map(|&severity| {
                tree.branches(severity)
                    .iter()
                    .map(move |b| (severity, b.branch, rate.get(severity) * b.weight))
            });
            for (offset, (record, (severity, branch, probability))) in
                records.iter().zip(expected).enumerate()
            {
                assert_eq!(record.index, start + offset as u32, "{case}");
                assert_eq!(record.archetype, archetype, "{case}");
                assert_eq!(record.severity, severity, "{case}");
                assert_eq!(record.branch, branch, "{case}");
                assert_eq!(record.probability, probability, "{case}");
                if record.branch == Branch::NoEffect {
                    assert!(record.has_no_consequences(), "{case}: {}", record.label());
                }
            }
        }
    }
}

#[test]
fn test_contiguous_numbering_across_equipment() {
    let set = generate(&AssessmentConfig::default());
    for (i, record) in set.iter().enumerate() {
        assert_eq!(record.index, i as u32);
    }
    // Each instance occupies a contiguous block in declaration order.
    let mut start = 0;
    for id in ["P-1", "TT-1", "T-1"] {
        let records = records_of(&set, id);
        for (offset, record) in records.iter().enumerate() {
            assert_eq!(record.index, start + offset as u32);
        }
        start += records.len() as u32;
    }
    assert_eq!(start as usize, set.len());
}

#[test]
fn test_pipeline_reference_masses() {
    let set = generate(&AssessmentConfig::default());
    for record in records_of(&set, "P-1") {
        assert!((record.mass_in_equipment - 0.573).abs() < 1e-3);
        let expected = match record.severity {
            Severity::Full => 0.573,
            Severity::Partial => 0.086,
        };
        assert!(
            (record.mass_in_accident - expected).abs() < 1e-3,
            "{}: {}",
            record.label(),
            record.mass_in_accident
        );
    }
}

#[test]
fn test_vessel_partial_is_fraction_of_full() {
    let set = generate(&AssessmentConfig::default());
    let records = records_of(&set, "TT-1");
    let full = records
        .iter()
        .find(|r| r.severity == Severity::Full)
        .unwrap()
        .mass_in_accident;
    for record in records.iter().filter(|r| r.severity == Severity::Partial) {
        assert!((record.mass_in_accident - 0.15 * full).abs() < 1e-12);
    }
}

#[test]
fn test_no_effect_records_carry_no_consequences() {
    let set = generate(&AssessmentConfig::default());
    let no_effect: Vec<&ScenarioRecord> =
        set.iter().filter(|r| r.branch == Branch::NoEffect).collect();
    assert!(!no_effect.is_empty());
    for record in no_effect {
        assert!(record.has_no_consequences(), "{}", record.label());
        assert!(record.probability > 0.0);
    }
}

#[test]
fn test_zero_headcount_keeps_damage() {
    let mut harm = HarmPolicy::default();
    for branch in [Branch::PoolFire, Branch::Explosion, Branch::FlashFire] {
        for severity in Severity::ALL {
            let degree = harm.rule(Archetype::Pipeline, branch, severity).damage_degree;
            harm = harm.with_rule(
                Archetype::Pipeline,
                branch,
                severity,
                HarmRule::new(Headcount::Expected, Headcount::None, degree),
            );
        }
    }
    let config = AssessmentConfig::default().with_harm(harm);
    let tables = ReferenceTables::builtin();
    let mut equipment = pipeline();
    equipment.expected_casualties = 0;

    let (records, _) = ScenarioGenerator::new(&tables, &config)
        .generate(&equipment, &gasoline(), &object(), 0)
        .unwrap();
    for record in &records {
        assert_eq!(record.casualty_risk, 0.0);
        assert_eq!(record.injury_risk, 0.0);
    }
    let fire = records
        .iter()
        .find(|r| r.branch == Branch::PoolFire && r.severity == Severity::Full)
        .unwrap();
    assert!(fire.damage.total > 0.0);
    assert!(fire.expected_damage > 0.0);
}

// =========================================================================
// Aggregation
// =========================================================================

#[test]
fn test_component_risk_adds_up() {
    let config = AssessmentConfig::default();
    let set = generate(&config);
    let summary = RiskAggregator::new(&config.aggregation).summarize(
        &set,
        &object(),
        ParetoMetric::CasualtyRisk,
    );

    assert_eq!(summary.components.len(), 3);
    for component in &summary.components {
        let expected: f64 = set
            .iter()
            .filter(|r| r.hazard_component == component.name)
            .map(|r| r.casualty_risk)
            .sum();
        assert!((component.collective_fatal_risk - expected).abs() <= 1e-12 * expected.max(1.0));
        let individual = component.individual_risk.value().unwrap();
        assert!((individual - component.collective_fatal_risk / 25.0).abs() < 1e-18);
        assert!((component.ppm.value().unwrap() - individual * 1e6).abs() < 1e-9);
    }

    let total: f64 = set.iter().map(|r| r.casualty_risk).sum();
    assert!((summary.facility.collective_fatal_risk - total).abs() <= 1e-12);
    assert_eq!(summary.facility.scenario_count, set.len());
}

#[test]
fn test_curves_are_non_increasing() {
    let config = AssessmentConfig::default();
    let set = generate(&config);
    let summary = RiskAggregator::new(&config.aggregation).summarize(
        &set,
        &object(),
        ParetoMetric::ExpectedDamage,
    );

    assert!(!summary.fn_curve.is_empty());
    assert!(summary
        .fn_curve
        .windows(2)
        .all(|w| w[1].frequency <= w[0].frequency));
    assert_eq!(summary.fg_curve.len(), config.aggregation.fg_bins + 1);
    assert!(summary
        .fg_curve
        .windows(2)
        .all(|w| w[1].frequency <= w[0].frequency && w[1].damage >= w[0].damage));
}

#[test]
fn test_pareto_reaches_full_share_with_other_bucket() {
    let config = AssessmentConfig::default()
        .with_aggregation(AggregationConfig::default().with_pareto_top_n(3));
    let set = generate(&config);
    let summary = RiskAggregator::new(&config.aggregation).summarize(
        &set,
        &object(),
        ParetoMetric::ExpectedDamage,
    );

    let entries = &summary.pareto.entries;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].scenario_index, None);
    assert!(entries
        .windows(2)
        .all(|w| w[1].cumulative_pct >= w[0].cumulative_pct));
    assert_eq!(entries[3].cumulative_pct, 100.0);
    assert!(summary.pareto.marker.is_some());
}

#[test]
fn test_classified_matrix_and_undefined_individual_risk() {
    let config = AssessmentConfig::default();
    let set = generate(&config);
    let mut site = object();
    site.employee_count = 0;
    let summary = RiskAggregator::new(&config.aggregation)
        .with_criterion(Box::new(FnLineCriterion::default()))
        .summarize(&set, &site, ParetoMetric::InjuryRisk);

    assert_eq!(summary.risk_matrix.len(), set.len());
    assert!(summary.risk_matrix.iter().all(|row| row.class.is_some()));
    assert_eq!(summary.facility.individual_risk, RiskValue::Undefined);
    assert!(summary.facility.collective_fatal_risk > 0.0);
}

#[test]
fn test_summary_serializes_to_json() {
    let config = AssessmentConfig::default();
    let set = generate(&config);
    let summary = RiskAggregator::new(&config.aggregation).summarize(
        &set,
        &object(),
        ParetoMetric::CasualtyRisk,
    );
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["object"]["name"], "Fuel terminal");
    assert_eq!(json["pareto"]["metric"], "casualty-risk");
    assert_eq!(
        json["components"].as_array().map(|c| c.len()),
        Some(summary.components.len())
    );
}
