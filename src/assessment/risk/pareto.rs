//! Pareto ranking of scenario contributions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::scenario::ScenarioRecord;
use crate::errors::Error;

/// Label of the bucket that collects entries beyond `top_n`.
pub const OTHER_LABEL: &str = "other";

/// Quantity a Pareto series ranks scenarios by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParetoMetric {
    #[default]
    CasualtyRisk,
    InjuryRisk,
    ExpectedDamage,
}

impl ParetoMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParetoMetric::CasualtyRisk => "casualty-risk",
            ParetoMetric::InjuryRisk => "injury-risk",
            ParetoMetric::ExpectedDamage => "expected-damage",
        }
    }

    pub fn value(&self, record: &ScenarioRecord) -> f64 {
        match self {
            ParetoMetric::CasualtyRisk => record.casualty_risk,
            ParetoMetric::InjuryRisk => record.injury_risk,
            ParetoMetric::ExpectedDamage => record.expected_damage,
        }
    }
}

impl fmt::Display for ParetoMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParetoMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casualty-risk" | "casualty_risk" => Ok(ParetoMetric::CasualtyRisk),
            "injury-risk" | "injury_risk" => Ok(ParetoMetric::InjuryRisk),
            "expected-damage" | "expected_damage" => Ok(ParetoMetric::ExpectedDamage),
            other => Err(Error::invalid_input(format!(
                "unknown pareto metric: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoEntry {
    pub label: String,
    /// `None` for the "other" bucket
    pub scenario_index: Option<u32>,
    pub value: f64,
    /// Running share of the total, %
    pub cumulative_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoSeries {
    pub metric: ParetoMetric,
    pub total: f64,
    pub entries: Vec<ParetoEntry>,
    /// First position whose cumulative share reaches the marker
    pub marker: Option<usize>,
}

impl ParetoSeries {
    pub fn empty(metric: ParetoMetric) -> Self {
        Self {
            metric,
            total: 0.0,
            entries: Vec::new(),
            marker: None,
        }
    }
}

/// Rank `records` by `metric`, descending with ties in index order.
///
/// With `top_n` set, entries past the first `n` are folded into one
/// [`OTHER_LABEL`] entry. When the total is zero every share stays 0 and no
/// marker is set.
pub fn pareto(
    records: &[ScenarioRecord],
    metric: ParetoMetric,
    marker_pct: f64,
    top_n: Option<usize>,
) -> ParetoSeries {
    if records.is_empty() {
        return ParetoSeries::empty(metric);
    }

    let mut ranked: Vec<&ScenarioRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        metric
            .value(b)
            .total_cmp(&metric.value(a))
            .then(a.index.cmp(&b.index))
    });

    let mut entries: Vec<ParetoEntry> = ranked
        .iter()
        .map(|r| ParetoEntry {
            label: r.label(),
            scenario_index: Some(r.index),
            value: metric.value(r),
            cumulative_pct: 0.0,
        })
        .collect();

    if let Some(n) = top_n {
        if entries.len() > n {
            let rest: f64 = entries[n..].iter().map(|e| e.value).sum();
            entries.truncate(n);
            entries.push(ParetoEntry {
                label: OTHER_LABEL.to_string(),
                scenario_index: None,
                value: rest,
                cumulative_pct: 0.0,
            });
        }
    }

    let total: f64 = entries.iter().map(|e| e.value).sum();
    let mut marker = None;
    if total > 0.0 {
        let mut running = 0.0;
        for (position, entry) in entries.iter_mut().enumerate() {
            running += entry.value;
            entry.cumulative_pct = (running / total * 100.0).min(100.0);
            if marker.is_none() && entry.cumulative_pct >= marker_pct {
                marker = Some(position);
            }
        }
        // Absorb rounding so the series always closes at 100 %
        if let Some(last) = entries.last_mut() {
            last.cumulative_pct = 100.0;
        }
        if marker.is_none() {
            marker = Some(entries.len() - 1);
        }
    }

    ParetoSeries {
        metric,
        total,
        entries,
        marker,
    }
}
