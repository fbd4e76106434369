//! F/N and F/G curves.

use serde::{Deserialize, Serialize};

use crate::assessment::scenario::ScenarioRecord;

/// Frequency of accidents with at least `casualties` fatalities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FnPoint {
    pub casualties: u32,
    pub frequency: f64,
}

/// Frequency of accidents causing at least `damage` loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FgPoint {
    pub damage: f64,
    pub frequency: f64,
}

/// One point per distinct casualty count N ≥ 1, ascending; empty when
/// nobody dies. The curve is a step function between those points.
pub fn fn_curve(records: &[ScenarioRecord]) -> Vec<FnPoint> {
    let mut fatal: Vec<(u32, f64)> = records
        .iter()
        .filter(|r| r.casualties >= 1)
        .map(|r| (r.casualties, r.probability))
        .collect();
    fatal.sort_by(|a, b| b.0.cmp(&a.0));

    // Accumulate from the largest N down so each point is one pass.
    let mut points: Vec<FnPoint> = Vec::new();
    let mut cumulative = 0.0;
    for (casualties, probability) in fatal {
        cumulative += probability;
        match points.last_mut() {
            Some(last) if last.casualties == casualties => last.frequency = cumulative,
            _ => points.push(FnPoint {
                casualties,
                frequency: cumulative,
            }),
        }
    }
    points.reverse();
    points
}

/// `bins + 1` points with G swept evenly over `[0, max damage]`.
pub fn fg_curve(records: &[ScenarioRecord], bins: usize) -> Vec<FgPoint> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }
    let max = records.iter().map(|r| r.damage.total).fold(0.0, f64::max);
    (0..=bins)
        .map(|i| {
            let damage = if i == bins {
                max
            } else {
                i as f64 * max / bins as f64
            };
            FgPoint {
                damage,
                frequency: records
                    .iter()
                    .filter(|r| r.damage.total >= damage)
                    .map(|r| r.probability)
                    .sum(),
            }
        })
        .collect()
}
