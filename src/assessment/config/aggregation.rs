//! Risk aggregation settings.

use serde::{Deserialize, Serialize};

/// Settings for facility-level summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Number of damage bins swept by the F/G curve
    pub fg_bins: usize,
    /// Cumulative share marking the Pareto "vital few", %
    pub pareto_marker_pct: f64,
    /// Keep this many leading Pareto entries and fold the rest into "other"
    pub pareto_top_n: Option<usize>,
    /// Background individual risk used as the dB_R reference, ppm
    pub reference_ppm: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            fg_bins: 20,
            pareto_marker_pct: 80.0,
            pareto_top_n: None,
            reference_ppm: 1.0, // 1e-6 per year
        }
    }
}

impl AggregationConfig {
    pub fn with_fg_bins(mut self, bins: usize) -> Self {
        self.fg_bins = bins;
        self
    }

    pub fn with_pareto_top_n(mut self, top_n: usize) -> Self {
        self.pareto_top_n = Some(top_n);
        self
    }

    pub fn with_reference_ppm(mut self, ppm: f64) -> Self {
        self.reference_ppm = ppm;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.fg_bins == 0 {
            return Err("fg_bins must be > 0".to_string());
        }
        if !(self.pareto_marker_pct > 0.0 && self.pareto_marker_pct <= 100.0) {
            return Err(format!(
                "pareto_marker_pct must be in (0.0, 100.0], got {}",
                self.pareto_marker_pct
            ));
        }
        if self.pareto_top_n == Some(0) {
            return Err("pareto_top_n must be > 0 when set".to_string());
        }
        if !(self.reference_ppm > 0.0) || !self.reference_ppm.is_finite() {
            return Err(format!(
                "reference_ppm must be > 0.0, got {}",
                self.reference_ppm
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_defaults_validate() {
        assert!(AggregationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_aggregation_rejects_zero_bins() {
        let err = AggregationConfig::default()
            .with_fg_bins(0)
            .validate()
            .unwrap_err();
        assert!(err.contains("fg_bins"), "{err}");
    }

    #[test]
    fn test_aggregation_rejects_zero_reference() {
        let err = AggregationConfig::default()
            .with_reference_ppm(0.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("reference_ppm"), "{err}");
    }
}
