//! Release and spill assumptions.

use serde::{Deserialize, Serialize};

/// Fraction of the full-rupture mass released by a partial loss of
/// containment from a vessel.
pub const PART: f64 = 0.15;

/// Fraction of the full-rupture mass released through a leak in a line.
pub const LINE_LEAK_FRACTION: f64 = 0.15;

/// Release model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Vessel partial-release fraction
    pub vessel_partial_fraction: f64,
    /// Line partial-release fraction (also scales the leak hole area)
    pub line_leak_fraction: f64,
    /// Spill factor: pool area per m³ of spilled liquid, 1/m
    pub spill_factor: f64,
    /// Orifice discharge coefficient μ
    pub discharge_coefficient: f64,
    /// Equivalent hole diameter for a vessel rupture, mm
    pub vessel_full_hole_diameter: f64,
    /// Equivalent hole diameter for a vessel leak, mm
    pub vessel_partial_hole_diameter: f64,
    /// Share of the evaporated mass taking part in a cloud explosion
    pub explosion_participation: f64,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            vessel_partial_fraction: PART,
            line_leak_fraction: LINE_LEAK_FRACTION,
            spill_factor: 20.0, // unconfined spill on concrete
            discharge_coefficient: 0.62,
            vessel_full_hole_diameter: 100.0,
            vessel_partial_hole_diameter: 25.0,
            explosion_participation: 0.1,
        }
    }
}

impl ReleaseConfig {
    pub fn with_vessel_partial_fraction(mut self, fraction: f64) -> Self {
        self.vessel_partial_fraction = fraction;
        self
    }

    pub fn with_spill_factor(mut self, spill_factor: f64) -> Self {
        self.spill_factor = spill_factor;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("vessel_partial_fraction", self.vessel_partial_fraction),
            ("line_leak_fraction", self.line_leak_fraction),
            ("explosion_participation", self.explosion_participation),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(format!("{name} must be in (0.0, 1.0], got {value}"));
            }
        }
        if !(self.discharge_coefficient > 0.0 && self.discharge_coefficient <= 1.0) {
            return Err(format!(
                "discharge_coefficient must be in (0.0, 1.0], got {}",
                self.discharge_coefficient
            ));
        }
        for (name, value) in [
            ("spill_factor", self.spill_factor),
            ("vessel_full_hole_diameter", self.vessel_full_hole_diameter),
            (
                "vessel_partial_hole_diameter",
                self.vessel_partial_hole_diameter,
            ),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(format!("{name} must be > 0.0, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_defaults() {
        let cfg = ReleaseConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.vessel_partial_fraction, 0.15);
        assert_eq!(cfg.line_leak_fraction, 0.15);
    }

    #[test]
    fn test_release_rejects_fraction_above_one() {
        let err = ReleaseConfig::default()
            .with_vessel_partial_fraction(1.5)
            .validate()
            .unwrap_err();
        assert!(err.contains("vessel_partial_fraction"), "{err}");
    }

    #[test]
    fn test_release_rejects_zero_spill_factor() {
        let err = ReleaseConfig::default()
            .with_spill_factor(0.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("spill_factor"), "{err}");
    }
}
