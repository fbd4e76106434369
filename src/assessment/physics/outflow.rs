//! Liquid outflow through an orifice.
//!
//! `G = μ · A · √(2 · ρ · ΔP)` with ΔP the overpressure above atmosphere.

use std::f64::consts::PI;

use crate::errors::{require_non_negative, require_positive, Result};

/// Shortest release duration considered, s.
pub const MIN_RELEASE_DURATION: f64 = 60.0;

/// Cross-section of a circular hole with diameter in mm, m².
pub fn hole_area(diameter_mm: f64) -> f64 {
    let d = diameter_mm / 1000.0;
    PI * d * d / 4.0
}

/// Liquid mass flow rate through a hole, kg/s.
///
/// `pressure` is absolute, MPa; `atmospheric_pressure` in kPa. Equipment at
/// or below atmospheric pressure yields zero flow.
pub fn outflow_rate(
    pressure: f64,
    density: f64,
    hole_area: f64,
    discharge_coefficient: f64,
    atmospheric_pressure: f64,
) -> Result<f64> {
    let pressure = require_non_negative("outflow.pressure", pressure)?;
    let density = require_positive("outflow.density", density)?;
    let area = require_non_negative("outflow.hole_area", hole_area)?;
    let mu = require_positive("outflow.discharge_coefficient", discharge_coefficient)?;

    let overpressure_pa = (pressure * 1e6 - atmospheric_pressure * 1e3).max(0.0);
    Ok(mu * area * (2.0 * density * overpressure_pa).sqrt())
}

/// How long a release of `mass` (t) lasts at `rate` (kg/s), bounded to
/// `[MIN_RELEASE_DURATION, window]`. Zero flow lasts the whole window.
pub fn release_duration(mass: f64, rate: f64, window: f64) -> f64 {
    let upper = window.max(MIN_RELEASE_DURATION);
    if rate <= 0.0 || mass <= 0.0 {
        return upper;
    }
    (mass * 1000.0 / rate).clamp(MIN_RELEASE_DURATION, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_area_100mm() {
        assert!((hole_area(100.0) - 0.007_853_98).abs() < 1e-8);
    }

    #[test]
    fn test_outflow_bernoulli() {
        // 1 MPa abs, water-like density, 10 mm hole
        let g = outflow_rate(1.0, 1000.0, hole_area(10.0), 0.62, 101.325).unwrap();
        let expected = 0.62 * hole_area(10.0) * (2.0 * 1000.0 * (1e6 - 101_325.0_f64)).sqrt();
        assert!((g - expected).abs() < 1e-12);
        assert!(g > 2.0 && g < 2.2, "got {g}");
    }

    #[test]
    fn test_atmospheric_vessel_has_no_pressure_driven_flow() {
        let g = outflow_rate(0.101_325, 730.0, hole_area(100.0), 0.62, 101.325).unwrap();
        assert_eq!(g, 0.0);
    }

    #[test]
    fn test_release_duration_bounds() {
        assert_eq!(release_duration(1.0, 0.0, 3600.0), 3600.0);
        assert_eq!(release_duration(1.0, 1e6, 3600.0), MIN_RELEASE_DURATION);
        assert!((release_duration(1.0, 1.0, 3600.0) - 1000.0).abs() < 1e-12);
        assert_eq!(release_duration(100.0, 1.0, 3600.0), 3600.0);
    }

    #[test]
    fn test_outflow_rejects_negative_area() {
        assert!(outflow_rate(1.0, 1000.0, -1.0, 0.62, 101.325).is_err());
    }
}
