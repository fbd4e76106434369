//! Toxic dispersion zones from a continuous ground-level release.
//!
//! Gaussian plume with Briggs open-country dispersion coefficients. The
//! source is moved upwind by a virtual distance so that the plume starts
//! with the cross-section of the source volume flux instead of a point.
//! Doses are `C · t_exp` in mg·min/L.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{kelvin, reach_distance, ATMOSPHERIC_PRESSURE, GAS_CONSTANT};
use crate::errors::{require_non_negative, require_positive, Result};
use crate::types::Substance;

const WIDTH_SAMPLES: usize = 200;

/// Pasquill atmospheric stability class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityClass {
    /// Very unstable
    A,
    /// Unstable
    B,
    /// Slightly unstable
    C,
    /// Neutral
    #[default]
    D,
    /// Slightly stable
    E,
    /// Stable
    F,
}

impl StabilityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityClass::A => "a",
            StabilityClass::B => "b",
            StabilityClass::C => "c",
            StabilityClass::D => "d",
            StabilityClass::E => "e",
            StabilityClass::F => "f",
        }
    }

    /// Near-field growth rate of σ_y (σ_y ≈ a·x for small x).
    fn sigma_y_slope(&self) -> f64 {
        match self {
            StabilityClass::A => 0.22,
            StabilityClass::B => 0.16,
            StabilityClass::C => 0.11,
            StabilityClass::D => 0.08,
            StabilityClass::E => 0.06,
            StabilityClass::F => 0.04,
        }
    }

    /// Crosswind dispersion coefficient at `x` m downwind.
    pub fn sigma_y(&self, x: f64) -> f64 {
        self.sigma_y_slope() * x / (1.0 + 1e-4 * x).sqrt()
    }

    /// Vertical dispersion coefficient at `x` m downwind.
    pub fn sigma_z(&self, x: f64) -> f64 {
        match self {
            StabilityClass::A => 0.20 * x,
            StabilityClass::B => 0.12 * x,
            StabilityClass::C => 0.08 * x / (1.0 + 2e-4 * x).sqrt(),
            StabilityClass::D => 0.06 * x / (1.0 + 1.5e-3 * x).sqrt(),
            StabilityClass::E => 0.03 * x / (1.0 + 3e-4 * x),
            StabilityClass::F => 0.016 * x / (1.0 + 3e-4 * x),
        }
    }
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Toxic dispersion input.
#[derive(Debug, Clone, Copy)]
pub struct ToxicInput {
    /// Vapour source rate, kg/s
    pub release_rate: f64,
    /// Exposure time, s
    pub exposure_time: f64,
    /// Molar mass, kg/kmol
    pub molar_mass: f64,
    /// Wind speed, m/s
    pub wind_speed: f64,
    /// Ambient temperature, °C
    pub ambient_temperature: f64,
    pub stability: StabilityClass,
    /// Threshold toxic dose, mg·min/L
    pub threshold_dose: f64,
    /// Lethal toxic dose, mg·min/L
    pub lethal_dose: f64,
}

impl ToxicInput {
    pub fn for_substance(
        substance: &Substance,
        release_rate: f64,
        exposure_time: f64,
        wind_speed: f64,
        ambient_temperature: f64,
        stability: StabilityClass,
    ) -> Self {
        Self {
            release_rate,
            exposure_time,
            molar_mass: substance.molar_mass,
            wind_speed,
            ambient_temperature,
            stability,
            threshold_dose: substance.threshold_toxic_dose,
            lethal_dose: substance.lethal_toxic_dose,
        }
    }
}

/// Downwind depth and maximum width of the dose zones, m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxicZones {
    pub threshold_depth: f64,
    pub threshold_width: f64,
    pub lethal_depth: f64,
    pub lethal_width: f64,
}

/// Ground-level centreline dose along the plume axis.
struct Plume {
    rate: f64,
    wind: f64,
    exposure_min: f64,
    offset: f64,
    stability: StabilityClass,
}

impl Plume {
    fn new(input: &ToxicInput) -> Self {
        let gas_density =
            input.molar_mass * ATMOSPHERIC_PRESSURE * 1e3 / (GAS_CONSTANT * kelvin(input.ambient_temperature));
        let volume_flux = input.release_rate / gas_density;
        let source_radius = (volume_flux / (PI * input.wind_speed)).sqrt();
        Self {
            rate: input.release_rate,
            wind: input.wind_speed,
            exposure_min: input.exposure_time / 60.0,
            offset: source_radius / input.stability.sigma_y_slope(),
            stability: input.stability,
        }
    }

    fn sigma_y(&self, x: f64) -> f64 {
        self.stability.sigma_y(x + self.offset)
    }

    /// Centreline dose at `x` m downwind of the real source, mg·min/L.
    fn dose(&self, x: f64) -> f64 {
        let xe = x + self.offset;
        let concentration =
            self.rate / (PI * self.stability.sigma_y(xe) * self.stability.sigma_z(xe) * self.wind);
        // kg/m³ → mg/L
        concentration * 1e3 * self.exposure_min
    }

    /// (depth, width) of the zone where the dose reaches `threshold`.
    fn zone(&self, threshold: f64) -> (f64, f64) {
        let depth = reach_distance(|x| self.dose(x), threshold, 0.0, 100.0);
        if depth == 0.0 {
            return (0.0, 0.0);
        }
        let half_width = (1..=WIDTH_SAMPLES)
            .map(|i| depth * i as f64 / WIDTH_SAMPLES as f64)
            .filter_map(|x| {
                let ratio = self.dose(x) / threshold;
                (ratio > 1.0).then(|| self.sigma_y(x) * (2.0 * ratio.ln()).sqrt())
            })
            .fold(0.0, f64::max);
        (depth, 2.0 * half_width)
    }
}

/// Compute the threshold and lethal dose zones.
pub fn toxic_zones(input: &ToxicInput) -> Result<ToxicZones> {
    let rate = require_non_negative("toxic.release_rate", input.release_rate)?;
    if rate == 0.0 {
        return Ok(ToxicZones::default());
    }
    require_positive("toxic.exposure_time", input.exposure_time)?;
    require_positive("toxic.molar_mass", input.molar_mass)?;
    require_positive("toxic.wind_speed", input.wind_speed)?;
    require_positive("toxic.threshold_dose", input.threshold_dose)?;
    require_positive("toxic.lethal_dose", input.lethal_dose)?;

    let plume = Plume::new(input);
    let (threshold_depth, threshold_width) = plume.zone(input.threshold_dose);
    let (lethal_depth, lethal_width) = plume.zone(input.lethal_dose);
    Ok(ToxicZones {
        threshold_depth,
        threshold_width,
        lethal_depth,
        lethal_width,
    })
}
