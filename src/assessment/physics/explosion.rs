//! Vapour cloud explosion overpressure zones.
//!
//! The expected combustion regime follows from the substance sensitivity
//! class and the congestion (view-space) class of the surroundings. Regime 1
//! is a detonation; regimes 2-6 are deflagrations with a flame speed that is
//! either fixed or grows with the explosive mass. Overpressure is expressed
//! through the dimensionless distance `R_x = R / (E / P_0)^(1/3)`.

use serde::{Deserialize, Serialize};

use super::common::{reach_distance, ATMOSPHERIC_PRESSURE, SOUND_SPEED};
use crate::errors::{require_non_negative, Error, Result};

/// Overpressure thresholds, kPa, in zone order: complete destruction,
/// heavy, medium, light damage, glazing breakage.
pub const OVERPRESSURE_THRESHOLDS: [f64; 5] = [100.0, 53.0, 28.0, 12.0, 3.0];

/// Expected regime by [explosion class - 1][view-space class - 1].
const REGIME_TABLE: [[u8; 4]; 4] = [
    [1, 1, 2, 3],
    [1, 2, 3, 4],
    [2, 3, 4, 5],
    [3, 4, 5, 6],
];

const DEFLAGRATION_MIN_RX: f64 = 0.34;
const DETONATION_MIN_RX: f64 = 0.2;
// Beyond this the detonation fit turns upward; decay acoustically instead.
const DETONATION_MAX_RX: f64 = 24.0;

/// Vapour cloud explosion input.
#[derive(Debug, Clone, Copy)]
pub struct ExplosionInput {
    /// Mass of fuel taking part in the explosion, kg
    pub explosive_mass: f64,
    /// Heat of combustion, J/kg
    pub heat_of_combustion: f64,
    /// Substance sensitivity class, 1..=4
    pub explosion_class: u8,
    /// Surroundings congestion class, 1..=4
    pub view_space_class: u8,
    /// Expansion degree σ of the combustion products
    pub expansion_degree: f64,
    /// Energy concentration level, 1 or 2
    pub energy_level: u8,
    /// Ambient pressure, kPa
    pub ambient_pressure: f64,
}

/// Explosion regime, flame speed and threshold radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionZones {
    /// Combustion regime 1..=6 (0 when no explosion)
    pub regime: u8,
    /// Flame front speed, m/s (0 for detonation or no explosion)
    pub flame_speed: f64,
    /// Effective explosion energy, J
    pub energy: f64,
    /// Radius of 100 kPa, m
    pub r_100: f64,
    /// Radius of 53 kPa, m
    pub r_53: f64,
    /// Radius of 28 kPa, m
    pub r_28: f64,
    /// Radius of 12 kPa, m
    pub r_12: f64,
    /// Radius of 3 kPa, m
    pub r_3: f64,
}

impl ExplosionZones {
    pub fn radii(&self) -> [f64; 5] {
        [self.r_100, self.r_53, self.r_28, self.r_12, self.r_3]
    }
}

/// Combustion regime for the class pair.
pub fn explosion_regime(explosion_class: u8, view_space_class: u8) -> Result<u8> {
    if !(1..=4).contains(&explosion_class) {
        return Err(Error::invalid_input(format!(
            "explosion_class must be in 1..=4, got {explosion_class}"
        )));
    }
    if !(1..=4).contains(&view_space_class) {
        return Err(Error::invalid_input(format!(
            "view_space_class must be in 1..=4, got {view_space_class}"
        )));
    }
    Ok(REGIME_TABLE[usize::from(explosion_class - 1)][usize::from(view_space_class - 1)])
}

/// Flame front speed for a deflagration regime, m/s; `None` for detonation.
pub fn flame_speed(regime: u8, explosive_mass: f64) -> Option<f64> {
    match regime {
        1 => None,
        2 => Some(500.0),
        3 => Some(300.0),
        4 => Some(200.0),
        5 => Some(43.0 * explosive_mass.powf(1.0 / 6.0)),
        _ => Some(26.0 * explosive_mass.powf(1.0 / 6.0)),
    }
}

/// Dimensionless detonation overpressure at `rx`.
fn detonation_overpressure(rx: f64) -> f64 {
    let capped = rx.clamp(DETONATION_MIN_RX, DETONATION_MAX_RX);
    let ln = capped.ln();
    let p = (-1.124 - 1.66 * ln + 0.26 * ln * ln).exp();
    if rx > DETONATION_MAX_RX {
        p * DETONATION_MAX_RX / rx
    } else {
        p
    }
}

/// Dimensionless deflagration overpressure at `rx`, capped by detonation.
fn deflagration_overpressure(rx: f64, flame_speed: f64, sigma: f64) -> f64 {
    let rx_eff = rx.max(DEFLAGRATION_MIN_RX);
    let mach = flame_speed / SOUND_SPEED;
    let p = mach * mach * ((sigma - 1.0) / sigma) * (0.83 / rx_eff - 0.14 / (rx_eff * rx_eff));
    p.min(detonation_overpressure(rx)).max(0.0)
}

/// Compute the explosion zones.
pub fn explosion_zones(input: &ExplosionInput) -> Result<ExplosionZones> {
    let mass = require_non_negative("explosion.explosive_mass", input.explosive_mass)?;
    let heat = require_non_negative("explosion.heat_of_combustion", input.heat_of_combustion)?;
    if mass == 0.0 || heat == 0.0 {
        return Ok(ExplosionZones::default());
    }
    if !(input.expansion_degree > 1.0) {
        return Err(Error::invalid_input(format!(
            "expansion_degree must be > 1, got {}",
            input.expansion_degree
        )));
    }
    if !(1..=2).contains(&input.energy_level) {
        return Err(Error::invalid_input(format!(
            "energy_level must be 1 or 2, got {}",
            input.energy_level
        )));
    }

    let regime = explosion_regime(input.explosion_class, input.view_space_class)?;
    let speed = flame_speed(regime, mass);
    let energy = f64::from(input.energy_level) * mass * heat;
    let p0 = input.ambient_pressure * 1e3;
    let scale = (energy / p0).cbrt();

    let overpressure = |r: f64| {
        let rx = r / scale;
        let dimensionless = match speed {
            None => detonation_overpressure(rx),
            Some(u) => deflagration_overpressure(rx, u, input.expansion_degree),
        };
        dimensionless * input.ambient_pressure
    };
    let [r_100, r_53, r_28, r_12, r_3] =
        OVERPRESSURE_THRESHOLDS.map(|p| reach_distance(overpressure, p, 0.0, scale));

    Ok(ExplosionZones {
        regime,
        flame_speed: speed.unwrap_or(0.0),
        energy,
        r_100,
        r_53,
        r_28,
        r_12,
        r_3,
    })
}

impl ExplosionInput {
    /// Input for `substance` with explosive mass in kg.
    pub fn for_substance(
        substance: &crate::types::Substance,
        explosive_mass: f64,
        view_space_class: u8,
    ) -> Self {
        Self {
            explosive_mass,
            heat_of_combustion: substance.heat_of_combustion,
            explosion_class: substance.explosion_class,
            view_space_class,
            expansion_degree: substance.expansion_degree,
            energy_level: substance.energy_level,
            ambient_pressure: ATMOSPHERIC_PRESSURE,
        }
    }
}
