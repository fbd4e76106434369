//! Pool fire thermal radiation zones.
//!
//! Solid-flame model: a cylinder of the pool's effective diameter and the
//! correlated flame height radiates `E_f` (Mudan) through the view factor of
//! a vertical cylinder, attenuated by the atmosphere. Radii are measured
//! from the pool centre.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::common::{reach_distance, AIR_DENSITY, GRAVITY};
use crate::errors::{require_non_negative, require_positive, Result};
use crate::types::Substance;

/// Incident heat flux thresholds, kW/m², in zone order.
pub const HEAT_FLUX_THRESHOLDS: [f64; 4] = [10.5, 7.0, 4.2, 1.4];

/// Pool fire calculator input.
#[derive(Debug, Clone, Copy)]
pub struct PoolFireInput {
    /// Burning pool surface, m²
    pub pool_area: f64,
    /// Mass burning rate, kg/(m²·s)
    pub burn_rate: f64,
    /// Wind speed, m/s
    pub wind_speed: f64,
    /// Fuel vapour density at the boiling point, kg/m³
    pub vapor_density: f64,
}

impl PoolFireInput {
    /// Assemble the input for `substance` burning over `pool_area`.
    pub fn for_substance(
        substance: &Substance,
        pool_area: f64,
        wind_speed: f64,
        ambient_temperature: f64,
    ) -> Self {
        Self {
            pool_area,
            burn_rate: burning_rate(substance, ambient_temperature),
            wind_speed,
            vapor_density: substance.vapor_density(),
        }
    }
}

/// Pool fire geometry and threshold radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolFireZones {
    /// Effective pool diameter, m
    pub diameter: f64,
    /// Flame height, m
    pub flame_height: f64,
    /// Surface emissive power, kW/m²
    pub emissive_power: f64,
    /// Radius of 10.5 kW/m², m
    pub r_10_5: f64,
    /// Radius of 7.0 kW/m², m
    pub r_7_0: f64,
    /// Radius of 4.2 kW/m², m
    pub r_4_2: f64,
    /// Radius of 1.4 kW/m², m
    pub r_1_4: f64,
}

impl PoolFireZones {
    pub fn radii(&self) -> [f64; 4] {
        [self.r_10_5, self.r_7_0, self.r_4_2, self.r_1_4]
    }
}

/// Mass burning rate: measured value, else Burgess' correlation
/// `m″ = 1e-3 · ΔH_c / (ΔH_v + c_p · max(0, T_b − T_a))`.
pub fn burning_rate(substance: &Substance, ambient_temperature: f64) -> f64 {
    if let Some(rate) = substance.burn_rate {
        return rate;
    }
    let sensible = substance.heat_capacity * (substance.boiling_point - ambient_temperature).max(0.0);
    1e-3 * substance.heat_of_combustion / (substance.heat_of_evaporation + sensible)
}

/// Mudan surface emissive power for a pool of diameter `d`, kW/m².
pub fn emissive_power(diameter: f64) -> f64 {
    let decay = (-0.12 * diameter).exp();
    140.0 * decay + 20.0 * (1.0 - decay)
}

/// Flame height (Thomas), with the wind-tilted form above unit
/// dimensionless wind speed.
pub fn flame_height(diameter: f64, burn_rate: f64, wind_speed: f64, vapor_density: f64) -> f64 {
    let froude = burn_rate / (AIR_DENSITY * (GRAVITY * diameter).sqrt());
    let u_star = wind_speed / (burn_rate * GRAVITY * diameter / vapor_density).cbrt();
    if u_star < 1.0 {
        42.0 * diameter * froude.powf(0.61)
    } else {
        55.0 * diameter * froude.powf(0.67) * u_star.powf(-0.21)
    }
}

/// View factor of a vertical cylinder (diameter `d`, height `h`) seen from a
/// ground-level target at `r` from the axis. Requires `r > d/2`.
pub fn view_factor(diameter: f64, height: f64, distance: f64) -> f64 {
    let s = 2.0 * distance / diameter;
    let h = 2.0 * height / diameter;
    if s <= 1.0 {
        return 1.0;
    }
    let a = (h * h + s * s + 1.0) / (2.0 * s);
    let b = (1.0 + s * s) / (2.0 * s);
    let ratio = (s - 1.0) / (s + 1.0);
    let atan_a = ((a + 1.0) * ratio / (a - 1.0)).sqrt().atan();
    let atan_b = ((b + 1.0) * ratio / (b - 1.0)).sqrt().atan();

    let vertical = (1.0 / s * (h / (s * s - 1.0).sqrt()).atan()
        - h / s * (ratio.sqrt().atan() - a / (a * a - 1.0).sqrt() * atan_a))
        / PI;
    let horizontal = ((b - 1.0 / s) / (b * b - 1.0).sqrt() * atan_b
        - (a - 1.0 / s) / (a * a - 1.0).sqrt() * atan_a)
        / PI;
    (vertical * vertical + horizontal * horizontal).sqrt()
}

/// Incident heat flux at `distance` from the pool centre, kW/m².
pub fn heat_flux(diameter: f64, height: f64, emissive: f64, distance: f64) -> f64 {
    let transmissivity = (-7.0e-4 * (distance - 0.5 * diameter)).exp();
    emissive * view_factor(diameter, height, distance) * transmissivity
}

/// Compute the pool fire zones.
pub fn pool_fire_zones(input: &PoolFireInput) -> Result<PoolFireZones> {
    let area = require_non_negative("pool_fire.pool_area", input.pool_area)?;
    if area == 0.0 {
        return Ok(PoolFireZones::default());
    }
    let burn_rate = require_positive("pool_fire.burn_rate", input.burn_rate)?;
    let wind = require_non_negative("pool_fire.wind_speed", input.wind_speed)?;
    let vapor_density = require_positive("pool_fire.vapor_density", input.vapor_density)?;

    let diameter = (4.0 * area / PI).sqrt();
    let height = flame_height(diameter, burn_rate, wind, vapor_density);
    let emissive = emissive_power(diameter);

    let edge = 0.5 * diameter * (1.0 + 1e-6);
    let flux = |r: f64| heat_flux(diameter, height, emissive, r);
    let [r_10_5, r_7_0, r_4_2, r_1_4] =
        HEAT_FLUX_THRESHOLDS.map(|q| reach_distance(flux, q, edge, diameter));

    Ok(PoolFireZones {
        diameter,
        flame_height: height,
        emissive_power: emissive,
        r_10_5,
        r_7_0,
        r_4_2,
        r_1_4,
    })
}
