//! Evaporation of a spilled liquid.
//!
//! A liquid released above its boiling point first flashes: the superheat
//! `c_p·(T − T_b)` vaporises a fraction `c_p·(T − T_b)/ΔH_v` of the mass
//! immediately. The remainder (or the whole spill, below the boiling point)
//! evaporates from the pool surface with intensity
//!
//! ```text
//! W = 1e-6 · η · √M · P_s      [kg/(m²·s)]
//! ```
//!
//! where `P_s` (kPa) is the saturated vapour pressure at the pool
//! temperature from the Clausius–Clapeyron relation anchored at the normal
//! boiling point. Pool evaporation is integrated over a fixed window.

use serde::{Deserialize, Serialize};

use super::common::{kelvin, ATMOSPHERIC_PRESSURE, GAS_CONSTANT};
use crate::errors::{require_non_negative, require_positive, Result};
use crate::types::Substance;

/// Which evaporation regime applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaporationRegime {
    /// Liquid at or below its boiling point: surface evaporation only
    #[default]
    NonBoiling,
    /// Superheated liquid: flash followed by pool evaporation
    Boiling,
}

/// Evaporation calculator input.
#[derive(Debug, Clone, Copy)]
pub struct EvaporationInput {
    /// Spilled liquid mass, t
    pub mass: f64,
    /// Pool surface, m²
    pub pool_area: f64,
    /// Liquid temperature at release, °C
    pub liquid_temperature: f64,
    /// Evaporation window, s
    pub window: f64,
    /// Air-flow factor η
    pub wind_factor: f64,
}

/// Evaporated mass over the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaporation {
    /// Mass vaporised by flashing, t
    pub flashed: f64,
    /// Mass evaporated from the pool, t
    pub from_pool: f64,
    /// Total evaporated mass, t (never above the spilled mass)
    pub total: f64,
    /// Mean evaporation rate over the window, kg/s
    pub mean_rate: f64,
    pub regime: EvaporationRegime,
}

/// Saturated vapour pressure at `temperature` (°C), kPa.
pub fn saturated_vapor_pressure(substance: &Substance, temperature: f64) -> f64 {
    let t = kelvin(temperature);
    let tb = kelvin(substance.boiling_point);
    let exponent =
        substance.heat_of_evaporation * substance.molar_mass / GAS_CONSTANT * (1.0 / tb - 1.0 / t);
    ATMOSPHERIC_PRESSURE * exponent.exp()
}

/// Pool evaporation intensity at `temperature` (°C), kg/(m²·s).
pub fn evaporation_intensity(substance: &Substance, temperature: f64, wind_factor: f64) -> f64 {
    1e-6 * wind_factor * substance.molar_mass.sqrt() * saturated_vapor_pressure(substance, temperature)
}

/// Compute the mass evaporated from a spill.
pub fn evaporate(substance: &Substance, input: &EvaporationInput) -> Result<Evaporation> {
    let mass = require_non_negative("evaporation.mass", input.mass)?;
    let area = require_non_negative("evaporation.pool_area", input.pool_area)?;
    let window = require_positive("evaporation.window", input.window)?;
    let wind_factor = require_positive("evaporation.wind_factor", input.wind_factor)?;
    if mass == 0.0 {
        return Ok(Evaporation::default());
    }

    let superheat = input.liquid_temperature - substance.boiling_point;
    let (regime, flashed) = if superheat > 0.0 {
        let fraction = (substance.heat_capacity * superheat / substance.heat_of_evaporation).min(1.0);
        (EvaporationRegime::Boiling, mass * fraction)
    } else {
        (EvaporationRegime::NonBoiling, 0.0)
    };

    // After flashing the pool sits at its boiling point.
    let pool_temperature = input.liquid_temperature.min(substance.boiling_point);
    let remaining = mass - flashed;
    let intensity = evaporation_intensity(substance, pool_temperature, wind_factor);
    let from_pool = (intensity * area * window / 1000.0).min(remaining);

    let total = flashed + from_pool;
    Ok(Evaporation {
        flashed,
        from_pool,
        total,
        mean_rate: total * 1000.0 / window,
        regime,
    })
}
