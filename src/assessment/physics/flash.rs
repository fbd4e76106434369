//! Flash fire (LFL cloud) zones.

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, Result};
use crate::types::Substance;

/// Flash fire radius relative to the LFL cloud radius.
pub const FLASH_TO_LFL_RATIO: f64 = 1.2;

#[derive(Debug, Clone, Copy)]
pub struct FlashInput {
    /// Vapour mass in the cloud, kg
    pub gas_mass: f64,
    /// Vapour density at the boiling point, kg/m³
    pub vapor_density: f64,
    /// Lower flammability limit, % vol
    pub lfl: f64,
}

impl FlashInput {
    pub fn for_substance(substance: &Substance, gas_mass: f64) -> Self {
        Self {
            gas_mass,
            vapor_density: substance.vapor_density(),
            lfl: substance.lfl,
        }
    }
}

/// LFL cloud and flash fire radii, m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashZones {
    pub r_lfl: f64,
    pub r_flash: f64,
}

/// `R_LFL = 7.8 · (m / (ρ_v · C_LFL))^0.33`, `R_f = 1.2 · R_LFL`.
pub fn flash_zones(input: &FlashInput) -> Result<FlashZones> {
    let mass = require_non_negative("flash.gas_mass", input.gas_mass)?;
    if mass == 0.0 {
        return Ok(FlashZones::default());
    }
    let density = require_positive("flash.vapor_density", input.vapor_density)?;
    let lfl = require_positive("flash.lfl", input.lfl)?;

    let r_lfl = 7.8 * (mass / (density * lfl)).powf(0.33);
    Ok(FlashZones {
        r_lfl,
        r_flash: FLASH_TO_LFL_RATIO * r_lfl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{chlorine, propane};

    #[test]
    fn test_unit_cloud() {
        let z = flash_zones(&FlashInput {
            gas_mass: 1.0,
            vapor_density: 1.0,
            lfl: 1.0,
        })
        .unwrap();
        assert!((z.r_lfl - 7.8).abs() < 1e-12);
        assert!((z.r_flash - 9.36).abs() < 1e-12);
    }

    #[test]
    fn test_radius_grows_with_mass() {
        let small = flash_zones(&FlashInput::for_substance(&propane(), 10.0)).unwrap();
        let large = flash_zones(&FlashInput::for_substance(&propane(), 1_000.0)).unwrap();
        assert!(large.r_lfl > small.r_lfl);
        // 100x mass -> 100^0.33 ≈ 4.57x radius
        assert!((large.r_lfl / small.r_lfl - 100f64.powf(0.33)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_mass_is_all_zero() {
        let z = flash_zones(&FlashInput::for_substance(&propane(), 0.0)).unwrap();
        assert_eq!(z, FlashZones::default());
    }

    #[test]
    fn test_non_flammable_substance_rejected() {
        // Chlorine has no flammability limit
        assert!(flash_zones(&FlashInput::for_substance(&chlorine(), 5.0)).is_err());
    }
}
