//! Substance reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, Error, Result};

/// Molar volume of an ideal gas at normal conditions, m³/kmol.
pub const MOLAR_VOLUME: f64 = 22.413;

/// Substance hazard category used to key event trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceCategory {
    /// Flammable liquid stored below its boiling point (gasoline, diesel)
    FlammableLiquid,
    /// Flammable gas liquefied under pressure (propane, butane)
    LiquefiedGas,
    /// Non-flammable toxic substance (chlorine)
    Toxic,
    /// Substance that is both flammable and toxic (ammonia, hydrogen sulphide)
    FlammableToxic,
}

impl SubstanceCategory {
    pub const ALL: [SubstanceCategory; 4] = [
        SubstanceCategory::FlammableLiquid,
        SubstanceCategory::LiquefiedGas,
        SubstanceCategory::Toxic,
        SubstanceCategory::FlammableToxic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubstanceCategory::FlammableLiquid => "flammable_liquid",
            SubstanceCategory::LiquefiedGas => "liquefied_gas",
            SubstanceCategory::Toxic => "toxic",
            SubstanceCategory::FlammableToxic => "flammable_toxic",
        }
    }

    pub fn is_flammable(&self) -> bool {
        match self {
            SubstanceCategory::FlammableLiquid
            | SubstanceCategory::LiquefiedGas
            | SubstanceCategory::FlammableToxic => true,
            SubstanceCategory::Toxic => false,
        }
    }

    pub fn is_toxic(&self) -> bool {
        match self {
            SubstanceCategory::Toxic | SubstanceCategory::FlammableToxic => true,
            SubstanceCategory::FlammableLiquid | SubstanceCategory::LiquefiedGas => false,
        }
    }
}

impl fmt::Display for SubstanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thermophysical and hazard properties of a substance.
///
/// Units follow the usual consequence-modelling conventions:
/// temperatures in °C, heats in J/kg, concentrations in % vol,
/// toxic doses in mg·min/L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    pub id: String,
    pub name: String,
    pub category: SubstanceCategory,
    /// Liquid density, kg/m³
    pub density: f64,
    /// Molar mass, kg/kmol
    pub molar_mass: f64,
    /// Normal boiling point, °C
    pub boiling_point: f64,
    /// Heat of evaporation, J/kg
    pub heat_of_evaporation: f64,
    /// Lower heat of combustion, J/kg
    #[serde(default)]
    pub heat_of_combustion: f64,
    /// Liquid heat capacity, J/(kg·K)
    pub heat_capacity: f64,
    /// Sensitivity class for vapour cloud explosions (1 = most sensitive)
    #[serde(default = "default_explosion_class")]
    pub explosion_class: u8,
    /// Expansion degree σ of combustion products (7 gas, 4 heterogeneous)
    #[serde(default = "default_expansion_degree")]
    pub expansion_degree: f64,
    /// Energy concentration level (1 elevated cloud, 2 ground-level cloud)
    #[serde(default = "default_energy_level")]
    pub energy_level: u8,
    /// Lower flammability limit, % vol
    #[serde(default)]
    pub lfl: f64,
    /// Upper flammability limit, % vol
    #[serde(default)]
    pub ufl: f64,
    /// Threshold toxic dose, mg·min/L
    #[serde(default)]
    pub threshold_toxic_dose: f64,
    /// Lethal toxic dose, mg·min/L
    #[serde(default)]
    pub lethal_toxic_dose: f64,
    /// Measured burning rate, kg/(m²·s); estimated when absent
    #[serde(default)]
    pub burn_rate: Option<f64>,
    /// Market price, currency units per tonne
    #[serde(default)]
    pub price: f64,
}

fn default_explosion_class() -> u8 {
    3
}

fn default_expansion_degree() -> f64 {
    7.0
}

fn default_energy_level() -> u8 {
    2
}

impl Substance {
    /// Vapour density at the boiling point, kg/m³.
    pub fn vapor_density(&self) -> f64 {
        self.molar_mass / (MOLAR_VOLUME * (1.0 + 0.00367 * self.boiling_point))
    }

    /// Check that the data is physically usable for this category.
    pub fn validate(&self) -> Result<()> {
        require_positive("density", self.density)?;
        require_positive("molar_mass", self.molar_mass)?;
        require_positive("heat_of_evaporation", self.heat_of_evaporation)?;
        require_non_negative("heat_capacity", self.heat_capacity)?;
        require_non_negative("price", self.price)?;
        if !self.boiling_point.is_finite() || self.boiling_point <= -273.15 {
            return Err(Error::invalid_input(format!(
                "{}: boiling_point must be above absolute zero, got {}",
                self.id, self.boiling_point
            )));
        }
        if !(1..=4).contains(&self.explosion_class) {
            return Err(Error::invalid_input(format!(
                "{}: explosion_class must be in 1..=4, got {}",
                self.id, self.explosion_class
            )));
        }
        if !(1..=2).contains(&self.energy_level) {
            return Err(Error::invalid_input(format!(
                "{}: energy_level must be 1 or 2, got {}",
                self.id, self.energy_level
            )));
        }
        if !(self.expansion_degree > 1.0) {
            return Err(Error::invalid_input(format!(
                "{}: expansion_degree must be > 1, got {}",
                self.id, self.expansion_degree
            )));
        }
        if self.category.is_flammable() {
            require_positive("heat_of_combustion", self.heat_of_combustion)?;
            require_positive("lfl", self.lfl)?;
            if self.ufl != 0.0 && self.ufl < self.lfl {
                return Err(Error::invalid_input(format!(
                    "{}: ufl {} below lfl {}",
                    self.id, self.ufl, self.lfl
                )));
            }
        }
        if self.category.is_toxic() {
            require_positive("threshold_toxic_dose", self.threshold_toxic_dose)?;
            require_positive("lethal_toxic_dose", self.lethal_toxic_dose)?;
            if self.lethal_toxic_dose < self.threshold_toxic_dose {
                return Err(Error::invalid_input(format!(
                    "{}: lethal dose {} below threshold dose {}",
                    self.id, self.lethal_toxic_dose, self.threshold_toxic_dose
                )));
            }
        }
        if let Some(rate) = self.burn_rate {
            require_positive("burn_rate", rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Motor gasoline.
    pub(crate) fn gasoline() -> Substance {
        Substance {
            id: "gasoline".into(),
            name: "Gasoline".into(),
            category: SubstanceCategory::FlammableLiquid,
            density: 730.0,
            molar_mass: 95.3,
            boiling_point: 91.0,
            heat_of_evaporation: 350_000.0,
            heat_of_combustion: 44_000_000.0,
            heat_capacity: 2_220.0,
            explosion_class: 3,
            expansion_degree: 7.0,
            energy_level: 2,
            lfl: 1.1,
            ufl: 6.0,
            threshold_toxic_dose: 0.0,
            lethal_toxic_dose: 0.0,
            burn_rate: Some(0.06),
            price: 50_000.0,
        }
    }

    /// Liquefied propane.
    pub(crate) fn propane() -> Substance {
        Substance {
            id: "propane".into(),
            name: "Propane".into(),
            category: SubstanceCategory::LiquefiedGas,
            density: 500.0,
            molar_mass: 44.1,
            boiling_point: -42.0,
            heat_of_evaporation: 426_000.0,
            heat_of_combustion: 46_350_000.0,
            heat_capacity: 2_520.0,
            explosion_class: 2,
            expansion_degree: 7.0,
            energy_level: 2,
            lfl: 2.1,
            ufl: 9.5,
            threshold_toxic_dose: 0.0,
            lethal_toxic_dose: 0.0,
            burn_rate: None,
            price: 40_000.0,
        }
    }

    /// Liquid chlorine.
    pub(crate) fn chlorine() -> Substance {
        Substance {
            id: "chlorine".into(),
            name: "Chlorine".into(),
            category: SubstanceCategory::Toxic,
            density: 1_560.0,
            molar_mass: 70.9,
            boiling_point: -34.0,
            heat_of_evaporation: 288_000.0,
            heat_of_combustion: 0.0,
            heat_capacity: 940.0,
            explosion_class: 4,
            expansion_degree: 7.0,
            energy_level: 1,
            lfl: 0.0,
            ufl: 0.0,
            threshold_toxic_dose: 0.6,
            lethal_toxic_dose: 6.0,
            burn_rate: None,
            price: 20_000.0,
        }
    }

    /// Liquid ammonia.
    pub(crate) fn ammonia() -> Substance {
        Substance {
            id: "ammonia".into(),
            name: "Ammonia".into(),
            category: SubstanceCategory::FlammableToxic,
            density: 681.0,
            molar_mass: 17.0,
            boiling_point: -33.4,
            heat_of_evaporation: 1_370_000.0,
            heat_of_combustion: 18_600_000.0,
            heat_capacity: 4_700.0,
            explosion_class: 4,
            expansion_degree: 7.0,
            energy_level: 2,
            lfl: 15.0,
            ufl: 28.0,
            threshold_toxic_dose: 15.0,
            lethal_toxic_dose: 150.0,
            burn_rate: None,
            price: 25_000.0,
        }
    }
}
