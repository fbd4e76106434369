//! Ambient conditions shared by all physical effect calculators.

use serde::{Deserialize, Serialize};

use crate::assessment::physics::StabilityClass;

/// Weather and site conditions assumed for every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Wind speed at 10 m, m/s
    pub wind_speed: f64,
    /// Ambient air temperature, °C
    pub ambient_temperature: f64,
    /// Atmospheric pressure, kPa
    pub atmospheric_pressure: f64,
    /// Pasquill stability class for plume dispersion
    pub stability: StabilityClass,
    /// Characteristic evaporation window, s
    pub evaporation_window: f64,
    /// Air-flow factor η over the pool (1.0 for still air)
    pub evaporation_wind_factor: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind_speed: 1.0,
            ambient_temperature: 20.0,
            atmospheric_pressure: 101.325,
            stability: StabilityClass::D,
            evaporation_window: 3600.0, // 1 hour
            evaporation_wind_factor: 1.0,
        }
    }
}

impl EnvironmentConfig {
    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn with_ambient_temperature(mut self, temperature: f64) -> Self {
        self.ambient_temperature = temperature;
        self
    }

    pub fn with_stability(mut self, stability: StabilityClass) -> Self {
        self.stability = stability;
        self
    }

    pub fn with_evaporation_window(mut self, seconds: f64) -> Self {
        self.evaporation_window = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.wind_speed > 0.0) || !self.wind_speed.is_finite() {
            return Err(format!("wind_speed must be > 0.0, got {}", self.wind_speed));
        }
        if !(self.ambient_temperature > -273.15) || !self.ambient_temperature.is_finite() {
            return Err(format!(
                "ambient_temperature must be above absolute zero, got {}",
                self.ambient_temperature
            ));
        }
        if !(self.atmospheric_pressure > 0.0) {
            return Err(format!(
                "atmospheric_pressure must be > 0.0, got {}",
                self.atmospheric_pressure
            ));
        }
        if !(self.evaporation_window > 0.0) {
            return Err(format!(
                "evaporation_window must be > 0.0, got {}",
                self.evaporation_window
            ));
        }
        if !(self.evaporation_wind_factor > 0.0) {
            return Err(format!(
                "evaporation_wind_factor must be > 0.0, got {}",
                self.evaporation_wind_factor
            ));
        }
        Ok(())
    }
}
