//! Inventory and release model.
//!
//! Masses are in tonnes throughout. Line equipment holds `π·(d/2)²·L` of
//! liquid; vessels hold `V·fill`. Fed equipment adds whatever the feed pumps
//! in before it is isolated (`flow · time_out`).

use std::f64::consts::PI;

use tracing::debug;

use super::config::ReleaseConfig;
use super::infra::targets;
use crate::errors::{require_non_negative, require_positive, Error, Result};
use crate::types::{Equipment, EquipmentKind, LineGeometry, Severity, Substance};

/// Mass of substance held by the equipment, t.
pub fn inventory(equipment: &Equipment, substance: &Substance) -> Result<f64> {
    let density = require_positive("density", substance.density)?;
    let volume = match &equipment.kind {
        EquipmentKind::Pipeline(line) | EquipmentKind::Pump(line) => line_volume(line)?,
        EquipmentKind::Tank(v) | EquipmentKind::TechnologicalDevice(v) => {
            vessel_volume(v.volume, v.fill_degree)?
        }
        EquipmentKind::TruckTank(v) => vessel_volume(v.volume, v.fill_degree)?,
    };
    Ok(volume * density * 1e-3)
}

/// Mass released by an accident of the given severity, t.
pub fn accident_mass(
    equipment: &Equipment,
    substance: &Substance,
    severity: Severity,
    release: &ReleaseConfig,
) -> Result<f64> {
    let held = inventory(equipment, substance)?;
    let (full, partial_fraction) = match &equipment.kind {
        EquipmentKind::Pipeline(line) | EquipmentKind::Pump(line) => {
            let rate = line.accident_rate;
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(Error::invalid_input(format!(
                    "{}: accident_rate must be in (0, 1], got {rate}",
                    equipment.id
                )));
            }
            let fed = fed_mass(line.flow, line.time_out)?;
            (held * rate + fed, release.line_leak_fraction)
        }
        EquipmentKind::Tank(v) | EquipmentKind::TechnologicalDevice(v) => {
            (held + fed_mass(v.flow, v.time_out)?, release.vessel_partial_fraction)
        }
        EquipmentKind::TruckTank(_) => (held, release.vessel_partial_fraction),
    };

    let mass = match severity {
        Severity::Full => full,
        Severity::Partial => partial_fraction * full,
    };
    debug!(
        target: targets::INVENTORY,
        equipment = %equipment.id,
        severity = %severity,
        inventory_t = held,
        accident_mass_t = mass,
        "Accident mass"
    );
    Ok(mass)
}

/// Pool area of a spill of `mass` tonnes, m².
///
/// An unconfined spill spreads over `spill_factor · V_liquid`; a tank bund
/// caps it.
pub fn spill_area(
    mass: f64,
    substance: &Substance,
    equipment: &Equipment,
    release: &ReleaseConfig,
) -> Result<f64> {
    let mass = require_non_negative("spill.mass", mass)?;
    let density = require_positive("density", substance.density)?;
    let unconfined = release.spill_factor * mass * 1e3 / density;
    let area = match &equipment.kind {
        EquipmentKind::Tank(v) => match v.bund_area {
            Some(bund) => unconfined.min(require_positive("bund_area", bund)?),
            None => unconfined,
        },
        EquipmentKind::Pipeline(_)
        | EquipmentKind::Pump(_)
        | EquipmentKind::TruckTank(_)
        | EquipmentKind::TechnologicalDevice(_) => unconfined,
    };
    Ok(area)
}

fn line_volume(line: &LineGeometry) -> Result<f64> {
    let length = require_positive("length", line.length)?;
    let d = require_positive("diameter", line.diameter)? / 1000.0;
    Ok(PI * (d / 2.0).powi(2) * length)
}

fn vessel_volume(volume: f64, fill_degree: f64) -> Result<f64> {
    let volume = require_positive("volume", volume)?;
    if !(fill_degree > 0.0 && fill_degree <= 1.0) {
        return Err(Error::InvalidGeometry {
            field: "fill_degree",
            value: fill_degree,
        });
    }
    Ok(volume * fill_degree)
}

fn fed_mass(flow: f64, time_out: f64) -> Result<f64> {
    let flow = require_non_negative("flow", flow)?;
    let time_out = require_non_negative("time_out", time_out)?;
    Ok(flow * time_out / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::gasoline;
    use crate::types::{FedVesselGeometry, VesselGeometry};

    fn equipment(kind: EquipmentKind) -> Equipment {
        Equipment {
            id: "E-1".into(),
            name: String::new(),
            hazard_component: "block".into(),
            substance_id: "gasoline".into(),
            pressure: 0.101325,
            temperature: 20.0,
            expected_casualties: 1,
            category: 1,
            kind,
        }
    }

    fn pipeline(length: f64, diameter: f64) -> Equipment {
        equipment(EquipmentKind::Pipeline(LineGeometry {
            length,
            diameter,
            accident_rate: 1.0,
            flow: 0.0,
            time_out: 0.0,
        }))
    }

    fn tank(volume: f64, fill: f64, bund: Option<f64>) -> Equipment {
        equipment(EquipmentKind::Tank(FedVesselGeometry {
            volume,
            fill_degree: fill,
            bund_area: bund,
            flow: 0.0,
            time_out: 0.0,
        }))
    }

    #[test]
    fn test_pipeline_reference_masses() {
        let eq = pipeline(100.0, 100.0);
        let g = gasoline();
        let cfg = ReleaseConfig::default();
        let inv = inventory(&eq, &g).unwrap();
        let full = accident_mass(&eq, &g, Severity::Full, &cfg).unwrap();
        let partial = accident_mass(&eq, &g, Severity::Partial, &cfg).unwrap();
        assert!((inv - 0.573).abs() < 1e-3, "inventory {inv}");
        assert!((full - 0.573).abs() < 1e-3, "full {full}");
        assert!((partial - 0.086).abs() < 1e-3, "partial {partial}");
    }

    #[test]
    fn test_vessel_partial_is_fraction_of_full() {
        let eq = tank(1000.0, 0.8, None);
        let g = gasoline();
        let cfg = ReleaseConfig::default();
        let full = accident_mass(&eq, &g, Severity::Full, &cfg).unwrap();
        let partial = accident_mass(&eq, &g, Severity::Partial, &cfg).unwrap();
        assert!((full - 584.0).abs() < 1e-9);
        assert!((partial - 0.15 * full).abs() < 1e-9);
    }

    #[test]
    fn test_line_leak_fraction_independent_of_vessel_fraction() {
        let eq = pipeline(100.0, 100.0);
        let g = gasoline();
        let cfg = ReleaseConfig::default().with_vessel_partial_fraction(0.5);
        let full = accident_mass(&eq, &g, Severity::Full, &cfg).unwrap();
        let partial = accident_mass(&eq, &g, Severity::Partial, &cfg).unwrap();
        assert!((partial - 0.15 * full).abs() < 1e-12);
    }

    #[test]
    fn test_feed_adds_to_full_release() {
        let mut eq = tank(100.0, 0.5, None);
        if let EquipmentKind::Tank(ref mut v) = eq.kind {
            v.flow = 10.0;
            v.time_out = 120.0;
        }
        let full = accident_mass(&eq, &gasoline(), Severity::Full, &ReleaseConfig::default()).unwrap();
        assert!((full - (36.5 + 1.2)).abs() < 1e-9, "full {full}");
    }

    #[test]
    fn test_truck_tank_has_no_feed() {
        let eq = equipment(EquipmentKind::TruckTank(VesselGeometry {
            volume: 30.0,
            fill_degree: 0.9,
        }));
        let full = accident_mass(&eq, &gasoline(), Severity::Full, &ReleaseConfig::default()).unwrap();
        assert!((full - 30.0 * 0.9 * 0.73).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_geometry() {
        let g = gasoline();
        assert_eq!(
            inventory(&pipeline(0.0, 100.0), &g),
            Err(Error::InvalidGeometry {
                field: "length",
                value: 0.0
            })
        );
        assert!(inventory(&pipeline(100.0, -5.0), &g).is_err());
        assert!(matches!(
            inventory(&tank(100.0, 1.2, None), &g),
            Err(Error::InvalidGeometry {
                field: "fill_degree",
                ..
            })
        ));
    }

    #[test]
    fn test_accident_rate_out_of_range() {
        let mut eq = pipeline(100.0, 100.0);
        if let EquipmentKind::Pipeline(ref mut line) = eq.kind {
            line.accident_rate = 1.5;
        }
        let err = accident_mass(&eq, &gasoline(), Severity::Full, &ReleaseConfig::default());
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_spill_area_unconfined_and_bunded() {
        let g = gasoline();
        let cfg = ReleaseConfig::default();
        // 0.73 t of gasoline is 1 m³ → 20 m²
        let open = spill_area(0.73, &g, &tank(100.0, 0.5, None), &cfg).unwrap();
        assert!((open - 20.0).abs() < 1e-9);
        let bunded = spill_area(0.73, &g, &tank(100.0, 0.5, Some(12.0)), &cfg).unwrap();
        assert_eq!(bunded, 12.0);
        let small = spill_area(0.073, &g, &tank(100.0, 0.5, Some(12.0)), &cfg).unwrap();
        assert!((small - 2.0).abs() < 1e-9);
    }
}
