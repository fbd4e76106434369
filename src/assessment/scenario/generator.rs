//! Scenario generation for one equipment instance.

use tracing::{debug, trace};

use super::profile::EquipmentProfile;
use super::record::ScenarioRecord;
use crate::assessment::config::AssessmentConfig;
use crate::assessment::damage::{estimate_damage, DamageInput};
use crate::assessment::infra::targets;
use crate::assessment::inventory::{accident_mass, inventory, spill_area};
use crate::assessment::physics::{
    evaporate, explosion_zones, flash_zones, outflow_rate, pool_fire_zones, release_duration,
    toxic_zones, Evaporation, EvaporationInput, ExplosionInput, FlashInput, PoolFireInput,
    ToxicInput,
};
use crate::assessment::reference::ReferenceTables;
use crate::errors::{Error, Result};
use crate::types::{Branch, DangerousObject, Equipment, Severity, Substance};

/// Release quantities shared by every branch of one severity.
#[derive(Debug, Clone, Copy)]
struct Release {
    held: f64,
    mass: f64,
    pool_area: f64,
    duration: f64,
    evaporation: Evaporation,
}

/// Turns one equipment instance into its ordered scenario records.
///
/// Order is severity (full, partial), then branch order of the event tree.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator<'a> {
    tables: &'a ReferenceTables,
    config: &'a AssessmentConfig,
}

impl<'a> ScenarioGenerator<'a> {
    pub fn new(tables: &'a ReferenceTables, config: &'a AssessmentConfig) -> Self {
        Self { tables, config }
    }

    /// Generate the records of one equipment instance, numbered from
    /// `start_index`. Returns the records and the next free index.
    pub fn generate(
        &self,
        equipment: &Equipment,
        substance: &Substance,
        object: &DangerousObject,
        start_index: u32,
    ) -> Result<(Vec<ScenarioRecord>, u32)> {
        if equipment.substance_id != substance.id {
            return Err(Error::invalid_input(format!(
                "{}: holds '{}' but was given '{}'",
                equipment.id, equipment.substance_id, substance.id
            )));
        }
        substance.validate()?;

        let profile = EquipmentProfile::for_kind(&equipment.kind);
        let tree = self.tables.event_tree(profile.archetype, substance.category)?;
        let rate = self.tables.failure_rate(profile.archetype, equipment.category)?;

        // Reject the whole tree before emitting anything.
        for severity in Severity::ALL {
            for entry in tree.branches(severity) {
                if !profile.admits(entry.branch, substance.category) {
                    return Err(Error::InapplicableBranch {
                        archetype: profile.archetype,
                        category: substance.category,
                        branch: entry.branch,
                    });
                }
            }
        }

        let mut records = Vec::with_capacity(tree.len());
        let mut index = start_index;
        for severity in Severity::ALL {
            let release = self.release(&profile, equipment, substance, severity)?;
            for entry in tree.branches(severity) {
                let record = self.branch_record(
                    index,
                    &profile,
                    equipment,
                    substance,
                    object,
                    severity,
                    entry.branch,
                    rate.get(severity) * entry.weight,
                    &release,
                )?;
                trace!(
                    target: targets::SCENARIO,
                    index = record.index,
                    severity = %severity,
                    branch = %entry.branch,
                    probability = record.probability,
                    total_damage = record.damage.total,
                    "Scenario"
                );
                records.push(record);
                index += 1;
            }
        }

        debug!(
            target: targets::SCENARIO,
            equipment = %equipment.id,
            archetype = %profile.archetype,
            category = %substance.category,
            first = start_index,
            count = records.len(),
            "Generated scenarios"
        );
        Ok((records, index))
    }

    fn release(
        &self,
        profile: &EquipmentProfile,
        equipment: &Equipment,
        substance: &Substance,
        severity: Severity,
    ) -> Result<Release> {
        let env = &self.config.environment;
        let release = &self.config.release;

        let held = inventory(equipment, substance)?;
        let mass = accident_mass(equipment, substance, severity, release)?;
        let pool_area = spill_area(mass, substance, equipment, release)?;
        let evaporation = evaporate(
            substance,
            &EvaporationInput {
                mass,
                pool_area,
                liquid_temperature: equipment.temperature,
                window: env.evaporation_window,
                wind_factor: env.evaporation_wind_factor,
            },
        )?;
        let outflow = outflow_rate(
            equipment.pressure,
            substance.density,
            profile.hole_area(severity, release),
            release.discharge_coefficient,
            env.atmospheric_pressure,
        )?;
        let duration = release_duration(mass, outflow, env.evaporation_window);

        debug!(
            target: targets::PHYSICS,
            equipment = %equipment.id,
            severity = %severity,
            mass_t = mass,
            pool_area,
            evaporated_t = evaporation.total,
            outflow_kg_s = outflow,
            duration_s = duration,
            "Release"
        );
        Ok(Release {
            held,
            mass,
            pool_area,
            duration,
            evaporation,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn branch_record(
        &self,
        index: u32,
        profile: &EquipmentProfile,
        equipment: &Equipment,
        substance: &Substance,
        object: &DangerousObject,
        severity: Severity,
        branch: Branch,
        probability: f64,
        release: &Release,
    ) -> Result<ScenarioRecord> {
        let env = &self.config.environment;
        let mut record = ScenarioRecord::new(index, equipment, severity, branch);
        record.mass_in_equipment = release.held;
        record.mass_in_accident = release.mass;
        record.probability = probability;
        record.mass_risk = probability * release.mass;

        let gas_kg = release.evaporation.total * 1000.0;
        match branch {
            Branch::PoolFire => {
                record.mass_in_factor = release.mass;
                record.pool_fire = pool_fire_zones(&PoolFireInput::for_substance(
                    substance,
                    release.pool_area,
                    env.wind_speed,
                    env.ambient_temperature,
                ))?;
            }
            Branch::Explosion => {
                record.mass_in_factor = release.evaporation.total;
                let mut input = ExplosionInput::for_substance(
                    substance,
                    self.config.release.explosion_participation * gas_kg,
                    object.view_space_class,
                );
                input.ambient_pressure = env.atmospheric_pressure;
                record.explosion = explosion_zones(&input)?;
            }
            Branch::FlashFire => {
                record.mass_in_factor = release.evaporation.total;
                record.flash = flash_zones(&FlashInput::for_substance(substance, gas_kg))?;
            }
            Branch::ToxicDispersion => {
                record.mass_in_factor = release.evaporation.total;
                record.toxic = toxic_zones(&ToxicInput::for_substance(
                    substance,
                    gas_kg / release.duration,
                    release.duration,
                    env.wind_speed,
                    env.ambient_temperature,
                    env.stability,
                ))?;
            }
            // Nothing ignites or disperses: no zones, harm or damage.
            Branch::NoEffect => return Ok(record),
        }

        record.pool_area = release.pool_area;
        record.release_duration = release.duration;
        record.evaporation = release.evaporation;

        let rule = profile.harm_rules(&self.config.harm).get(branch).get(severity);
        record.casualties = rule.casualties.resolve(equipment.expected_casualties);
        record.injured = rule.injured.resolve(equipment.expected_casualties);
        record.damage = estimate_damage(
            &DamageInput {
                casualties: record.casualties,
                injured: record.injured,
                kind: &equipment.kind,
                spill_area: release.pool_area,
                mass_inside: release.mass,
                mass_outside: release.evaporation.total,
                substance_price: substance.price,
                damage_degree: rule.damage_degree,
            },
            &self.config.damage,
        )?;

        record.expected_damage = record.damage.total * probability;
        record.casualty_risk = f64::from(record.casualties) * probability;
        record.injury_risk = f64::from(record.injured) * probability;
        Ok(record)
    }
}
