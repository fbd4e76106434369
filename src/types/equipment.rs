//! Equipment archetypes and site context.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Equipment archetype tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Pipeline,
    Pump,
    Tank,
    TruckTank,
    TechnologicalDevice,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Pipeline,
        Archetype::Pump,
        Archetype::Tank,
        Archetype::TruckTank,
        Archetype::TechnologicalDevice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Pipeline => "pipeline",
            Archetype::Pump => "pump",
            Archetype::Tank => "tank",
            Archetype::TruckTank => "truck_tank",
            Archetype::TechnologicalDevice => "technological_device",
        }
    }

    /// Line-type equipment holds substance in piping (length × bore).
    pub fn is_line(&self) -> bool {
        match self {
            Archetype::Pipeline | Archetype::Pump => true,
            Archetype::Tank | Archetype::TruckTank | Archetype::TechnologicalDevice => false,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of line-type equipment (pipeline segment, pump with its piping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    /// Segment length, m
    pub length: f64,
    /// Inner diameter, mm
    pub diameter: f64,
    /// Fraction of the line inventory involved in a full rupture, (0, 1]
    #[serde(default = "default_accident_rate")]
    pub accident_rate: f64,
    /// Feed flow into the line, kg/s
    #[serde(default)]
    pub flow: f64,
    /// Time until the feed is isolated, s
    #[serde(default)]
    pub time_out: f64,
}

fn default_accident_rate() -> f64 {
    1.0
}

/// Geometry of a vessel without feed (truck tank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselGeometry {
    /// Vessel volume, m³
    pub volume: f64,
    /// Fill degree, (0, 1]
    pub fill_degree: f64,
}

/// Geometry of a fed vessel (storage tank, process device).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FedVesselGeometry {
    /// Vessel volume, m³
    pub volume: f64,
    /// Fill degree, (0, 1]
    pub fill_degree: f64,
    /// Bund (containment) area limiting the spill, m²
    #[serde(default)]
    pub bund_area: Option<f64>,
    /// Feed flow into the vessel, kg/s
    #[serde(default)]
    pub flow: f64,
    /// Time until the feed is isolated, s
    #[serde(default)]
    pub time_out: f64,
}

/// Archetype-specific payload. The archetype is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquipmentKind {
    Pipeline(LineGeometry),
    Pump(LineGeometry),
    Tank(FedVesselGeometry),
    TruckTank(VesselGeometry),
    TechnologicalDevice(FedVesselGeometry),
}

impl EquipmentKind {
    pub fn archetype(&self) -> Archetype {
        match self {
            EquipmentKind::Pipeline(_) => Archetype::Pipeline,
            EquipmentKind::Pump(_) => Archetype::Pump,
            EquipmentKind::Tank(_) => Archetype::Tank,
            EquipmentKind::TruckTank(_) => Archetype::TruckTank,
            EquipmentKind::TechnologicalDevice(_) => Archetype::TechnologicalDevice,
        }
    }
}

/// One risk-bearing unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Facility sub-block this unit reports under
    pub hazard_component: String,
    pub substance_id: String,
    /// Operating pressure, MPa (absolute)
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    /// Operating temperature, °C
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// People expected in the affected area
    #[serde(default)]
    pub expected_casualties: u32,
    /// Failure frequency category (reference table key)
    #[serde(default = "default_category")]
    pub category: u8,
    #[serde(flatten)]
    pub kind: EquipmentKind,
}

fn default_pressure() -> f64 {
    0.101325
}

fn default_temperature() -> f64 {
    20.0
}

fn default_category() -> u8 {
    1
}

impl Equipment {
    pub fn archetype(&self) -> Archetype {
        self.kind.archetype()
    }

    /// Display label: the name when set, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Site-level context of a hazardous production facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerousObject {
    pub name: String,
    /// Personnel exposed on site (individual risk denominator)
    pub employee_count: u32,
    /// Congestion of the surroundings, 1 (dense) ..= 4 (open)
    #[serde(default = "default_view_space_class")]
    pub view_space_class: u8,
}

fn default_view_space_class() -> u8 {
    3
}

impl Default for DangerousObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            employee_count: 0,
            view_space_class: default_view_space_class(),
        }
    }
}
