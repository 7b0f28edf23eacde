//! Resource requirement value objects.

use serde::{Deserialize, Serialize};

/// Personnel counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Personnel {
    /// Emergency responders
    pub emergency_responders: u32,
    /// Medical personnel
    pub medical_personnel: u32,
    /// General engineers
    pub engineers: u32,
    /// Volunteers
    pub volunteers: u32,
    /// Search-and-rescue teams (earthquake)
    pub search_rescue_teams: u32,
    /// Structural engineers (earthquake)
    pub structural_engineers: u32,
    /// Power-restoration crews (wind storms)
    pub power_restoration_crews: u32,
}

/// Vehicle counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vehicles {
    /// Ambulances
    pub ambulances: u32,
    /// Fire trucks
    pub fire_trucks: u32,
    /// Water tankers (fire)
    pub water_tankers: u32,
    /// Rescue boats (flood)
    pub boats: u32,
}

/// Relief supply quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Supplies {
    /// Food packages
    pub food_packages: u32,
    /// Water bottles
    pub water_bottles: u32,
    /// Blankets
    pub blankets: u32,
    /// Medical kits
    pub medical_kits: u32,
    /// Sanitation kits (flood)
    pub sanitation_kits: u32,
}

/// Equipment counts and flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    /// Generators
    pub generators: u32,
    /// Water pumps (flood)
    pub water_pumps: u32,
    /// Emergency shelters (wind storms)
    pub emergency_shelters: u32,
    /// Heavy machinery required
    pub heavy_equipment: bool,
    /// Temporary shelter required
    pub temporary_shelter: bool,
    /// Equipment list for dispatch
    pub items: Vec<String>,
}

/// Phase-by-phase deployment windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTimeline {
    /// Immediate response window
    pub immediate_response: String,
    /// First responders on site
    pub first_responders: String,
    /// Specialized teams on site
    pub specialized_teams: String,
    /// Heavy equipment on site
    pub heavy_equipment: String,
}

/// Banded cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Point estimate in USD
    pub amount_usd: u64,
    /// Lower bound in USD
    pub low_usd: u64,
    /// Upper bound in USD
    pub high_usd: u64,
}

/// Predicted resource demand for a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    /// Personnel
    pub personnel: Personnel,
    /// Vehicles
    pub vehicles: Vehicles,
    /// Supplies
    pub supplies: Supplies,
    /// Equipment
    pub equipment: Equipment,
    /// Deployment timeline
    pub deployment_timeline: DeploymentTimeline,
    /// Total operation duration
    pub operation_duration: String,
    /// Cost estimate
    pub cost_estimate: CostEstimate,
    /// Resource categories in dispatch order
    pub resource_priorities: Vec<String>,
    /// Prediction confidence in `[0, 1]`
    pub confidence: f64,
}

impl ResourceRequirement {
    /// Same bands with nothing dispatched. Used when no assessment could be made.
    pub fn without_deployment(self) -> Self {
        Self {
            personnel: Personnel::default(),
            vehicles: Vehicles::default(),
            supplies: Supplies::default(),
            equipment: Equipment::default(),
            cost_estimate: CostEstimate::default(),
            resource_priorities: Vec::new(),
            confidence: 0.0,
            ..self
        }
    }

    /// Whether any personnel, vehicle or equipment is requested
    pub fn is_deployment(&self) -> bool {
        let p = &self.personnel;
        let v = &self.vehicles;
        let e = &self.equipment;
        [
            p.emergency_responders,
            p.medical_personnel,
            p.engineers,
            p.volunteers,
            p.search_rescue_teams,
            p.structural_engineers,
            p.power_restoration_crews,
            v.ambulances,
            v.fire_trucks,
            v.water_tankers,
            v.boats,
            e.generators,
            e.water_pumps,
            e.emergency_shelters,
        ]
        .iter()
        .any(|n| *n > 0)
            || e.heavy_equipment
            || e.temporary_shelter
    }
}
