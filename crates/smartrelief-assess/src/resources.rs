//! Resource demand prediction
//!
//! Base quantities scale linearly with `severity / 10`; disaster-type
//! modifiers add specialised units on top. Every quantity is non-decreasing in
//! severity for a fixed disaster type.

use crate::domain::{
    CostEstimate, DeploymentTimeline, DisasterType, Equipment, Personnel, ResourceRequirement,
    SeverityScore, Supplies, Vehicles,
};

/// Severity band used for timelines, costs and priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResponseBand {
    /// Severity below 6
    Standard,
    /// Severity 6 to below 8
    Elevated,
    /// Severity 8 and above
    Critical,
}

impl ResponseBand {
    /// Band for a severity value
    pub fn from_severity(severity: f64) -> Self {
        if severity >= 8.0 {
            ResponseBand::Critical
        } else if severity >= 6.0 {
            ResponseBand::Elevated
        } else {
            ResponseBand::Standard
        }
    }

    fn timeline(&self) -> DeploymentTimeline {
        let (immediate, first, specialized, heavy) = match self {
            ResponseBand::Critical => ("0-1 hours", "1-2 hours", "2-6 hours", "6-12 hours"),
            ResponseBand::Elevated => ("0-2 hours", "2-4 hours", "4-12 hours", "12-24 hours"),
            ResponseBand::Standard => ("0-4 hours", "4-8 hours", "8-24 hours", "24-48 hours"),
        };
        DeploymentTimeline {
            immediate_response: immediate.to_string(),
            first_responders: first.to_string(),
            specialized_teams: specialized.to_string(),
            heavy_equipment: heavy.to_string(),
        }
    }

    fn operation_duration(&self) -> &'static str {
        match self {
            ResponseBand::Critical => "2-4 weeks",
            ResponseBand::Elevated => "1-2 weeks",
            ResponseBand::Standard => "3-7 days",
        }
    }

    fn cost(&self) -> CostEstimate {
        let amount_usd = match self {
            ResponseBand::Critical => 50_000,
            ResponseBand::Elevated => 25_000,
            ResponseBand::Standard => 10_000,
        };
        CostEstimate {
            amount_usd,
            low_usd: amount_usd * 4 / 5,
            high_usd: amount_usd * 3 / 2,
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            ResponseBand::Critical => 0.8,
            ResponseBand::Elevated => 0.75,
            ResponseBand::Standard => 0.7,
        }
    }

    fn priorities(&self) -> &'static [&'static str] {
        match self {
            ResponseBand::Critical => &[
                "search_and_rescue",
                "medical",
                "shelter",
                "engineering",
                "logistics",
            ],
            ResponseBand::Elevated => &["medical", "shelter", "engineering", "logistics"],
            ResponseBand::Standard => &["assessment", "medical", "logistics"],
        }
    }

    fn equipment_items(&self) -> &'static [&'static str] {
        match self {
            ResponseBand::Critical => &["generators", "tents", "communication_equipment"],
            ResponseBand::Elevated => &["first_aid_supplies", "communication_equipment"],
            ResponseBand::Standard => &["first_aid_supplies"],
        }
    }
}

/// `max(min, floor(base * ratio))`
fn scaled(base: f64, ratio: f64, min: u32) -> u32 {
    ((base * ratio).floor() as u32).max(min)
}

/// Maps severity and disaster type to resource demand.
pub struct ResourcePredictor;

impl ResourcePredictor {
    /// Predict resource demand
    pub fn predict(severity: &SeverityScore, disaster: Option<&DisasterType>) -> ResourceRequirement {
        let value = severity.value();
        let ratio = value / 10.0;
        let band = ResponseBand::from_severity(value);

        let mut personnel = Personnel {
            emergency_responders: scaled(20.0, ratio, 2),
            medical_personnel: scaled(10.0, ratio, 1),
            engineers: scaled(5.0, ratio, 1),
            volunteers: scaled(50.0, ratio, 5),
            ..Personnel::default()
        };
        let mut vehicles = Vehicles {
            ambulances: scaled(3.0, ratio, 1),
            fire_trucks: scaled(2.0, ratio, 1),
            ..Vehicles::default()
        };
        let mut supplies = Supplies {
            food_packages: scaled(200.0, ratio, 20),
            water_bottles: scaled(400.0, ratio, 50),
            blankets: scaled(100.0, ratio, 10),
            medical_kits: scaled(40.0, ratio, 5),
            sanitation_kits: 0,
        };
        let mut equipment = Equipment {
            generators: scaled(4.0, ratio, 1),
            heavy_equipment: value >= 6.0,
            temporary_shelter: value >= 7.0,
            items: band.equipment_items().iter().map(|s| s.to_string()).collect(),
            ..Equipment::default()
        };

        match disaster {
            Some(DisasterType::Fire) => {
                vehicles.fire_trucks *= 2;
                vehicles.water_tankers = scaled(4.0, ratio, 1);
                equipment.items.push("water_tankers".to_string());
            }
            Some(DisasterType::Flood) => {
                vehicles.boats = scaled(5.0, ratio, 1);
                equipment.water_pumps = scaled(4.0, ratio, 1);
                supplies.sanitation_kits = personnel.volunteers * 2;
                equipment.items.push("rescue_boats".to_string());
                equipment.items.push("water_pumps".to_string());
            }
            Some(DisasterType::Earthquake) => {
                personnel.search_rescue_teams = scaled(4.0, ratio, 1);
                personnel.structural_engineers = scaled(3.0, ratio, 1);
                equipment.heavy_equipment = true;
                equipment.items.push("search_and_rescue_kits".to_string());
            }
            Some(d) if d.is_wind_storm() => {
                equipment.emergency_shelters = scaled(5.0, ratio, 1);
                personnel.power_restoration_crews = scaled(4.0, ratio, 1);
                equipment.items.push("emergency_shelters".to_string());
            }
            _ => {}
        }

        if equipment.heavy_equipment {
            equipment.items.push("heavy_machinery".to_string());
        }

        ResourceRequirement {
            personnel,
            vehicles,
            supplies,
            equipment,
            deployment_timeline: band.timeline(),
            operation_duration: band.operation_duration().to_string(),
            cost_estimate: band.cost(),
            resource_priorities: band.priorities().iter().map(|s| s.to_string()).collect(),
            confidence: band.confidence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(severity: f64, disaster: Option<DisasterType>) -> ResourceRequirement {
        ResourcePredictor::predict(&SeverityScore::new(severity), disaster.as_ref())
    }

    fn quantities(r: &ResourceRequirement) -> Vec<u32> {
        vec![
            r.personnel.emergency_responders,
            r.personnel.medical_personnel,
            r.personnel.engineers,
            r.personnel.volunteers,
            r.personnel.search_rescue_teams,
            r.personnel.structural_engineers,
            r.personnel.power_restoration_crews,
            r.vehicles.ambulances,
            r.vehicles.fire_trucks,
            r.vehicles.water_tankers,
            r.vehicles.boats,
            r.supplies.food_packages,
            r.supplies.water_bottles,
            r.supplies.blankets,
            r.supplies.medical_kits,
            r.supplies.sanitation_kits,
            r.equipment.generators,
            r.equipment.water_pumps,
            r.equipment.emergency_shelters,
            u32::from(r.equipment.heavy_equipment),
            u32::from(r.equipment.temporary_shelter),
        ]
    }

    #[test]
    fn test_base_table() {
        let r = predict(5.0, None);
        assert_eq!(r.personnel.emergency_responders, 10);
        assert_eq!(r.personnel.medical_personnel, 5);
        assert_eq!(r.personnel.engineers, 2);
        assert_eq!(r.personnel.volunteers, 25);
        assert_eq!(r.vehicles.ambulances, 1);
        assert_eq!(r.vehicles.fire_trucks, 1);
        assert_eq!(r.equipment.generators, 2);
        assert!(!r.equipment.heavy_equipment);
        assert!(!r.equipment.temporary_shelter);
        assert_eq!(r.operation_duration, "3-7 days");
        assert_eq!(r.cost_estimate.amount_usd, 10_000);
    }

    #[test]
    fn test_minimums_at_floor() {
        let r = predict(1.0, None);
        assert_eq!(r.personnel.emergency_responders, 2);
        assert_eq!(r.personnel.volunteers, 5);
        assert_eq!(r.supplies.water_bottles, 50);
        assert_eq!(r.supplies.medical_kits, 5);
    }

    #[test]
    fn test_critical_band() {
        let r = predict(9.0, None);
        assert!(r.equipment.heavy_equipment);
        assert!(r.equipment.temporary_shelter);
        assert_eq!(r.deployment_timeline.immediate_response, "0-1 hours");
        assert_eq!(r.operation_duration, "2-4 weeks");
        assert_eq!(r.cost_estimate.amount_usd, 50_000);
        assert_eq!(r.confidence, 0.8);
        assert_eq!(r.resource_priorities[0], "search_and_rescue");
    }

    #[test]
    fn test_disaster_modifiers() {
        let fire = predict(8.0, Some(DisasterType::Fire));
        assert_eq!(fire.vehicles.fire_trucks, 2 * predict(8.0, None).vehicles.fire_trucks);
        assert_eq!(fire.vehicles.water_tankers, 3);

        let flood = predict(6.0, Some(DisasterType::Flood));
        assert_eq!(flood.vehicles.boats, 3);
        assert_eq!(flood.equipment.water_pumps, 2);
        assert_eq!(flood.supplies.sanitation_kits, 2 * flood.personnel.volunteers);

        let quake = predict(3.0, Some(DisasterType::Earthquake));
        assert!(quake.equipment.heavy_equipment);
        assert!(quake.personnel.search_rescue_teams >= 1);
        assert!(quake.personnel.structural_engineers >= 1);

        let storm = predict(7.0, Some(DisasterType::Tornado));
        assert_eq!(storm.equipment.emergency_shelters, 3);
        assert_eq!(storm.personnel.power_restoration_crews, 2);

        let unknown = predict(7.0, Some(DisasterType::Unknown("volcano".into())));
        assert_eq!(quantities(&unknown), quantities(&predict(7.0, None)));
    }

    #[test]
    fn test_monotonic_in_severity() {
        let types = [
            None,
            Some(DisasterType::Earthquake),
            Some(DisasterType::Flood),
            Some(DisasterType::Fire),
            Some(DisasterType::Hurricane),
        ];
        for disaster in types {
            let mut previous = quantities(&predict(1.0, disaster.clone()));
            for step in 11..=100 {
                let current = quantities(&predict(step as f64 / 10.0, disaster.clone()));
                for (before, after) in previous.iter().zip(&current) {
                    assert!(after >= before, "{disaster:?} at {step}");
                }
                previous = current;
            }
        }
    }
}
