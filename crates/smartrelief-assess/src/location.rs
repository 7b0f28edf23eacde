//! Location-based risk and affected-area estimation
//!
//! The geographic risk lookup is an external collaborator; [`GeoRiskProvider`]
//! is its seam. [`BaselineGeoRisk`] returns a fixed regional profile and is used
//! when no provider is configured.

use serde::{Deserialize, Serialize};

use crate::domain::{damage::unit, AffectedArea, Coordinates, DamageLevel};
use crate::error::{AssessError, Result};

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.32;
/// Boundary ring spacing in degrees.
pub const BOUNDARY_STEP_DEGREES: usize = 30;
/// People per square kilometre at population density 0.5.
pub const BASE_PEOPLE_PER_KM2: f64 = 1000.0;

/// Location risk profile, every field in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRisk {
    /// Relative population density
    pub population_density: f64,
    /// Ease of reaching the site; higher is easier
    pub accessibility: f64,
    /// Current weather hazard
    pub weather_risk: f64,
    /// Historical hazard frequency
    pub hazard_frequency: f64,
}

impl GeoRisk {
    /// Geographic priority factor on `[0, 10]`.
    pub fn geo_factor(&self) -> f64 {
        10.0 * (0.4 * unit(self.population_density)
            + 0.2 * (1.0 - unit(self.accessibility))
            + 0.2 * unit(self.weather_risk)
            + 0.2 * unit(self.hazard_frequency))
    }

    /// Replace fields with any values present in `overrides`.
    pub fn with_overrides(mut self, overrides: &GeoContextOverride) -> Self {
        if let Some(v) = overrides.population_density {
            self.population_density = v;
        }
        if let Some(v) = overrides.accessibility {
            self.accessibility = v;
        }
        if let Some(v) = overrides.weather_risk {
            self.weather_risk = v;
        }
        self
    }
}

/// Caller-supplied context that replaces provider values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoContextOverride {
    /// Population density in `[0, 1]`
    pub population_density: Option<f64>,
    /// Accessibility in `[0, 1]`
    pub accessibility: Option<f64>,
    /// Weather risk in `[0, 1]`
    pub weather_risk: Option<f64>,
}

impl GeoContextOverride {
    /// Reject values outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("population_density", self.population_density),
            ("accessibility", self.accessibility),
            ("weather_risk", self.weather_risk),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(AssessError::InvalidRange(format!(
                        "{name} {v} must be between 0 and 1"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.population_density.is_none()
            && self.accessibility.is_none()
            && self.weather_risk.is_none()
    }
}

/// Source of location risk profiles.
pub trait GeoRiskProvider: Send + Sync {
    /// Risk profile at a location
    fn risk_at(&self, location: &Coordinates) -> GeoRisk;
}

/// Fixed regional baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineGeoRisk;

impl BaselineGeoRisk {
    /// Mean of the flood, earthquake, landslide and wildfire baselines.
    pub const HAZARD_FREQUENCY: f64 = (0.3 + 0.2 + 0.1 + 0.4) / 4.0;
}

impl GeoRiskProvider for BaselineGeoRisk {
    fn risk_at(&self, _location: &Coordinates) -> GeoRisk {
        GeoRisk {
            population_density: 0.5,
            accessibility: 0.7,
            weather_risk: 0.2,
            hazard_frequency: Self::HAZARD_FREQUENCY,
        }
    }
}

/// Radius of the affected area for a damage level, in kilometres.
pub fn affected_radius_km(level: DamageLevel) -> f64 {
    match level {
        DamageLevel::Minimal => 0.25,
        DamageLevel::Minor => 0.5,
        DamageLevel::Moderate => 1.0,
        DamageLevel::Severe => 2.0,
        DamageLevel::Critical => 3.0,
    }
}

/// Estimate the affected area around a location.
pub fn affected_area(center: Coordinates, level: DamageLevel, population_density: f64) -> AffectedArea {
    let radius_km = affected_radius_km(level);
    let area_km2 = std::f64::consts::PI * radius_km * radius_km;
    let people = area_km2 * BASE_PEOPLE_PER_KM2 * 2.0 * unit(population_density);

    AffectedArea {
        center,
        radius_km,
        area_km2,
        estimated_population_affected: people.round() as u64,
        boundary: boundary_ring(center, radius_km),
    }
}

/// Points every 30 degrees on a circle of `radius_km` around `center`.
///
/// Latitude is clamped at the poles and longitude wrapped into `[-180, 180]`.
pub fn boundary_ring(center: Coordinates, radius_km: f64) -> Vec<Coordinates> {
    let lat_scale = radius_km / KM_PER_DEGREE;
    let lon_scale =
        radius_km / (KM_PER_DEGREE * center.latitude().to_radians().cos().abs().max(1e-6));

    (0..360)
        .step_by(BOUNDARY_STEP_DEGREES)
        .filter_map(|degrees| {
            let angle = (degrees as f64).to_radians();
            let lat = (center.latitude() + lat_scale * angle.cos()).clamp(-90.0, 90.0);
            let lon = wrap_longitude(center.longitude() + lon_scale * angle.sin());
            Coordinates::new(lat, lon).ok()
        })
        .collect()
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}
