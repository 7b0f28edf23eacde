//! Disaster type vocabulary and location value objects.

use serde::{Deserialize, Serialize};

use crate::AssessError;

/// Type of disaster reported alongside an image.
///
/// The vocabulary is open: anything unrecognised parses to [`DisasterType::Unknown`]
/// and applies no modifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    /// Earthquake
    Earthquake,
    /// Flood or flash flood
    Flood,
    /// Fire or wildfire
    Fire,
    /// Hurricane, cyclone or typhoon
    Hurricane,
    /// Tornado
    Tornado,
    /// Unrecognised type, original text preserved
    Unknown(String),
}

impl DisasterType {
    /// Parse a free-form disaster type, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "earthquake" | "quake" | "seismic" => DisasterType::Earthquake,
            "flood" | "flooding" | "flash_flood" | "flash flood" => DisasterType::Flood,
            "fire" | "wildfire" | "bushfire" => DisasterType::Fire,
            "hurricane" | "cyclone" | "typhoon" => DisasterType::Hurricane,
            "tornado" => DisasterType::Tornado,
            other => DisasterType::Unknown(other.to_string()),
        }
    }

    /// Multiplier applied to the blended severity before clamping. Always `>= 1.0`.
    pub fn severity_multiplier(&self) -> f64 {
        match self {
            DisasterType::Earthquake => 1.20,
            DisasterType::Hurricane | DisasterType::Tornado => 1.15,
            DisasterType::Fire | DisasterType::Flood => 1.10,
            DisasterType::Unknown(_) => 1.0,
        }
    }

    /// Whether this is a wind storm (hurricane or tornado).
    pub fn is_wind_storm(&self) -> bool {
        matches!(self, DisasterType::Hurricane | DisasterType::Tornado)
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Flood => "flood",
            DisasterType::Fire => "fire",
            DisasterType::Hurricane => "hurricane",
            DisasterType::Tornado => "tornado",
            DisasterType::Unknown(raw) => raw.as_str(),
        }
    }
}

impl std::str::FromStr for DisasterType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for DisasterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// WGS84 coordinates, validated on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = AssessError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Create coordinates, rejecting values outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AssessError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AssessError::InvalidRange(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AssessError::InvalidRange(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(DisasterType::parse("EarthQuake"), DisasterType::Earthquake);
        assert_eq!(DisasterType::parse(" wildfire "), DisasterType::Fire);
        assert_eq!(DisasterType::parse("typhoon"), DisasterType::Hurricane);
        assert_eq!(
            DisasterType::parse("volcano"),
            DisasterType::Unknown("volcano".to_string())
        );
    }

    #[test]
    fn test_multipliers_never_reduce_severity() {
        for raw in ["earthquake", "flood", "fire", "hurricane", "tornado", "meteor"] {
            assert!(DisasterType::parse(raw).severity_multiplier() >= 1.0);
        }
        assert_eq!(DisasterType::parse("meteor").severity_multiplier(), 1.0);
    }

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(6.9271, 79.8612).is_ok());
        assert!(Coordinates::new(90.0, -180.0).is_ok());
        assert!(matches!(
            Coordinates::new(90.5, 0.0),
            Err(AssessError::InvalidRange(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, 181.0),
            Err(AssessError::InvalidRange(_))
        ));
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_deserialization_validates_range() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 6.9271, "longitude": 79.8612}"#).unwrap();
        assert_eq!(ok, Coordinates::new(6.9271, 79.8612).unwrap());

        let err = serde_json::from_str::<Coordinates>(r#"{"latitude": 91.0, "longitude": 0.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude"));
        assert!(
            serde_json::from_str::<Coordinates>(r#"{"latitude": 0.0, "longitude": -200.0}"#)
                .is_err()
        );

        let round_trip: Coordinates = serde_json::from_str(&serde_json::to_string(&ok).unwrap()).unwrap();
        assert_eq!(round_trip, ok);
    }

    #[test]
    fn test_point_axis_order() {
        let coords = Coordinates::new(10.0, 20.0).unwrap();
        let point = coords.to_point();
        assert_eq!(point.x(), 20.0);
        assert_eq!(point.y(), 10.0);
    }
}
