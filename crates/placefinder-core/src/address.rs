//! Address and coordinate value types.
//!
//! [`PhysicalAddress`] is the structured form a user types in; [`GeoPoint`]
//! is what the geocoder resolves it to. Both are used as cache keys, so
//! equality and hashing are by field value.

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

/// A postal address with an optional street line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalAddress {
    /// Street number and name, e.g. `"1912 Pike Place"`.
    pub street: Option<String>,
    pub city: String,
    /// Full state name or abbreviation.
    pub state: String,
}

impl PhysicalAddress {
    pub fn new(street: Option<&str>, city: &str, state: &str) -> Self {
        Self {
            street: street.map(str::to_owned),
            city: city.to_owned(),
            state: state.to_owned(),
        }
    }

    /// Single-line form: `"{street}, {city}, {state}"`, or `"{city}, {state}"`
    /// when the street is absent or blank.
    #[must_use]
    pub fn flatten(&self) -> String {
        match self.street.as_deref().map(str::trim) {
            Some(street) if !street.is_empty() => {
                format!("{street}, {}, {}", self.city, self.state)
            }
            _ => format!("{}, {}", self.city, self.state),
        }
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

/// A WGS-84 coordinate pair in decimal degrees.
///
/// Equality and hashing compare the raw bit patterns of both components so
/// the type can key a `HashMap`. Two points are equal only when they were
/// produced from identical floats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Geodesic distance on the WGS-84 ellipsoid, in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let from = Point::new(self.longitude, self.latitude);
        let to = Point::new(other.longitude, other.latitude);
        Geodesic.distance(from, to) / 1000.0
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The address attached to a [`crate::Place`]: free text from the map
/// provider or reverse geocoder, or the structured address a user entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceAddress {
    Text(String),
    Structured(PhysicalAddress),
}

impl PlaceAddress {
    #[must_use]
    pub fn flatten(&self) -> String {
        match self {
            PlaceAddress::Text(text) => text.clone(),
            PlaceAddress::Structured(address) => address.flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn flatten_with_street() {
        let address = PhysicalAddress::new(Some("123 Main St"), "Sampletown", "CA");
        assert_eq!(address.flatten(), "123 Main St, Sampletown, CA");
        assert_eq!(address.to_string(), "123 Main St, Sampletown, CA");
    }

    #[test]
    fn flatten_without_street() {
        let address = PhysicalAddress::new(None, "Seattle", "WA");
        assert_eq!(address.flatten(), "Seattle, WA");
    }

    #[test]
    fn flatten_treats_blank_street_as_absent() {
        let address = PhysicalAddress::new(Some("   "), "Seattle", "WA");
        assert_eq!(address.flatten(), "Seattle, WA");
    }

    #[test]
    fn equal_addresses_hash_equal() {
        let mut set = HashSet::new();
        set.insert(PhysicalAddress::new(Some("1912 Pike Place"), "Seattle", "WA"));
        set.insert(PhysicalAddress::new(Some("1912 Pike Place"), "Seattle", "WA"));
        set.insert(PhysicalAddress::new(None, "Seattle", "WA"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn geo_points_key_by_value() {
        let mut set = HashSet::new();
        set.insert(GeoPoint::new(47.6097, -122.3422));
        set.insert(GeoPoint::new(47.6097, -122.3422));
        set.insert(GeoPoint::new(47.6098, -122.3422));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn geodesic_distance_boston_to_cambridge() {
        let boston = GeoPoint::new(42.3601, -71.0589);
        let cambridge = GeoPoint::new(42.3736, -71.1097);
        let km = boston.distance_km(&cambridge);
        // WGS-84 ellipsoidal reference value.
        assert!((km - 4.4451).abs() < 0.01, "got {km}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(47.6097, -122.3422);
        assert!(p.distance_km(&p).abs() < 1e-9);
    }

    #[test]
    fn place_address_flattens_both_forms() {
        let text = PlaceAddress::Text("85 Pike St, Seattle, WA".to_string());
        assert_eq!(text.flatten(), "85 Pike St, Seattle, WA");
        let structured =
            PlaceAddress::Structured(PhysicalAddress::new(Some("85 Pike St"), "Seattle", "WA"));
        assert_eq!(structured.flatten(), "85 Pike St, Seattle, WA");
    }

    #[test]
    fn place_address_serializes_untagged() {
        let text = PlaceAddress::Text("85 Pike St".to_string());
        assert_eq!(serde_json::to_value(&text).unwrap(), serde_json::json!("85 Pike St"));

        let structured: PlaceAddress =
            serde_json::from_value(serde_json::json!({"street": null, "city": "Seattle", "state": "WA"}))
                .unwrap();
        assert_eq!(
            structured,
            PlaceAddress::Structured(PhysicalAddress::new(None, "Seattle", "WA"))
        );
    }
}
