//! Search parameters supplied by the user-facing layer.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::PhysicalAddress;
use crate::CoreError;

pub const MAX_RADIUS_KM: f64 = 100.0;
pub const MAX_RESULTS_LIMIT: usize = 1000;

/// Travel mode passed through to directions links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => Ok(TravelMode::Walking),
            "driving" => Ok(TravelMode::Driving),
            _ => Err(CoreError::InvalidTravelMode(s.to_owned())),
        }
    }
}

/// Whether ranked results are re-filtered against the requested radius.
///
/// The provider's `around` filter is approximate, so a few features just
/// outside the radius can come back. `Strict` drops them after distances
/// are computed; `Lenient` keeps whatever the provider returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusPolicy {
    #[default]
    Strict,
    Lenient,
}

impl FromStr for RadiusPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RadiusPolicy::Strict),
            "lenient" => Ok(RadiusPolicy::Lenient),
            _ => Err(CoreError::InvalidRadiusPolicy(s.to_owned())),
        }
    }
}

/// One search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// OpenStreetMap `amenity` tag value, e.g. `"cafe"`.
    pub amenity: String,
    pub physical_address: PhysicalAddress,
    pub radius_km: f64,
    /// Case-insensitive name fragments to exclude.
    pub deny_list: BTreeSet<String>,
    pub travel_mode: TravelMode,
    pub max_results: usize,
    /// Reverse geocode places the provider returned without an address.
    /// One extra geocoder call per such place.
    pub attempt_reverse_geocoding: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            amenity: "cafe".to_string(),
            physical_address: PhysicalAddress::new(Some("1912 Pike Place"), "Seattle", "WA"),
            radius_km: 1.0,
            deny_list: ["Starbucks", "Dunkin"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            travel_mode: TravelMode::Walking,
            max_results: 200,
            attempt_reverse_geocoding: false,
        }
    }
}

impl Options {
    /// Search radius in whole metres, as sent to the map provider.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn radius_meters(&self) -> u32 {
        (self.radius_km * 1000.0).round().max(0.0) as u32
    }

    /// Check the bounds the search form enforces.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] when the amenity is blank, the radius is outside
    /// `0.0..=100.0` km, or `max_results` is outside `1..=1000`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.amenity.trim().is_empty() {
            return Err(CoreError::EmptyAmenity);
        }
        if !(0.0..=MAX_RADIUS_KM).contains(&self.radius_km) {
            return Err(CoreError::RadiusOutOfRange {
                radius_km: self.radius_km,
            });
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(CoreError::MaxResultsOutOfRange {
                max_results: self.max_results,
            });
        }
        Ok(())
    }
}
