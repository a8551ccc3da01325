//! Google Maps directions links for result rows.
//!
//! See <https://developers.google.com/maps/documentation/urls/get-started#directions-action>.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::options::TravelMode;
use crate::place::Place;

pub const GOOGLE_MAPS_URL_BASE: &str = "https://www.google.com/maps";

/// Directions URL from the user's current location to `destination`.
#[must_use]
pub fn directions_url(destination: &str, travel_mode: TravelMode) -> String {
    format!(
        "{GOOGLE_MAPS_URL_BASE}/dir/?api=1&destination={}&travelmode={}",
        utf8_percent_encode(destination, NON_ALPHANUMERIC),
        travel_mode.as_str()
    )
}

/// Directions destination for a place: `"{name}, {address}"` when an address
/// is known, otherwise the raw `"{lat},{lon}"` pair. `None` when the place
/// has neither.
#[must_use]
pub fn destination_for(place: &Place) -> Option<String> {
    match (&place.name, &place.address, &place.point) {
        (Some(name), Some(address), _) => Some(format!("{name}, {}", address.flatten())),
        (_, _, Some(point)) => Some(point.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{GeoPoint, PlaceAddress};

    #[test]
    fn builds_encoded_directions_link() {
        let url = directions_url("Cafe Vita, 1005 E Pike St", TravelMode::Walking);
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&destination=Cafe%20Vita%2C%201005%20E%20Pike%20St&travelmode=walking"
        );
    }

    #[test]
    fn destination_prefers_name_and_address() {
        let place = Place {
            name: Some("Cafe Vita".to_string()),
            address: Some(PlaceAddress::Text("1005 E Pike St".to_string())),
            point: Some(GeoPoint::new(47.61, -122.32)),
            ..Place::default()
        };
        assert_eq!(
            destination_for(&place).as_deref(),
            Some("Cafe Vita, 1005 E Pike St")
        );
    }

    #[test]
    fn destination_falls_back_to_coordinates() {
        let place = Place {
            name: Some("Cafe Vita".to_string()),
            point: Some(GeoPoint::new(47.61, -122.32)),
            ..Place::default()
        };
        assert_eq!(destination_for(&place).as_deref(), Some("47.61,-122.32"));
    }
}
