//! Normalization of raw provider features into [`Place`] records.

use placefinder_core::{Place, PlaceAddress};
use placefinder_geocode::{GeoLookupCache, Geocoder, Lookup};

use crate::types::{RawFeature, Tags};

/// Compose `"{number} {street}[, {city}, {state}[ {postcode}]]"` from OSM
/// `addr:*` tags. `None` unless both house number and street are tagged.
#[must_use]
pub fn structured_address(tags: &Tags) -> Option<String> {
    let tag = |key: &str| tags.get(key).map(String::as_str);

    let (Some(number), Some(street)) = (tag("addr:housenumber"), tag("addr:street")) else {
        return None;
    };
    let mut address = format!("{number} {street}");
    if let (Some(city), Some(state)) = (tag("addr:city"), tag("addr:state")) {
        address.push_str(&format!(", {city}, {state}"));
        if let Some(postcode) = tag("addr:postcode") {
            address.push(' ');
            address.push_str(postcode);
        }
    }
    Some(address)
}

/// Map one provider feature to a [`Place`].
///
/// The structured address tags always win. Reverse geocoding is consulted
/// only when they are missing, `attempt_reverse_geocoding` is set, and the
/// feature has a coordinate. Missing data yields `None` fields, never an
/// error; `distance_km` is left unset.
pub async fn extract_place<G: Geocoder>(
    feature: &RawFeature,
    attempt_reverse_geocoding: bool,
    geo: &GeoLookupCache<G>,
) -> Place {
    let point = feature.point();
    let empty = Tags::new();
    let tags = feature.tags().unwrap_or(&empty);

    let mut address = structured_address(tags).map(PlaceAddress::Text);
    if address.is_none() && attempt_reverse_geocoding {
        if let Some(point) = point {
            address = match geo.reverse(point).await {
                Lookup::Found(text) => Some(PlaceAddress::Text(text)),
                Lookup::NotFound | Lookup::ServiceError(_) => None,
            };
        }
    }

    Place {
        name: tags.get("name").cloned(),
        address,
        website: tags.get("website").cloned(),
        point,
        distance_km: None,
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
