//! Raw map-provider records.
//!
//! ## Observed shape of Overpass `out center` responses
//!
//! ```json
//! {"elements": [
//!   {"type": "node", "id": 1, "lat": 47.61, "lon": -122.34, "tags": {"name": "..."}},
//!   {"type": "way", "id": 2, "center": {"lat": 47.61, "lon": -122.34}, "tags": {}}
//! ]}
//! ```
//!
//! Nodes carry their own coordinate. Ways and relations only carry one when
//! the query asked for `out center`, and even then `center` can be missing
//! for broken geometries. `tags` is omitted entirely on untagged elements.
//!
//! Decoding never fails per element: anything that does not fit is kept as
//! [`RawFeature::Malformed`] so it flows through extraction as an
//! inadmissible place.

use std::collections::BTreeMap;

use placefinder_core::GeoPoint;
use serde_json::Value;

pub type Tags = BTreeMap<String, String>;

/// A point-type feature (`node`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointRecord {
    pub id: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    Way,
    Relation,
}

/// An area-type feature (`way` or `relation`) with an optional centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    pub kind: AreaKind,
    pub id: Option<i64>,
    pub center: Option<GeoPoint>,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawFeature {
    Point(PointRecord),
    Area(AreaRecord),
    /// Not an object, or an unknown/missing `type`.
    Malformed,
}

impl RawFeature {
    /// Decode one provider element, yielding absent fields instead of errors.
    #[must_use]
    pub fn from_value(value: &Value) -> RawFeature {
        let Some(object) = value.as_object() else {
            return RawFeature::Malformed;
        };
        let id = object.get("id").and_then(Value::as_i64);
        let tags = object.get("tags").map(decode_tags).unwrap_or_default();

        match object.get("type").and_then(Value::as_str) {
            Some("node") => RawFeature::Point(PointRecord {
                id,
                lat: object.get("lat").and_then(finite_f64),
                lon: object.get("lon").and_then(finite_f64),
                tags,
            }),
            Some(kind @ ("way" | "relation")) => RawFeature::Area(AreaRecord {
                kind: if kind == "way" {
                    AreaKind::Way
                } else {
                    AreaKind::Relation
                },
                id,
                center: object.get("center").and_then(decode_center),
                tags,
            }),
            _ => RawFeature::Malformed,
        }
    }

    /// The representative coordinate: a node's own position or an area's
    /// centroid.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            RawFeature::Point(record) => match (record.lat, record.lon) {
                (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
                _ => None,
            },
            RawFeature::Area(record) => record.center,
            RawFeature::Malformed => None,
        }
    }

    #[must_use]
    pub fn tags(&self) -> Option<&Tags> {
        match self {
            RawFeature::Point(record) => Some(&record.tags),
            RawFeature::Area(record) => Some(&record.tags),
            RawFeature::Malformed => None,
        }
    }
}

/// Decode the `elements` array of a provider response. A body without one
/// yields no features.
#[must_use]
pub fn decode_elements(body: &Value) -> Vec<RawFeature> {
    body.get("elements")
        .and_then(Value::as_array)
        .map(|elements| elements.iter().map(RawFeature::from_value).collect())
        .unwrap_or_default()
}

fn finite_f64(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn decode_center(value: &Value) -> Option<GeoPoint> {
    let lat = value.get("lat").and_then(finite_f64)?;
    let lon = value.get("lon").and_then(finite_f64)?;
    Some(GeoPoint::new(lat, lon))
}

// OSM tag values are always strings; anything else is dropped.
fn decode_tags(value: &Value) -> Tags {
    value
        .as_object()
        .map(|tags| {
            tags.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}
