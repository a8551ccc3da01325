//! Overpass QL query construction.

use std::fmt;

use placefinder_core::GeoPoint;

/// Default over-fetch factor applied to `max_results`.
pub const DEFAULT_OVERFETCH_MULTIPLIER: usize = 10;

const ELEMENT_KINDS: [&str; 3] = ["node", "way", "relation"];

/// A spatial "features of type X around point P" request.
///
/// `limit` is the over-fetched element count passed to `out center`; the
/// caller truncates to the requested result count after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub amenity: String,
    pub radius_m: u32,
    pub center: GeoPoint,
    pub limit: usize,
}

impl QuerySpec {
    /// Render the query as Overpass QL.
    ///
    /// Ways and relations are requested with `out center` so that each one
    /// carries a centroid.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let around = format!(
            "around:{},{},{}",
            self.radius_m, self.center.latitude, self.center.longitude
        );
        let mut lines = vec!["[out:json];".to_owned(), "(".to_owned()];
        lines.extend(ELEMENT_KINDS.iter().map(|kind| {
            format!("    {kind}[\"amenity\"=\"{}\"]({around});", self.amenity)
        }));
        lines.push(");".to_owned());
        lines.push(format!("out center {};", self.limit));
        lines.join("\n")
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Build the provider query for `amenity` within `radius_m` metres of
/// `center`, asking for `max_results * overfetch_multiplier` elements.
///
/// A zero radius is passed through unchanged.
#[must_use]
pub fn build_query(
    amenity: &str,
    radius_m: u32,
    center: GeoPoint,
    max_results: usize,
    overfetch_multiplier: usize,
) -> QuerySpec {
    QuerySpec {
        amenity: amenity.to_owned(),
        radius_m,
        center,
        limit: max_results.saturating_mul(overfetch_multiplier),
    }
}
