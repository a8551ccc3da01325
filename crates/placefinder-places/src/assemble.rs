//! Final, display-ready result table.

use placefinder_core::{destination_for, directions_url, PlaceAddress, TravelMode};
use serde::Serialize;

use crate::rank::ResultTable;

/// Column keys in display order, excluding the leading index column.
pub const COLUMNS: [&str; 6] = [
    "name",
    "address",
    "website",
    "latitude",
    "longitude",
    "distance (km)",
];

/// One row of the result table. `index` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub index: usize,
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "distance (km)")]
    pub distance_km: f64,
    /// Google Maps directions from the user's location to this place.
    #[serde(skip_serializing)]
    pub directions_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Number the ranked places from 1 and attach column labels and directions
/// links. Order is preserved.
#[must_use]
pub fn assemble(ranked: &ResultTable, travel_mode: TravelMode) -> DisplayTable {
    let rows = ranked
        .iter()
        .filter_map(|place| {
            let point = place.point?;
            let name = place.name.clone()?;
            let directions = destination_for(place)
                .map(|destination| directions_url(&destination, travel_mode))
                .unwrap_or_default();
            Some((name, point, place, directions))
        })
        .enumerate()
        .map(|(i, (name, point, place, directions))| DisplayRow {
            index: i + 1,
            name,
            address: place.address.as_ref().map(PlaceAddress::flatten),
            website: place.website.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
            distance_km: place.distance_km.unwrap_or_default(),
            directions_url: directions,
        })
        .collect();

    DisplayTable {
        columns: COLUMNS.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use placefinder_core::{GeoPoint, Place};

    use super::*;
    use crate::rank::rank;

    fn ranked() -> ResultTable {
        rank(
            vec![
                Place {
                    name: Some("Far".to_owned()),
                    point: Some(GeoPoint::new(47.6080, -122.3400)),
                    ..Place::default()
                },
                Place {
                    name: Some("Near".to_owned()),
                    address: Some(PlaceAddress::Text("1st Ave".to_owned())),
                    website: Some("https://near.example".to_owned()),
                    point: Some(GeoPoint::new(47.6101, -122.3428)),
                    ..Place::default()
                },
            ],
            GeoPoint::new(47.6097, -122.3422),
        )
    }

    #[test]
    fn rows_are_indexed_from_one_in_rank_order() {
        let table = assemble(&ranked(), TravelMode::Walking);
        assert_eq!(table.columns, COLUMNS);
        let indexed: Vec<(usize, &str)> = table
            .rows
            .iter()
            .map(|r| (r.index, r.name.as_str()))
            .collect();
        assert_eq!(indexed, [(1, "Near"), (2, "Far")]);
        assert_eq!(table.rows[0].distance_km, 0.06);
        assert_eq!(table.rows[0].address.as_deref(), Some("1st Ave"));
        assert_eq!(table.rows[1].address, None);
    }

    #[test]
    fn directions_use_address_or_coordinates() {
        let table = assemble(&ranked(), TravelMode::Driving);
        assert!(table.rows[0]
            .directions_url
            .contains("destination=Near%2C%201st%20Ave"));
        assert!(table.rows[0].directions_url.ends_with("travelmode=driving"));
        assert!(table.rows[1]
            .directions_url
            .contains("destination=47%2E608%2C%2D122%2E34"));
    }

    #[test]
    fn empty_ranking_gives_empty_table_with_columns() {
        let table = assemble(&ResultTable::default(), TravelMode::Walking);
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 6);
    }
}
