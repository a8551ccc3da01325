use serde::{Deserialize, Serialize};

use crate::address::{GeoPoint, PlaceAddress};

/// A point of interest normalized from a map-provider record.
///
/// Every field is optional because provider records are partially populated.
/// Only admissible places (name and point present) are ever displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: Option<String>,
    pub address: Option<PlaceAddress>,
    pub website: Option<String>,
    pub point: Option<GeoPoint>,
    /// Kilometres from the search origin, rounded to two decimals.
    /// Unset until the place has been ranked.
    pub distance_km: Option<f64>,
}

impl Place {
    /// The flattened address, or an empty string when none is known.
    #[must_use]
    pub fn flat_address(&self) -> String {
        self.address
            .as_ref()
            .map(PlaceAddress::flatten)
            .unwrap_or_default()
    }

    /// `true` when the place has both a name and a coordinate.
    #[must_use]
    pub fn is_admissible(&self) -> bool {
        self.name.is_some() && self.point.is_some()
    }

    /// `true` when any deny-list term appears, case-insensitively, as a
    /// substring of the name. Blank terms never match.
    pub fn is_denied<I, S>(&self, deny_list: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        let name = name.to_lowercase();
        deny_list.into_iter().any(|term| {
            let term = term.as_ref().trim();
            !term.is_empty() && name.contains(&term.to_lowercase())
        })
    }
}
