//! Amenity catalogue offered by the search form.
//!
//! Keys are OpenStreetMap `amenity` tag values. See
//! <https://wiki.openstreetmap.org/wiki/Key:amenity>.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amenity {
    pub key: &'static str,
    /// Font Awesome v4 icon name used for map markers.
    pub icon: &'static str,
}

pub const AMENITIES: &[Amenity] = &[
    Amenity { key: "bar", icon: "beer" },
    Amenity { key: "biergarten", icon: "beer" },
    Amenity { key: "cafe", icon: "coffee" },
    Amenity { key: "fast_food", icon: "cutlery" },
    Amenity { key: "food_court", icon: "cutlery" },
    Amenity { key: "ice_cream", icon: "diamond" },
    Amenity { key: "pub", icon: "beer" },
    Amenity { key: "restaurant", icon: "cutlery" },
];

/// Chains commonly excluded from results.
pub const SUGGESTED_DENY_LIST: &[&str] = &["Starbucks", "Dunkin", "Tim Hortons"];

const FALLBACK_ICON: &str = "map-marker";

impl Amenity {
    #[must_use]
    pub fn find(key: &str) -> Option<Amenity> {
        AMENITIES.iter().copied().find(|a| a.key == key)
    }

    /// Display label: underscores become spaces, each word title-cased
    /// (`"fast_food"` → `"Fast Food"`).
    #[must_use]
    pub fn label(&self) -> String {
        title_case(self.key)
    }
}

/// Marker icon for any amenity key, including ones outside the catalogue.
#[must_use]
pub fn icon_for(key: &str) -> &'static str {
    Amenity::find(key).map_or(FALLBACK_ICON, |a| a.icon)
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
