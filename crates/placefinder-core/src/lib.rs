pub mod address;
pub mod amenity;
pub mod app_config;
pub mod config;
pub mod directions;
pub mod options;
pub mod place;

pub use address::{GeoPoint, PhysicalAddress, PlaceAddress};
pub use amenity::{icon_for, Amenity, AMENITIES, SUGGESTED_DENY_LIST};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directions::{destination_for, directions_url, GOOGLE_MAPS_URL_BASE};
pub use options::{Options, RadiusPolicy, TravelMode};
pub use place::Place;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid travel mode: {0}")]
    InvalidTravelMode(String),

    #[error("invalid radius policy: {0}")]
    InvalidRadiusPolicy(String),

    #[error("search radius {radius_km} km is outside 0.0..=100.0")]
    RadiusOutOfRange { radius_km: f64 },

    #[error("max results {max_results} is outside 1..=1000")]
    MaxResultsOutOfRange { max_results: usize },

    #[error("amenity must not be empty")]
    EmptyAmenity,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
