//! Forward and reverse geocoding behind a time-bounded memo cache.

pub mod cache;
pub mod error;
pub mod geocoder;
pub mod lookup;
pub mod nominatim;

pub use cache::TtlCache;
pub use error::GeocodeError;
pub use geocoder::{GeocodeQuery, Geocoder};
pub use lookup::{GeoLookupCache, Lookup, DEFAULT_TTL};
pub use nominatim::NominatimClient;
