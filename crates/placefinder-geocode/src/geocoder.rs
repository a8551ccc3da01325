use std::fmt;
use std::future::Future;

use placefinder_core::{GeoPoint, PhysicalAddress};

use crate::error::GeocodeError;

/// Input to a forward geocode: free text or a structured address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeocodeQuery {
    Text(String),
    Structured(PhysicalAddress),
}

impl From<&str> for GeocodeQuery {
    fn from(text: &str) -> Self {
        GeocodeQuery::Text(text.to_owned())
    }
}

impl From<String> for GeocodeQuery {
    fn from(text: String) -> Self {
        GeocodeQuery::Text(text)
    }
}

impl From<PhysicalAddress> for GeocodeQuery {
    fn from(address: PhysicalAddress) -> Self {
        GeocodeQuery::Structured(address)
    }
}

impl From<&PhysicalAddress> for GeocodeQuery {
    fn from(address: &PhysicalAddress) -> Self {
        GeocodeQuery::Structured(address.clone())
    }
}

impl fmt::Display for GeocodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeQuery::Text(text) => f.write_str(text),
            GeocodeQuery::Structured(address) => write!(f, "{address}"),
        }
    }
}

/// A geocoding service.
///
/// `Ok(None)` means the provider answered but had no match; `Err` means the
/// provider could not be asked or did not answer sensibly.
pub trait Geocoder: Send + Sync {
    fn forward(
        &self,
        query: &GeocodeQuery,
    ) -> impl Future<Output = Result<Option<GeoPoint>, GeocodeError>> + Send;

    fn reverse(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}
