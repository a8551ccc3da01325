//! Memoized forward and reverse geocoding.

use std::time::Duration;

use placefinder_core::GeoPoint;

use crate::cache::TtlCache;
use crate::geocoder::{GeocodeQuery, Geocoder};

/// One hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Outcome of a cached lookup.
///
/// `ServiceError` is only ever returned by the call that observed the
/// failure. The cache records it as `NotFound`, so repeats within the TTL
/// see `NotFound` without contacting the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    ServiceError(String),
}

impl<T> Lookup<T> {
    #[must_use]
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::ServiceError(_) => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::ServiceError(_) => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// A [`Geocoder`] wrapped in two TTL caches, one per direction.
///
/// Built once per process and shared by reference across searches.
pub struct GeoLookupCache<G> {
    geocoder: G,
    forward: TtlCache<GeocodeQuery, Option<GeoPoint>>,
    reverse: TtlCache<GeoPoint, Option<String>>,
}

impl<G: Geocoder> GeoLookupCache<G> {
    pub fn new(geocoder: G, ttl: Duration) -> Self {
        Self {
            geocoder,
            forward: TtlCache::new(ttl),
            reverse: TtlCache::new(ttl),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Coordinates for an address or free-text query.
    pub async fn forward(&self, query: impl Into<GeocodeQuery>) -> Lookup<GeoPoint> {
        let query = query.into();
        let mut failure: Option<String> = None;
        let failure_slot = &mut failure;
        let geocoder = &self.geocoder;
        let key = &query;

        let cached = self
            .forward
            .get_or_compute(query.clone(), || async move {
                match geocoder.forward(key).await {
                    Ok(point) => point,
                    Err(err) => {
                        tracing::warn!(query = %key, error = %err, "forward geocoding failed");
                        *failure_slot = Some(err.to_string());
                        None
                    }
                }
            })
            .await;

        resolve(cached, failure)
    }

    /// Address text for a coordinate.
    pub async fn reverse(&self, point: GeoPoint) -> Lookup<String> {
        let mut failure: Option<String> = None;
        let failure_slot = &mut failure;
        let geocoder = &self.geocoder;

        let cached = self
            .reverse
            .get_or_compute(point, || async move {
                match geocoder.reverse(point).await {
                    Ok(address) => address,
                    Err(err) => {
                        tracing::warn!(%point, error = %err, "reverse geocoding failed");
                        *failure_slot = Some(err.to_string());
                        None
                    }
                }
            })
            .await;

        resolve(cached, failure)
    }
}

fn resolve<T>(cached: Option<T>, failure: Option<String>) -> Lookup<T> {
    match (cached, failure) {
        (Some(value), _) => Lookup::Found(value),
        (None, Some(message)) => Lookup::ServiceError(message),
        (None, None) => Lookup::NotFound,
    }
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
