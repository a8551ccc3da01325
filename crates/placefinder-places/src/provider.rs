//! The feature-query collaborator and its result cache.

use std::future::Future;
use std::time::Duration;

use placefinder_geocode::TtlCache;

use crate::error::PlacesError;
use crate::query::QuerySpec;
use crate::types::RawFeature;

/// A map-data provider answering spatial feature queries.
pub trait FeatureProvider: Send + Sync {
    /// Run a query string and return every element in provider order.
    fn query(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RawFeature>, PlacesError>> + Send;
}

/// A [`FeatureProvider`] behind a TTL cache keyed by the exact query text.
///
/// Provider failures are logged and yield an empty feature list for that
/// call only; they are never cached.
pub struct FeatureSource<P> {
    provider: P,
    cache: TtlCache<String, Vec<RawFeature>>,
}

impl<P: FeatureProvider> FeatureSource<P> {
    pub fn new(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn fetch(&self, spec: &QuerySpec) -> Vec<RawFeature> {
        let query = spec.to_query_string();
        let provider = &self.provider;
        let text = query.as_str();

        let fetched = self
            .cache
            .get_or_try_compute(query.clone(), || async move {
                tracing::debug!(query = text, "feature cache miss");
                provider.query(text).await
            })
            .await;

        match fetched {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!(
                    amenity = %spec.amenity,
                    radius_m = spec.radius_m,
                    error = %err,
                    "feature query failed, treating as empty"
                );
                Vec::new()
            }
        }
    }
}
