//! End-to-end search: home resolution, feature query, extraction, ranking.

use placefinder_core::{GeoPoint, Options, PhysicalAddress, Place, PlaceAddress, RadiusPolicy};
use placefinder_geocode::{GeoLookupCache, Geocoder, Lookup};

use crate::error::SearchError;
use crate::extract::extract_place;
use crate::provider::{FeatureProvider, FeatureSource};
use crate::query::{build_query, DEFAULT_OVERFETCH_MULTIPLIER};
use crate::rank::{rank, Admission, PlaceFilter, Rejection, ResultTable};

/// Long-lived collaborators shared by every search in the process.
pub struct SearchContext<G, F> {
    pub geo: GeoLookupCache<G>,
    pub features: FeatureSource<F>,
    pub overfetch_multiplier: usize,
    pub radius_policy: RadiusPolicy,
}

impl<G: Geocoder, F: FeatureProvider> SearchContext<G, F> {
    pub fn new(geo: GeoLookupCache<G>, features: FeatureSource<F>) -> Self {
        Self {
            geo,
            features,
            overfetch_multiplier: DEFAULT_OVERFETCH_MULTIPLIER,
            radius_policy: RadiusPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_overfetch_multiplier(mut self, multiplier: usize) -> Self {
        self.overfetch_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_radius_policy(mut self, policy: RadiusPolicy) -> Self {
        self.radius_policy = policy;
        self
    }
}

/// Geocode the user's address into the home [`Place`].
///
/// # Errors
///
/// Returns [`SearchError::AddressUnresolvable`] when the geocoder has no
/// match or could not be reached.
pub async fn resolve_home<G: Geocoder, F>(
    ctx: &SearchContext<G, F>,
    address: &PhysicalAddress,
) -> Result<Place, SearchError> {
    match ctx.geo.forward(address).await {
        Lookup::Found(point) => Ok(Place {
            name: Some("Home".to_owned()),
            address: Some(PlaceAddress::Structured(address.clone())),
            website: None,
            point: Some(point),
            distance_km: None,
        }),
        Lookup::NotFound | Lookup::ServiceError(_) => Err(SearchError::AddressUnresolvable {
            address: address.flatten(),
        }),
    }
}

/// Run one search.
///
/// When `home` is `None` the structured address in `options` is geocoded
/// first; nothing is queried if that fails. Features are extracted lazily
/// and extraction stops once `max_results` places are accepted. An empty
/// table means no matches.
///
/// # Errors
///
/// Returns [`SearchError::InvalidOptions`] for out-of-range options and
/// [`SearchError::AddressUnresolvable`] when the home address cannot be
/// geocoded. Provider failures degrade to an empty or partial result.
pub async fn run_search<G, F>(
    ctx: &SearchContext<G, F>,
    options: &Options,
    home: Option<GeoPoint>,
) -> Result<ResultTable, SearchError>
where
    G: Geocoder,
    F: FeatureProvider,
{
    options.validate()?;

    let home = match home {
        Some(point) => point,
        None => resolve_home(ctx, &options.physical_address)
            .await?
            .point
            .ok_or_else(|| SearchError::AddressUnresolvable {
                address: options.physical_address.flatten(),
            })?,
    };

    let spec = build_query(
        &options.amenity,
        options.radius_meters(),
        home,
        options.max_results,
        ctx.overfetch_multiplier,
    );
    tracing::debug!(
        amenity = %spec.amenity,
        radius_m = spec.radius_m,
        limit = spec.limit,
        "querying features"
    );
    let features = ctx.features.fetch(&spec).await;

    let mut filter = PlaceFilter::new(&options.deny_list, options.max_results);
    let (mut inadmissible, mut denied) = (0usize, 0usize);
    for feature in &features {
        if filter.is_full() {
            break;
        }
        let place = extract_place(feature, options.attempt_reverse_geocoding, &ctx.geo).await;
        match filter.admit(place) {
            Admission::Rejected(Rejection::Inadmissible) => inadmissible += 1,
            Admission::Rejected(Rejection::Denied) => denied += 1,
            Admission::Accepted | Admission::Full => {}
        }
    }
    let accepted = filter.into_accepted();

    let table = rank(accepted, home).within_radius(options.radius_km, ctx.radius_policy);

    tracing::info!(
        amenity = %options.amenity,
        features = features.len(),
        inadmissible,
        denied,
        results = table.len(),
        "search complete"
    );
    Ok(table)
}
