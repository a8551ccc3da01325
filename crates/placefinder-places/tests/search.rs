//! End-to-end search scenarios over in-memory collaborators.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use placefinder_core::{GeoPoint, Options, PhysicalAddress, RadiusPolicy, TravelMode};
use placefinder_geocode::{GeoLookupCache, GeocodeError, GeocodeQuery, Geocoder};
use placefinder_places::{
    assemble, run_search, to_csv_bytes, FeatureProvider, FeatureSource, PlacesError, RawFeature,
    ResultSummary, SearchContext, SearchError,
};
use serde_json::{json, Value};

const HOME: GeoPoint = GeoPoint {
    latitude: 47.6097,
    longitude: -122.3422,
};

struct FakeGeocoder {
    home: Option<GeoPoint>,
    forward_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

impl Geocoder for FakeGeocoder {
    async fn forward(&self, _query: &GeocodeQuery) -> Result<Option<GeoPoint>, GeocodeError> {
        self.forward_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.home)
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("near {point}")))
    }
}

struct FakeProvider {
    elements: Value,
    calls: AtomicUsize,
}

impl FeatureProvider for FakeProvider {
    async fn query(&self, _query: &str) -> Result<Vec<RawFeature>, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(placefinder_places::types::decode_elements(&self.elements))
    }
}

fn context(home: Option<GeoPoint>, elements: Value) -> SearchContext<FakeGeocoder, FakeProvider> {
    let ttl = Duration::from_secs(3600);
    SearchContext::new(
        GeoLookupCache::new(
            FakeGeocoder {
                home,
                forward_calls: AtomicUsize::new(0),
                reverse_calls: AtomicUsize::new(0),
            },
            ttl,
        ),
        FeatureSource::new(
            FakeProvider {
                elements,
                calls: AtomicUsize::new(0),
            },
            ttl,
        ),
    )
}

fn node(name: Option<&str>, lat: f64, lon: f64) -> Value {
    let mut tags = json!({"amenity": "cafe"});
    if let Some(name) = name {
        tags["name"] = json!(name);
    }
    json!({"type": "node", "lat": lat, "lon": lon, "tags": tags})
}

/// Eight cafes around Pike Place: two Starbucks, one unnamed, one way
/// without a center.
fn pike_place_cafes() -> Value {
    json!({"elements": [
        node(Some("Storyville Coffee"), 47.6105, -122.3410),
        node(Some("Starbucks Reserve"), 47.6080, -122.3400),
        node(Some("Ghost Alley Espresso"), 47.6120, -122.3450),
        node(None, 47.6150, -122.3380),
        node(Some("Starbucks Pike Place"), 47.6101, -122.3428),
        {
            "type": "way",
            "center": {"lat": 47.6060, "lon": -122.3440},
            "tags": {"amenity": "cafe", "name": "Le Panier"}
        },
        {"type": "way", "tags": {"amenity": "cafe", "name": "Market Hall"}},
        node(Some("Cafe Campagne"), 47.6080, -122.3400),
    ]})
}

fn pike_place_options() -> Options {
    Options {
        amenity: "cafe".to_owned(),
        physical_address: PhysicalAddress::new(Some("1912 Pike Place"), "Seattle", "WA"),
        radius_km: 1.0,
        deny_list: BTreeSet::from(["Starbucks".to_owned()]),
        travel_mode: TravelMode::Walking,
        max_results: 5,
        attempt_reverse_geocoding: false,
    }
}

fn names(table: &placefinder_places::ResultTable) -> Vec<&str> {
    table.iter().filter_map(|p| p.name.as_deref()).collect()
}

#[tokio::test]
async fn pike_place_scenario() {
    let ctx = context(Some(HOME), pike_place_cafes());
    let table = run_search(&ctx, &pike_place_options(), None)
        .await
        .expect("search should succeed");

    assert_eq!(
        names(&table),
        [
            "Storyville Coffee",
            "Cafe Campagne",
            "Ghost Alley Espresso",
            "Le Panier"
        ]
    );
    let distances: Vec<f64> = table.iter().filter_map(|p| p.distance_km).collect();
    assert_eq!(distances, [0.13, 0.25, 0.33, 0.43]);

    let display = assemble(&table, TravelMode::Walking);
    let indices: Vec<usize> = display.rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, [1, 2, 3, 4]);

    let summary = ResultSummary::from_table(&display);
    assert_eq!(summary.count, 4);
    assert_eq!(summary.nearest_km, Some(0.13));
    assert!((summary.median_km.unwrap() - 0.29).abs() < 1e-9);

    let csv = String::from_utf8(to_csv_bytes(&display, "utf-8").unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.lines().nth(1).unwrap().starts_with("1,Storyville Coffee,"));
}

#[tokio::test]
async fn results_satisfy_table_invariants() {
    let ctx = context(Some(HOME), pike_place_cafes());
    let options = pike_place_options();
    let table = run_search(&ctx, &options, None).await.unwrap();

    assert!(table.len() <= options.max_results);
    for place in &table {
        assert!(place.is_admissible());
        assert!(!place.is_denied(&options.deny_list));
        assert!(place.distance_km.is_some_and(|d| d >= 0.0));
    }
    for pair in table.places().windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[tokio::test]
async fn repeated_search_is_identical_and_cached() {
    let ctx = context(Some(HOME), pike_place_cafes());
    let options = pike_place_options();

    let first = run_search(&ctx, &options, None).await.unwrap();
    let second = run_search(&ctx, &options, None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.geo.geocoder().forward_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.features.provider().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn result_cap_stops_extraction_early() {
    let ctx = context(Some(HOME), pike_place_cafes());
    let options = Options {
        max_results: 2,
        attempt_reverse_geocoding: true,
        ..pike_place_options()
    };

    let table = run_search(&ctx, &options, None).await.unwrap();

    assert_eq!(names(&table), ["Storyville Coffee", "Ghost Alley Espresso"]);
    // Storyville, Starbucks Reserve, Ghost Alley; nothing after the cap.
    assert_eq!(ctx.geo.geocoder().reverse_calls.load(Ordering::SeqCst), 3);
    assert!(table
        .iter()
        .all(|p| p.flat_address().starts_with("near ")));
}

#[tokio::test]
async fn structured_address_is_not_reverse_geocoded() {
    let ctx = context(
        Some(HOME),
        json!({"elements": [{
            "type": "node",
            "lat": 47.6105,
            "lon": -122.3410,
            "tags": {
                "name": "Storyville Coffee",
                "addr:housenumber": "94",
                "addr:street": "Pike Street",
                "addr:city": "Seattle",
                "addr:state": "WA",
                "addr:postcode": "98101"
            }
        }]}),
    );
    let options = Options {
        attempt_reverse_geocoding: true,
        ..pike_place_options()
    };

    let table = run_search(&ctx, &options, None).await.unwrap();

    assert_eq!(
        table.places()[0].flat_address(),
        "94 Pike Street, Seattle, WA 98101"
    );
    assert_eq!(ctx.geo.geocoder().reverse_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_admissible_features_is_empty_not_error() {
    let ctx = context(
        Some(HOME),
        json!({"elements": [
            node(None, 47.6105, -122.3410),
            node(Some("Starbucks"), 47.6105, -122.3410),
            {"type": "relation", "tags": {"name": "Nowhere"}},
            "garbage"
        ]}),
    );

    let table = run_search(&ctx, &pike_place_options(), None).await.unwrap();
    assert!(table.is_empty());
}

#[tokio::test]
async fn strict_radius_drops_overshoot_lenient_keeps_it() {
    let elements = json!({"elements": [
        node(Some("Close"), 47.6105, -122.3410),
        node(Some("Overshoot"), 47.6200, -122.3300),
    ]});

    let strict = context(Some(HOME), elements.clone());
    let table = run_search(&strict, &pike_place_options(), None).await.unwrap();
    assert_eq!(names(&table), ["Close"]);

    let lenient = context(Some(HOME), elements).with_radius_policy(RadiusPolicy::Lenient);
    let table = run_search(&lenient, &pike_place_options(), None).await.unwrap();
    assert_eq!(names(&table), ["Close", "Overshoot"]);
}

#[tokio::test]
async fn unresolvable_home_is_reported_once() {
    let ctx = context(None, pike_place_cafes());
    let err = run_search(&ctx, &pike_place_options(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::AddressUnresolvable { ref address } if address == "1912 Pike Place, Seattle, WA"
    ));
    assert_eq!(ctx.features.provider().calls.load(Ordering::SeqCst), 0);
}
