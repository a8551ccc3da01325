//! Admission, distance annotation, and ordering of extracted places.
//!
//! Admission runs in provider order and stops at the result cap, so the
//! caller can stop extracting (and reverse geocoding) once [`PlaceFilter`]
//! reports [`Admission::Full`]. Distances are only computed for accepted
//! places.

use std::collections::BTreeSet;

use placefinder_core::{GeoPoint, Place, RadiusPolicy};
use serde::Serialize;

/// Why a place did not make it into the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Missing a name or a coordinate.
    Inadmissible,
    /// The name contains a deny-list term.
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected(Rejection),
    /// The cap was already reached; the place was not evaluated.
    Full,
}

/// Incremental admission filter with a hard result cap.
#[derive(Debug)]
pub struct PlaceFilter<'a> {
    deny_list: &'a BTreeSet<String>,
    max_results: usize,
    accepted: Vec<Place>,
}

impl<'a> PlaceFilter<'a> {
    #[must_use]
    pub fn new(deny_list: &'a BTreeSet<String>, max_results: usize) -> Self {
        Self {
            deny_list,
            max_results,
            accepted: Vec::with_capacity(max_results.min(64)),
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.accepted.len() >= self.max_results
    }

    pub fn admit(&mut self, place: Place) -> Admission {
        if self.is_full() {
            return Admission::Full;
        }
        if !place.is_admissible() {
            return Admission::Rejected(Rejection::Inadmissible);
        }
        if place.is_denied(self.deny_list) {
            return Admission::Rejected(Rejection::Denied);
        }
        self.accepted.push(place);
        Admission::Accepted
    }

    #[must_use]
    pub fn accepted_len(&self) -> usize {
        self.accepted.len()
    }

    #[must_use]
    pub fn into_accepted(self) -> Vec<Place> {
        self.accepted
    }
}

/// Ranked search results, nearest first.
///
/// Every entry is admissible and carries a `distance_km` rounded to two
/// decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    places: Vec<Place>,
}

impl ResultTable {
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Drop entries farther than `radius_km` under [`RadiusPolicy::Strict`].
    /// A no-op under [`RadiusPolicy::Lenient`].
    #[must_use]
    pub fn within_radius(mut self, radius_km: f64, policy: RadiusPolicy) -> Self {
        if policy == RadiusPolicy::Strict {
            let before = self.places.len();
            self.places
                .retain(|place| place.distance_km.is_some_and(|d| d <= radius_km));
            let dropped = before - self.places.len();
            if dropped > 0 {
                tracing::debug!(dropped, radius_km, "dropped places outside search radius");
            }
        }
        self
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

/// Round to two decimal places, halves to even (`0.125` becomes `0.12`).
#[must_use]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round_ties_even() / 100.0
}

/// Annotate each place with its rounded distance from `home` and sort
/// ascending. Ties keep their incoming order.
#[must_use]
pub fn rank(accepted: Vec<Place>, home: GeoPoint) -> ResultTable {
    let mut places: Vec<Place> = accepted
        .into_iter()
        .filter_map(|mut place| {
            let point = place.point?;
            place.distance_km = Some(round_km(home.distance_km(&point)));
            Some(place)
        })
        .collect();

    places.sort_by(|a, b| {
        a.distance_km
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
    });

    ResultTable { places }
}

/// Admit `places` in order until `max_results` are accepted, then rank the
/// accepted set by distance from `home`. Places after the cap are never
/// inspected.
pub fn filter_and_rank<I>(
    places: I,
    deny_list: &BTreeSet<String>,
    max_results: usize,
    home: GeoPoint,
) -> ResultTable
where
    I: IntoIterator<Item = Place>,
{
    let mut filter = PlaceFilter::new(deny_list, max_results);
    for place in places {
        if filter.admit(place) == Admission::Full {
            break;
        }
    }
    rank(filter.into_accepted(), home)
}
