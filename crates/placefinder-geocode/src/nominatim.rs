//! HTTP client for the Nominatim geocoding API.
//!
//! Uses the `jsonv2` output format. Forward lookups request a single result;
//! structured addresses use Nominatim's `street`/`city`/`state` parameters so
//! the service does not have to re-parse a flattened string.

use std::time::Duration;

use placefinder_core::GeoPoint;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::geocoder::{GeocodeQuery, Geocoder};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// One entry of a `/search` response. Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// `/reverse` answers either a place with `display_name` or
/// `{"error": "Unable to geocode"}` with HTTP 200.
#[derive(Debug, Deserialize)]
struct ReverseHit {
    display_name: Option<String>,
    error: Option<String>,
}

pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Client for the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Client for a self-hosted instance or a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so `join("search")` appends instead of replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "jsonv2");
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<serde_json::Value>().await?)
    }
}

fn search_params(query: &GeocodeQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", "1".to_string())];
    match query {
        GeocodeQuery::Text(text) => params.push(("q", text.clone())),
        GeocodeQuery::Structured(address) => {
            if let Some(street) = address.street.as_deref().filter(|s| !s.trim().is_empty()) {
                params.push(("street", street.to_owned()));
            }
            params.push(("city", address.city.clone()));
            params.push(("state", address.state.clone()));
        }
    }
    params
}

fn parse_coordinate(value: &str, context: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate {
            context: context.to_owned(),
            value: value.to_owned(),
        })
}

impl Geocoder for NominatimClient {
    async fn forward(&self, query: &GeocodeQuery) -> Result<Option<GeoPoint>, GeocodeError> {
        let url = self.endpoint("search", &search_params(query))?;
        let body = self.get_json(url).await?;
        let context = format!("search({query})");

        let hits: Vec<SearchHit> =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let Some(hit) = hits.into_iter().next() else {
            tracing::debug!(%query, "nominatim returned no match");
            return Ok(None);
        };
        let latitude = parse_coordinate(&hit.lat, &context)?;
        let longitude = parse_coordinate(&hit.lon, &context)?;
        Ok(Some(GeoPoint::new(latitude, longitude)))
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        let url = self.endpoint(
            "reverse",
            &[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
            ],
        )?;
        let body = self.get_json(url).await?;

        let hit: ReverseHit =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("reverse({point})"),
                source: e,
            })?;

        if let Some(reason) = hit.error {
            tracing::debug!(%point, %reason, "nominatim reverse lookup found nothing");
            return Ok(None);
        }
        Ok(hit.display_name.filter(|name| !name.trim().is_empty()))
    }
}
