//! HTTP client for the Overpass API interpreter endpoint.
//!
//! The query is POSTed as the `data` form field; the response is the JSON
//! envelope described in [`crate::types`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::PlacesError;
use crate::provider::FeatureProvider;
use crate::retry::retry_with_backoff;
use crate::types::{decode_elements, RawFeature};

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Client for an Overpass interpreter.
///
/// Transient failures (429, 5xx, network errors) are retried with
/// exponential back-off up to `max_retries` additional attempts.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OverpassClient {
    /// Client for the public Overpass instance.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_endpoint(
            DEFAULT_ENDPOINT,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Client for a custom interpreter URL (a mirror, or a mock server in
    /// tests). Unlike a base URL, `endpoint` is used verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidEndpoint`] if `endpoint` does
    /// not parse.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| PlacesError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            max_retries,
            backoff_base_ms,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post_query(&self, query: &str) -> Result<Vec<RawFeature>, PlacesError> {
        let url = self.endpoint.to_string();
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query)])
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(0);
            return Err(PlacesError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("overpass response from {url}"),
                source: e,
            })?;

        if let Some(remark) = value.get("remark").and_then(serde_json::Value::as_str) {
            tracing::debug!(remark, "overpass returned a remark");
        }

        Ok(decode_elements(&value))
    }
}

impl FeatureProvider for OverpassClient {
    async fn query(&self, query: &str) -> Result<Vec<RawFeature>, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_query(query)
        })
        .await
    }
}
