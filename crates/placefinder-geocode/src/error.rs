use thiserror::Error;

/// Errors returned by a geocoding provider.
///
/// None of these are fatal to a search: [`crate::GeoLookupCache`] folds them
/// into an absent result.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid coordinate '{value}' in {context}")]
    InvalidCoordinate { context: String, value: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
