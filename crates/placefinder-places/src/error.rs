use thiserror::Error;

/// Errors from the map-data (feature query) provider.
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by feature provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Whole-search failures. Per-record problems never surface here.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "Unable to find latitude and longitude coordinates for physical address \"{address}\", please try a different search."
    )]
    AddressUnresolvable { address: String },

    #[error("invalid search options: {0}")]
    InvalidOptions(#[from] placefinder_core::CoreError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported CSV encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while flushing CSV: {0}")]
    Io(#[from] std::io::Error),
}
