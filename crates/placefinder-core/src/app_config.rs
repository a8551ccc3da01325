use crate::options::RadiusPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the Nominatim geocoding service.
    pub nominatim_url: String,
    /// Overpass API interpreter endpoint.
    pub overpass_url: String,
    /// Identifying `User-Agent`; required by the Nominatim usage policy.
    pub user_agent: String,
    /// Upper bound on any single collaborator request.
    pub request_timeout_secs: u64,
    /// Lifetime of geocoding and feature-query cache entries.
    pub cache_ttl_secs: u64,
    /// Feature query asks for `max_results * overfetch_multiplier` elements.
    pub overfetch_multiplier: usize,
    pub radius_policy: RadiusPolicy,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
