use crate::app_config::{AppConfig, Environment};
use crate::options::RadiusPolicy;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an env-var lookup function, so parsing can be
/// tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PLACEFINDER_ENV", "development"))?;
    let log_level = or_default("PLACEFINDER_LOG_LEVEL", "info");

    let nominatim_url = or_default(
        "PLACEFINDER_NOMINATIM_URL",
        "https://nominatim.openstreetmap.org/",
    );
    let overpass_url = or_default(
        "PLACEFINDER_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let user_agent = or_default("PLACEFINDER_USER_AGENT", "placefinder/0.1 (place-search)");
    if user_agent.trim().is_empty() {
        return Err(invalid(
            "PLACEFINDER_USER_AGENT",
            "must not be empty".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("PLACEFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PLACEFINDER_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let cache_ttl_secs = parse_u64("PLACEFINDER_CACHE_TTL_SECS", "3600")?;
    let overfetch_multiplier = parse_usize("PLACEFINDER_OVERFETCH_MULTIPLIER", "10")?;
    if overfetch_multiplier == 0 {
        return Err(invalid(
            "PLACEFINDER_OVERFETCH_MULTIPLIER",
            "must be at least 1".to_string(),
        ));
    }
    let radius_policy = or_default("PLACEFINDER_RADIUS_POLICY", "strict")
        .parse::<RadiusPolicy>()
        .map_err(|e| invalid("PLACEFINDER_RADIUS_POLICY", e.to_string()))?;
    let max_retries = parse_u32("PLACEFINDER_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("PLACEFINDER_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        env,
        log_level,
        nominatim_url,
        overpass_url,
        user_agent,
        request_timeout_secs,
        cache_ttl_secs,
        overfetch_multiplier,
        radius_policy,
        max_retries,
        retry_backoff_base_ms,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
