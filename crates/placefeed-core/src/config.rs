use std::str::FromStr;

use crate::app_config::{AppConfig, EngineConfig, Environment};
use crate::ConfigError;

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DEFAULT_USER_AGENT: &str = "placefeed/0.1 (nearby-discovery)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let env = parse_environment(&or_default("PLACEFEED_ENV", "development"))?;
    let log_level = or_default("PLACEFEED_LOG_LEVEL", "info");
    let database_url = optional("DATABASE_URL");
    let places_api_key = optional("PLACES_API_KEY");

    let places_base_url = or_default("PLACEFEED_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let places_request_timeout_secs =
        parse_var::<u64, _>(&lookup, "PLACEFEED_PLACES_REQUEST_TIMEOUT_SECS", "10")?;
    let places_user_agent = or_default("PLACEFEED_PLACES_USER_AGENT", DEFAULT_USER_AGENT);
    let places_max_retries = parse_var::<u32, _>(&lookup, "PLACEFEED_PLACES_MAX_RETRIES", "2")?;
    let places_retry_backoff_base_ms =
        parse_var::<u64, _>(&lookup, "PLACEFEED_PLACES_RETRY_BACKOFF_BASE_MS", "250")?;

    let db_max_connections = parse_var::<u32, _>(&lookup, "PLACEFEED_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_var::<u32, _>(&lookup, "PLACEFEED_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs =
        parse_var::<u64, _>(&lookup, "PLACEFEED_DB_ACQUIRE_TIMEOUT_SECS", "5")?;

    let default_category = or_default("PLACEFEED_DEFAULT_CATEGORY", "restaurant");
    let default_keyword = match lookup("PLACEFEED_DEFAULT_KEYWORD") {
        Ok(raw) if raw.trim().is_empty() => None,
        Ok(raw) => Some(raw.trim().to_string()),
        Err(_) => Some("delivery".to_string()),
    };

    let engine = EngineConfig {
        initial_radius_m: parse_var(&lookup, "PLACEFEED_INITIAL_RADIUS_METERS", "2000")?,
        max_radius_m: parse_var(&lookup, "PLACEFEED_MAX_RADIUS_METERS", "15000")?,
        radius_increment_m: parse_var(&lookup, "PLACEFEED_RADIUS_INCREMENT_METERS", "3000")?,
        partner_fetch_timeout_ms: parse_var(&lookup, "PLACEFEED_PARTNER_FETCH_TIMEOUT_MS", "3000")?,
        near_threshold_km: parse_var(&lookup, "PLACEFEED_NEAR_THRESHOLD_KM", "3")?,
        full_page_threshold: parse_var(&lookup, "PLACEFEED_FULL_PAGE_THRESHOLD", "20")?,
        max_partner_distance_km: parse_var(&lookup, "PLACEFEED_MAX_PARTNER_DISTANCE_KM", "50")?,
        partners_filter_composes: parse_var(&lookup, "PLACEFEED_PARTNERS_FILTER_COMPOSES", "false")?,
    };
    engine.validate()?;

    Ok(AppConfig {
        env,
        log_level,
        database_url,
        places_api_key,
        places_base_url,
        places_request_timeout_secs,
        places_user_agent,
        places_max_retries,
        places_retry_backoff_base_ms,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        default_category,
        default_keyword,
        engine,
    })
}

fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEFEED_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
