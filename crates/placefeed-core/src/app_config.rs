use std::time::Duration;

use crate::ConfigError;

/// Largest radius the places provider accepts for a nearby search.
pub const MAX_PROVIDER_RADIUS_M: u32 = 50_000;

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

/// Tuning knobs consumed by the discovery engine.
///
/// `Default` yields the reference behaviour: a 2 km first page growing in
/// 3 km steps up to 15 km, a 3 s partner budget and a 20-record full page.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub initial_radius_m: u32,
    pub max_radius_m: u32,
    pub radius_increment_m: u32,
    pub partner_fetch_timeout_ms: u64,
    pub near_threshold_km: f64,
    /// A provider page with at least this many records counts as "full".
    pub full_page_threshold: usize,
    /// Cut-off handed to the partner directory.
    pub max_partner_distance_km: f64,
    /// When `true`, the partners-only view also honours text/open/near filters.
    pub partners_filter_composes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_radius_m: 2_000,
            max_radius_m: 15_000,
            radius_increment_m: 3_000,
            partner_fetch_timeout_ms: 3_000,
            near_threshold_km: 3.0,
            full_page_threshold: 20,
            max_partner_distance_km: 50.0,
            partners_filter_composes: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn partner_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.partner_fetch_timeout_ms)
    }

    /// Check cross-field constraints that single-value parsing cannot catch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] naming the offending variable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_radius_m == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_INITIAL_RADIUS_METERS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_radius_m < self.initial_radius_m {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_MAX_RADIUS_METERS".to_string(),
                reason: format!(
                    "{} is below the initial radius {}",
                    self.max_radius_m, self.initial_radius_m
                ),
            });
        }
        if self.max_radius_m > MAX_PROVIDER_RADIUS_M {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_MAX_RADIUS_METERS".to_string(),
                reason: format!(
                    "{} exceeds the provider limit of {MAX_PROVIDER_RADIUS_M}",
                    self.max_radius_m
                ),
            });
        }
        if self.radius_increment_m == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_RADIUS_INCREMENT_METERS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.near_threshold_km.is_finite() || self.near_threshold_km < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_NEAR_THRESHOLD_KM".to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
        if !self.max_partner_distance_km.is_finite() || self.max_partner_distance_km < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEFEED_MAX_PARTNER_DISTANCE_KM".to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub database_url: Option<String>,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub places_request_timeout_secs: u64,
    pub places_user_agent: String,
    pub places_max_retries: u32,
    pub places_retry_backoff_base_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub default_category: String,
    pub default_keyword: Option<String>,
    pub engine: EngineConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field(
                "places_request_timeout_secs",
                &self.places_request_timeout_secs,
            )
            .field("places_user_agent", &self.places_user_agent)
            .field("places_max_retries", &self.places_max_retries)
            .field(
                "places_retry_backoff_base_ms",
                &self.places_retry_backoff_base_ms,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("default_category", &self.default_category)
            .field("default_keyword", &self.default_keyword)
            .field("engine", &self.engine)
            .finish()
    }
}
