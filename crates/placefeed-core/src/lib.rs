//! Shared domain types, pure geo/schedule functions, adapter ports and
//! configuration for the placefeed workspace.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod location;
pub mod place;
pub mod ports;
pub mod schedule;

use thiserror::Error;

pub use app_config::{AppConfig, EngineConfig, Environment, MAX_PROVIDER_RADIUS_M};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, haversine_km, round_km, Coord};
pub use location::{FixedLocation, JsonFileLocation};
pub use place::{Partner, PartnerProfile, PlaceRecord, SearchPage};
pub use ports::{
    DirectoryError, LocationError, LocationSource, PartnerDirectory, PlaceSearch, SearchError,
};
pub use schedule::{
    is_open_now, is_open_or_unscheduled, parse_weekday, ClockTime, OpeningHours, WeeklySchedule,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
