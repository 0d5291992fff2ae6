//! Narrow interfaces the engine consumes from its collaborators.

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::Coord;
use crate::place::{Partner, SearchPage};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("places provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("invalid places request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("partner directory unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("invalid location reading: {0}")]
    Invalid(String),
}

/// Bounded-radius nearby search against the external provider.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_nearby(
        &self,
        center: Coord,
        radius_m: u32,
        category: &str,
        keyword: Option<&str>,
    ) -> Result<SearchPage, SearchError>;
}

/// Active partners from the internal directory, no paging.
#[async_trait]
pub trait PartnerDirectory: Send + Sync {
    async fn list_partners(
        &self,
        center: Coord,
        max_distance_km: f64,
    ) -> Result<Vec<Partner>, DirectoryError>;
}

/// Single-shot reading of the user's position.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn read_location(&self) -> Result<Coord, LocationError>;
}
