use placefeed_core::{LocationError, SearchError};
use thiserror::Error;

/// Failures that end a discovery session before it produces a feed.
///
/// Partner directory problems and failed expansions are absorbed by the
/// engine and never appear here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("cannot start discovery without a location: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("initial place search failed: {0}")]
    Search(#[from] SearchError),
}

impl DiscoveryError {
    /// Both variants are transient from the user's point of view.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            DiscoveryError::LocationUnavailable(_) => true,
            DiscoveryError::Search(e) => matches!(e, SearchError::ProviderUnavailable(_)),
        }
    }
}
