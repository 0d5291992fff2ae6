use placefeed_core::SearchError;
use thiserror::Error;

/// Errors returned by the places provider client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success `"status"` in its envelope.
    #[error("places provider returned {status}: {message}")]
    Status { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request was rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PlacesError {
    /// Provider statuses that no amount of retrying will fix.
    pub(crate) fn is_rejection(&self) -> bool {
        match self {
            PlacesError::Status { status, .. } => {
                matches!(status.as_str(), "INVALID_REQUEST" | "REQUEST_DENIED")
            }
            PlacesError::InvalidRequest(_) | PlacesError::InvalidBaseUrl { .. } => true,
            PlacesError::Http(e) => e.status().is_some_and(|s| s.is_client_error()),
            PlacesError::Deserialize { .. } => false,
        }
    }
}

impl From<PlacesError> for SearchError {
    fn from(err: PlacesError) -> Self {
        if err.is_rejection() {
            SearchError::InvalidRequest(err.to_string())
        } else {
            SearchError::ProviderUnavailable(err.to_string())
        }
    }
}
