//! External places provider adapter.
//!
//! Talks to a Google-Places-compatible Nearby Search API and normalizes its
//! results into [`placefeed_core::PlaceRecord`]s for the discovery engine.

pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::PlaceDetails;
