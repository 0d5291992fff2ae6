//! Nearby place discovery.
//!
//! [`DiscoveryEngine`] builds the first page of a feed by racing the partner
//! directory against a latency budget while the provider search runs, then
//! hands the feed to a [`DiscoverySession`] that grows it one radius step at
//! a time and projects filtered views of it.

mod engine;
mod error;
mod feed;
pub mod race;
mod session;
mod view;

pub use engine::{DiscoveryEngine, SearchQuery};
pub use error::DiscoveryError;
pub use feed::FeedState;
pub use session::{DiscoverySession, ExpandOutcome};
pub use view::{project, ViewFilter};
