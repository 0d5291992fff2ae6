//! A live discovery session: the feed plus its expansion controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use placefeed_core::{EngineConfig, PlaceRecord, PlaceSearch, SearchError};

use crate::engine::SearchQuery;
use crate::feed::FeedState;
use crate::view::{project, ViewFilter};

/// Result of one [`DiscoverySession::expand`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Another expansion was already running; this call did nothing.
    Ignored,
    /// The radius ceiling was reached or a previous expansion failed.
    Exhausted,
    Expanded { radius_m: u32, added: usize },
    /// The provider search failed. Existing records are untouched and no
    /// further expansion will be attempted.
    Failed(SearchError),
}

/// Owns one [`FeedState`] and serializes writes to it.
///
/// The feed sits behind a mutex that is never held across an await, so
/// readers can project while an expansion is waiting on the provider.
pub struct DiscoverySession {
    search: Arc<dyn PlaceSearch>,
    query: SearchQuery,
    config: EngineConfig,
    feed: Mutex<FeedState>,
}

impl std::fmt::Debug for DiscoverySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoverySession")
            .field("query", &self.query)
            .field("feed", &*self.lock())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when dropped, including on cancellation.
struct InFlightGuard<'a> {
    feed: &'a Mutex<FeedState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock_feed(self.feed).set_in_flight(false);
    }
}

fn lock_feed(feed: &Mutex<FeedState>) -> MutexGuard<'_, FeedState> {
    // Merges never leave the id set and records out of step across a panic.
    feed.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DiscoverySession {
    pub(crate) fn new(
        search: Arc<dyn PlaceSearch>,
        query: SearchQuery,
        config: EngineConfig,
        feed: FeedState,
    ) -> Self {
        Self {
            search,
            query,
            config,
            feed: Mutex::new(feed),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        lock_feed(&self.feed)
    }

    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// A copy of the current feed.
    #[must_use]
    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.lock().has_more()
    }

    /// Filtered, distance-ordered view of the current feed.
    #[must_use]
    pub fn project(&self, filter: &ViewFilter) -> Vec<PlaceRecord> {
        project(self.lock().records(), filter, &self.config)
    }

    /// Widen the search radius by one step and merge the new places.
    ///
    /// Calls made while another expansion is in flight are ignored, not
    /// queued. The provider is asked for the full new radius and only ids
    /// not yet in the feed are kept.
    pub async fn expand(&self) -> ExpandOutcome {
        let (center, from_radius, radius_m) = {
            let mut feed = self.lock();
            if feed.expansion_in_flight() {
                return ExpandOutcome::Ignored;
            }
            if !feed.has_more() {
                return ExpandOutcome::Exhausted;
            }
            let current = feed.current_radius_m();
            let next = current
                .saturating_add(self.config.radius_increment_m)
                .min(self.config.max_radius_m);
            if next <= current {
                feed.set_has_more(false);
                return ExpandOutcome::Exhausted;
            }
            feed.set_in_flight(true);
            (feed.center(), current, next)
        };
        let _in_flight = InFlightGuard { feed: &self.feed };

        let result = self
            .search
            .search_nearby(
                center,
                radius_m,
                &self.query.category,
                self.query.keyword.as_deref(),
            )
            .await;

        let mut feed = self.lock();
        match result {
            Ok(page) => {
                let returned = page.records.len();
                let added = feed.merge_new(page.records);
                feed.fill_distances();
                feed.sort_by_distance();
                feed.set_radius(radius_m);
                feed.set_has_more(
                    radius_m < self.config.max_radius_m
                        && returned >= self.config.full_page_threshold,
                );
                tracing::debug!(
                    from_radius,
                    radius_m,
                    returned,
                    added,
                    has_more = feed.has_more(),
                    "feed expanded"
                );
                ExpandOutcome::Expanded { radius_m, added }
            }
            Err(err) => {
                feed.set_has_more(false);
                tracing::warn!(
                    from_radius,
                    radius_m,
                    error = %err,
                    "expansion search failed, stopping expansion"
                );
                ExpandOutcome::Failed(err)
            }
        }
    }
}
