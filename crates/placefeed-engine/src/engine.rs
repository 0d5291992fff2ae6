//! First-page aggregation of the provider search and the partner directory.

use std::sync::Arc;

use placefeed_core::{Coord, EngineConfig, LocationSource, PartnerDirectory, PlaceSearch};
use tokio::time::Instant;

use crate::error::DiscoveryError;
use crate::feed::FeedState;
use crate::race::{race_deadline, RaceOutcome};
use crate::session::DiscoverySession;

/// Category and keyword of one discovery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub category: String,
    pub keyword: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(category: impl Into<String>, keyword: Option<String>) -> Self {
        Self {
            category: category.into(),
            keyword: keyword.filter(|k| !k.trim().is_empty()),
        }
    }
}

impl Default for SearchQuery {
    /// Restaurants that deliver.
    fn default() -> Self {
        Self::new("restaurant", Some("delivery".to_string()))
    }
}

/// Combines the provider search and the partner directory into feeds.
#[derive(Clone)]
pub struct DiscoveryEngine {
    search: Arc<dyn PlaceSearch>,
    directory: Arc<dyn PartnerDirectory>,
    location: Arc<dyn LocationSource>,
    config: EngineConfig,
}

impl std::fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DiscoveryEngine {
    #[must_use]
    pub fn new(
        search: Arc<dyn PlaceSearch>,
        directory: Arc<dyn PartnerDirectory>,
        location: Arc<dyn LocationSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            search,
            directory,
            location,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read the user's location and build the first page of a new session.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::LocationUnavailable`] when no location can be read,
    /// [`DiscoveryError::Search`] when the initial provider search fails.
    pub async fn start_session(
        &self,
        query: &SearchQuery,
    ) -> Result<DiscoverySession, DiscoveryError> {
        let center = self.location.read_location().await?;
        let feed = self.aggregate(center, query).await?;
        Ok(DiscoverySession::new(
            Arc::clone(&self.search),
            query.clone(),
            self.config.clone(),
            feed,
        ))
    }

    /// Build the first page for `center`.
    ///
    /// The partner listing runs concurrently with the provider search, bounded
    /// by the partner budget. A late, failed or panicked listing leaves the feed
    /// without partner augmentation and is not an error. The provider result is
    /// always applied before any partner is merged.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Search`] when the provider search fails.
    pub async fn aggregate(
        &self,
        center: Coord,
        query: &SearchQuery,
    ) -> Result<FeedState, DiscoveryError> {
        let started = Instant::now();
        let budget = self.config.partner_fetch_timeout();
        let max_partner_km = self.config.max_partner_distance_km;
        let directory = Arc::clone(&self.directory);
        let partner_task = tokio::spawn(race_deadline(budget, async move {
            directory.list_partners(center, max_partner_km).await
        }));

        let radius_m = self.config.initial_radius_m;
        let page = match self
            .search
            .search_nearby(center, radius_m, &query.category, query.keyword.as_deref())
            .await
        {
            Ok(page) => page,
            Err(err) => {
                partner_task.abort();
                tracing::warn!(%center, radius_m, error = %err, "initial place search failed");
                return Err(err.into());
            }
        };

        let returned = page.records.len();
        let mut feed = FeedState::new(center, radius_m);
        let unique = feed.merge_new(page.records);
        feed.set_has_more(
            radius_m < self.config.max_radius_m && returned >= self.config.full_page_threshold,
        );

        let partners = match partner_task.await {
            Ok(RaceOutcome::Completed(partners)) => partners,
            Ok(RaceOutcome::Failed(err)) => {
                tracing::warn!(error = %err, "partner listing failed, continuing without partners");
                Vec::new()
            }
            Ok(RaceOutcome::Elapsed) => {
                tracing::warn!(
                    budget_ms = self.config.partner_fetch_timeout_ms,
                    "partner listing timed out, continuing without partners"
                );
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "partner listing task did not finish");
                Vec::new()
            }
        };
        let partner_count = partners.len();
        for partner in partners {
            feed.merge_partner(partner);
        }

        feed.fill_distances();
        feed.sort_by_distance();

        tracing::info!(
            %center,
            radius_m,
            returned,
            unique,
            partners = partner_count,
            total = feed.len(),
            has_more = feed.has_more(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "initial feed aggregated"
        );
        Ok(feed)
    }
}
