//! `search`: build a feed around a location and print a view of it.

use std::sync::Arc;

use async_trait::async_trait;
use placefeed_core::{
    AppConfig, Coord, DirectoryError, FixedLocation, JsonFileLocation, LocationSource, Partner,
    PartnerDirectory, PlaceSearch,
};
use placefeed_directory::PgPartnerDirectory;
use placefeed_engine::{DiscoveryEngine, ExpandOutcome, SearchQuery, ViewFilter};

use crate::output;
use crate::SearchArgs;

/// Directory stand-in when no database is configured or reachable.
struct NoPartners;

#[async_trait]
impl PartnerDirectory for NoPartners {
    async fn list_partners(
        &self,
        _center: Coord,
        _max_distance_km: f64,
    ) -> Result<Vec<Partner>, DirectoryError> {
        Ok(Vec::new())
    }
}

/// Run one discovery session and print the filtered result.
///
/// # Errors
///
/// Returns an error if no location or API key is available, or if the
/// initial provider search fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    args: &SearchArgs,
    json: bool,
) -> anyhow::Result<()> {
    let search: Arc<dyn PlaceSearch> = Arc::new(crate::details::places_client(config)?);
    let directory = partner_directory(config);
    let location = location_source(args)?;
    let engine = DiscoveryEngine::new(search, directory, location, config.engine.clone());

    let query = build_query(config, args);
    let session = engine.start_session(&query).await?;

    for _ in 0..args.expand {
        match session.expand().await {
            ExpandOutcome::Expanded { radius_m, added } => {
                tracing::info!(radius_m, added, "expanded search radius");
            }
            ExpandOutcome::Failed(err) => {
                eprintln!("could not load more places: {err}");
                break;
            }
            ExpandOutcome::Exhausted | ExpandOutcome::Ignored => break,
        }
    }

    let filter = ViewFilter {
        text: args.text.clone(),
        open_only: args.open,
        near_only: args.near,
        partners_only: args.partners,
    };
    let records = session.project(&filter);
    let feed = session.snapshot();

    if json {
        output::print_feed_json(&feed, &records)?;
    } else {
        output::print_feed_table(&feed, &records);
    }
    Ok(())
}

pub(crate) fn build_query(config: &AppConfig, args: &SearchArgs) -> SearchQuery {
    SearchQuery::new(
        args.category
            .clone()
            .unwrap_or_else(|| config.default_category.clone()),
        args.keyword.clone().or_else(|| config.default_keyword.clone()),
    )
}

fn location_source(args: &SearchArgs) -> anyhow::Result<Arc<dyn LocationSource>> {
    match (args.lat, args.lng, &args.location_file) {
        (Some(lat), Some(lng), _) => Ok(Arc::new(FixedLocation(Coord::new(lat, lng)))),
        (_, _, Some(path)) => Ok(Arc::new(JsonFileLocation::new(path.clone()))),
        _ => anyhow::bail!("no location: pass --lat and --lng, or --location-file"),
    }
}

/// The Postgres directory, or no partners when no database is configured.
///
/// The pool connects lazily so that an unreachable host is only hit inside
/// the partner listing, under the engine's partner budget.
pub(crate) fn partner_directory(config: &AppConfig) -> Arc<dyn PartnerDirectory> {
    if config.database_url.is_none() {
        tracing::info!("DATABASE_URL not set, searching without partners");
        return Arc::new(NoPartners);
    }
    match placefeed_directory::connect_pool_lazy_from_config(config) {
        Ok(pool) => Arc::new(PgPartnerDirectory::new(pool)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "invalid partner database settings, searching without partners"
            );
            Arc::new(NoPartners)
        }
    }
}
