//! First-page aggregation behaviour with in-memory adapters.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{engine, partner, place, places, FakeDirectory, FakeSearch, NoLocation, CENTER};
use placefeed_core::{EngineConfig, PartnerDirectory, PlaceSearch, SearchError};
use placefeed_engine::{DiscoveryEngine, DiscoveryError, SearchQuery};

#[tokio::test(start_paused = true)]
async fn partner_sharing_an_id_is_merged_not_duplicated() {
    let mut external = places("ext", 4);
    external.push(place("X", 0.5));
    let search = Arc::new(FakeSearch::fixed(external));
    let directory = Arc::new(FakeDirectory::ok(vec![partner("X", 0.5), partner("P", 1.2)]));

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    assert_eq!(feed.len(), 6);
    assert_eq!(feed.seen_ids().len(), 6);
    assert!(feed.is_consistent());

    let x = feed
        .records()
        .iter()
        .find(|r| r.place_id == "X")
        .expect("X present");
    assert!(x.is_partner);
    assert_eq!(x.slug.as_deref(), Some("X-slug"));
    assert_eq!(x.navigation_key(), "X-slug");
    assert!(x.partner.as_ref().is_some_and(|p| p.has_menu));
    assert_eq!(feed.partner_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn every_record_has_a_distance_and_order_is_ascending() {
    let search = Arc::new(FakeSearch::fixed(vec![
        place("far", 4.0),
        place("near", 0.3),
        place("mid", 1.7),
    ]));
    let directory = Arc::new(FakeDirectory::ok(vec![partner("p", 1.0)]));

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    let distances: Vec<f64> = feed
        .records()
        .iter()
        .map(|r| r.distance_km.expect("distance populated"))
        .collect();
    assert!(distances.iter().all(|d| *d >= 0.0));
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
    let ids: Vec<&str> = feed.records().iter().map(|r| r.place_id.as_str()).collect();
    assert_eq!(ids, vec!["near", "p", "mid", "far"]);
}

#[tokio::test(start_paused = true)]
async fn partner_schedule_overrides_provider_open_state() {
    let mut closed = place("X", 0.5);
    closed.is_open = Some(false);
    let unknown = place("U", 0.8);
    let search = Arc::new(FakeSearch::fixed(vec![closed, unknown]));
    let directory = Arc::new(FakeDirectory::ok(vec![partner("X", 0.5)]));

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    let by_id = |id: &str| feed.records().iter().find(|r| r.place_id == id).cloned();
    assert_eq!(by_id("X").and_then(|r| r.is_open), Some(true));
    assert_eq!(by_id("U").expect("U").is_open, None, "unknown stays unknown");
}

#[tokio::test(start_paused = true)]
async fn late_partners_are_dropped_without_error() {
    let search = Arc::new(FakeSearch::fixed(places("ext", 3)));
    let directory = Arc::new(
        FakeDirectory::ok(vec![partner("P", 0.2)]).with_delay(Duration::from_millis(5_000)),
    );

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("timeout is not an error");

    assert_eq!(feed.len(), 3);
    assert_eq!(feed.partner_count(), 0);
    assert_eq!(directory.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn partner_budget_runs_alongside_the_search() {
    // Search takes 2 s and partners 2.5 s: both fit the 3 s budget only if the
    // listing started together with the search.
    let search = Arc::new(
        FakeSearch::fixed(places("ext", 2)).with_delay(Duration::from_millis(2_000)),
    );
    let directory = Arc::new(
        FakeDirectory::ok(vec![partner("P", 0.2)]).with_delay(Duration::from_millis(2_500)),
    );

    let started = tokio::time::Instant::now();
    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    assert_eq!(feed.partner_count(), 1);
    assert!(started.elapsed() < Duration::from_millis(3_000));
}

#[tokio::test(start_paused = true)]
async fn failing_directory_is_absorbed() {
    let search = Arc::new(FakeSearch::fixed(places("ext", 3)));
    let directory = Arc::new(FakeDirectory::failing());

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("directory failure is not an error");

    assert_eq!(feed.len(), 3);
    assert_eq!(feed.partner_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn search_failure_is_fatal() {
    let search = Arc::new(FakeSearch::new(|_| {
        Err(SearchError::ProviderUnavailable("503".to_string()))
    }));
    let directory = Arc::new(FakeDirectory::ok(vec![partner("P", 0.2)]));

    let err = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect_err("search failure surfaces");

    assert!(matches!(
        err,
        DiscoveryError::Search(SearchError::ProviderUnavailable(_))
    ));
    assert!(err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn missing_location_is_fatal_and_skips_both_sources() {
    let search = Arc::new(FakeSearch::fixed(places("ext", 3)));
    let directory = Arc::new(FakeDirectory::ok(Vec::new()));
    let engine = DiscoveryEngine::new(
        Arc::clone(&search) as Arc<dyn PlaceSearch>,
        Arc::clone(&directory) as Arc<dyn PartnerDirectory>,
        Arc::new(NoLocation),
        EngineConfig::default(),
    );

    let err = engine
        .start_session(&SearchQuery::default())
        .await
        .expect_err("no location");

    assert!(matches!(err, DiscoveryError::LocationUnavailable(_)));
    assert_eq!(search.calls(), 0);
    assert_eq!(directory.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn full_first_page_enables_expansion() {
    let config = EngineConfig::default();
    let search = Arc::new(FakeSearch::full_pages(config.full_page_threshold));
    let directory = Arc::new(FakeDirectory::ok(Vec::new()));

    let feed = engine(&search, &directory, config.clone())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    assert!(feed.has_more());
    assert_eq!(feed.current_radius_m(), config.initial_radius_m);
    assert_eq!(search.radii(), vec![config.initial_radius_m]);
}

#[tokio::test(start_paused = true)]
async fn short_first_page_disables_expansion() {
    let search = Arc::new(FakeSearch::fixed(places("ext", 5)));
    let directory = Arc::new(FakeDirectory::ok(Vec::new()));

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    assert!(!feed.has_more());
}

#[tokio::test(start_paused = true)]
async fn duplicate_provider_ids_are_collapsed() {
    let search = Arc::new(FakeSearch::fixed(vec![
        place("a", 0.2),
        place("a", 0.2),
        place("b", 0.4),
    ]));
    let directory = Arc::new(FakeDirectory::ok(Vec::new()));

    let feed = engine(&search, &directory, EngineConfig::default())
        .aggregate(CENTER, &SearchQuery::default())
        .await
        .expect("aggregate");

    assert_eq!(feed.len(), 2);
    assert!(feed.is_consistent());
}
