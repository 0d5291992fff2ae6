//! In-memory adapters for engine tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use placefeed_core::{
    Coord, DirectoryError, EngineConfig, FixedLocation, LocationError, LocationSource, Partner,
    PartnerDirectory, PartnerProfile, PlaceRecord, PlaceSearch, SearchError, SearchPage,
};
use placefeed_engine::DiscoveryEngine;

pub const CENTER: Coord = Coord::new(-27.3445, -65.592);

/// A place `offset_km` (roughly) north of [`CENTER`].
pub fn place(id: &str, offset_km: f64) -> PlaceRecord {
    PlaceRecord::new(
        id,
        format!("Place {id}"),
        "Calle Sarmiento 100",
        Coord::new(CENTER.lat + offset_km / 111.2, CENTER.lng),
    )
}

pub fn partner(id: &str, offset_km: f64) -> Partner {
    let mut record = place(id, offset_km);
    record.is_partner = true;
    record.slug = Some(format!("{id}-slug"));
    record.is_open = Some(true);
    record.distance_km = Some(placefeed_core::distance_km(CENTER, record.location));
    Partner {
        record,
        profile: PartnerProfile {
            whatsapp: Some("5493834000000".to_string()),
            has_menu: true,
            ..PartnerProfile::default()
        },
    }
}

/// `count` places with ids `{prefix}-{i}`, spread outwards from the center.
pub fn places(prefix: &str, count: usize) -> Vec<PlaceRecord> {
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let offset = 0.1 + i as f64 * 0.2;
            place(&format!("{prefix}-{i}"), offset)
        })
        .collect()
}

type Responder = dyn Fn(u32) -> Result<SearchPage, SearchError> + Send + Sync;

/// Provider fake answering by radius, with a call log.
pub struct FakeSearch {
    responder: Box<Responder>,
    delay: Duration,
    calls: AtomicUsize,
    radii: Mutex<Vec<u32>>,
}

impl FakeSearch {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(u32) -> Result<SearchPage, SearchError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            radii: Mutex::new(Vec::new()),
        }
    }

    /// Always returns `records`.
    pub fn fixed(records: Vec<PlaceRecord>) -> Self {
        Self::new(move |_| {
            Ok(SearchPage {
                records: records.clone(),
                has_more_pages: false,
            })
        })
    }

    /// A full page of fresh ids for every radius.
    pub fn full_pages(page_size: usize) -> Self {
        Self::new(move |radius| {
            Ok(SearchPage {
                records: places(&format!("r{radius}"), page_size),
                has_more_pages: true,
            })
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn radii(&self) -> Vec<u32> {
        self.radii.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for FakeSearch {
    async fn search_nearby(
        &self,
        _center: Coord,
        radius_m: u32,
        _category: &str,
        _keyword: Option<&str>,
    ) -> Result<SearchPage, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.radii.lock().unwrap().push(radius_m);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.responder)(radius_m)
    }
}

/// Directory fake with a fixed answer and optional latency.
pub struct FakeDirectory {
    result: Result<Vec<Partner>, DirectoryError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn ok(partners: Vec<Partner>) -> Self {
        Self {
            result: Ok(partners),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(DirectoryError::StoreUnavailable("connection refused".to_string())),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PartnerDirectory for FakeDirectory {
    async fn list_partners(
        &self,
        _center: Coord,
        _max_distance_km: f64,
    ) -> Result<Vec<Partner>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn read_location(&self) -> Result<Coord, LocationError> {
        Err(LocationError::Unavailable("permission denied".to_string()))
    }
}

pub fn engine(
    search: &Arc<FakeSearch>,
    directory: &Arc<FakeDirectory>,
    config: EngineConfig,
) -> DiscoveryEngine {
    DiscoveryEngine::new(
        Arc::clone(search) as Arc<dyn PlaceSearch>,
        Arc::clone(directory) as Arc<dyn PartnerDirectory>,
        Arc::new(FixedLocation(CENTER)),
        config,
    )
}
