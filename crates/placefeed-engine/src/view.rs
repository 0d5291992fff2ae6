//! Read-only projections of a feed for display.

use placefeed_core::{EngineConfig, PlaceRecord};

use crate::feed::sort_by_distance;

/// What the user asked to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the name or address. Blank matches all.
    pub text: String,
    /// Keep only places known to be open; unknown counts as not open.
    pub open_only: bool,
    /// Keep only places within the configured near threshold.
    pub near_only: bool,
    pub partners_only: bool,
}

impl ViewFilter {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Project `records` through `filter`, nearest first.
///
/// With `partners_filter_composes` off, the partners-only view ignores the
/// other filters and returns the partner records in feed order.
#[must_use]
pub fn project(
    records: &[PlaceRecord],
    filter: &ViewFilter,
    config: &EngineConfig,
) -> Vec<PlaceRecord> {
    if filter.partners_only && !config.partners_filter_composes {
        return records.iter().filter(|r| r.is_partner).cloned().collect();
    }

    let needle = filter.text.trim().to_lowercase();
    let mut out: Vec<PlaceRecord> = records
        .iter()
        .filter(|r| !filter.partners_only || r.is_partner)
        .filter(|r| needle.is_empty() || matches_text(r, &needle))
        .filter(|r| !filter.open_only || r.is_open == Some(true))
        .filter(|r| {
            !filter.near_only
                || r.distance_km
                    .is_some_and(|d| d <= config.near_threshold_km)
        })
        .cloned()
        .collect();
    sort_by_distance(&mut out);
    out
}

fn matches_text(record: &PlaceRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle) || record.address.to_lowercase().contains(needle)
}
