//! The feed owned by one discovery session.

use std::cmp::Ordering;
use std::collections::HashSet;

use placefeed_core::{distance_km, Coord, Partner, PlaceRecord};

/// Deduplicated, distance-ranked records for one location reading.
///
/// `seen_ids` always equals the set of `place_id`s in `records`; every
/// mutation goes through methods that keep the two in step.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    center: Coord,
    records: Vec<PlaceRecord>,
    seen_ids: HashSet<String>,
    current_radius_m: u32,
    expansion_in_flight: bool,
    has_more: bool,
}

impl FeedState {
    pub(crate) fn new(center: Coord, radius_m: u32) -> Self {
        Self {
            center,
            records: Vec::new(),
            seen_ids: HashSet::new(),
            current_radius_m: radius_m,
            expansion_in_flight: false,
            has_more: false,
        }
    }

    #[must_use]
    pub fn center(&self) -> Coord {
        self.center
    }

    /// Records in ascending distance order.
    #[must_use]
    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    #[must_use]
    pub fn seen_ids(&self) -> &HashSet<String> {
        &self.seen_ids
    }

    #[must_use]
    pub fn current_radius_m(&self) -> u32 {
        self.current_radius_m
    }

    #[must_use]
    pub fn expansion_in_flight(&self) -> bool {
        self.expansion_in_flight
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn partner_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_partner).count()
    }

    /// `true` when `seen_ids` mirrors the record ids exactly and no id repeats.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.seen_ids.len() == self.records.len()
            && self
                .records
                .iter()
                .all(|r| self.seen_ids.contains(&r.place_id))
    }

    pub(crate) fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    pub(crate) fn set_radius(&mut self, radius_m: u32) {
        self.current_radius_m = radius_m;
    }

    pub(crate) fn set_in_flight(&mut self, in_flight: bool) {
        self.expansion_in_flight = in_flight;
    }

    /// Append records whose id is unseen, discarding the rest. Returns how
    /// many were added.
    pub(crate) fn merge_new(&mut self, records: impl IntoIterator<Item = PlaceRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.seen_ids.insert(record.place_id.clone()) {
                self.records.push(record);
                added += 1;
            }
        }
        added
    }

    /// Fold a partner into the feed: augment the record with the same id, or
    /// insert it as a new partner record.
    pub(crate) fn merge_partner(&mut self, partner: Partner) {
        let id = partner.record.place_id.as_str();
        if self.seen_ids.contains(id) {
            if let Some(existing) = self.records.iter_mut().find(|r| r.place_id == id) {
                existing.absorb_partner(partner);
            }
        } else {
            self.seen_ids.insert(partner.record.place_id.clone());
            self.records.push(partner.into_record());
        }
    }

    /// Compute `distance_km` for records that do not carry one yet.
    pub(crate) fn fill_distances(&mut self) {
        let center = self.center;
        for record in self.records.iter_mut().filter(|r| r.distance_km.is_none()) {
            record.distance_km = Some(distance_km(center, record.location));
        }
    }

    pub(crate) fn sort_by_distance(&mut self) {
        sort_by_distance(&mut self.records);
    }
}

/// Stable ascending sort by distance; records without one go last.
pub(crate) fn sort_by_distance(records: &mut [PlaceRecord]) {
    records.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
