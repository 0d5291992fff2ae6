//! Place and partner records shared by adapters and the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geo::Coord;
use crate::schedule::WeeklySchedule;

/// A discovered location, partner or not.
///
/// `place_id` is the only dedup key. `slug` exists only on partner records
/// and is preferred over `place_id` for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: Coord,
    pub rating: Option<f64>,
    pub photo_url: Option<String>,
    pub phone: Option<String>,
    /// Filled in by the engine; adapters for the external provider leave it empty.
    pub distance_km: Option<f64>,
    /// `None` means unknown and must never be read as closed.
    pub is_open: Option<bool>,
    pub is_partner: bool,
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<PartnerProfile>,
}

impl PlaceRecord {
    #[must_use]
    pub fn new(
        place_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: Coord,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            address: address.into(),
            location,
            rating: None,
            photo_url: None,
            phone: None,
            distance_km: None,
            is_open: None,
            is_partner: false,
            slug: None,
            partner: None,
        }
    }

    /// Key used to open the record's detail view: the slug when set,
    /// otherwise the place id.
    #[must_use]
    pub fn navigation_key(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.place_id)
    }

    /// Link to the place on the public maps search page.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
            self.location.lat, self.location.lng, self.place_id
        )
    }

    /// Fold a partner's curated data into this record.
    ///
    /// The partner's schedule-derived `is_open` wins when it has one; contact
    /// and media fields only fill gaps.
    pub fn absorb_partner(&mut self, partner: Partner) {
        let Partner { record, profile } = partner;
        self.is_partner = true;
        if record.slug.is_some() {
            self.slug = record.slug;
        }
        if record.is_open.is_some() {
            self.is_open = record.is_open;
        }
        if self.phone.is_none() {
            self.phone = record.phone;
        }
        if self.photo_url.is_none() {
            self.photo_url = record.photo_url;
        }
        if self.rating.is_none() {
            self.rating = record.rating;
        }
        if self.distance_km.is_none() {
            self.distance_km = record.distance_km;
        }
        self.partner = Some(profile);
    }
}

/// Curated data only the internal directory has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerProfile {
    pub whatsapp: Option<String>,
    pub logo: Option<String>,
    pub categories: BTreeSet<String>,
    pub schedule: Option<WeeklySchedule>,
    pub has_menu: bool,
}

/// A directory record: the place fields plus the curated profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub record: PlaceRecord,
    pub profile: PartnerProfile,
}

impl Partner {
    /// Flatten into a feed record tagged as a partner.
    #[must_use]
    pub fn into_record(self) -> PlaceRecord {
        let Partner { mut record, profile } = self;
        record.is_partner = true;
        record.partner = Some(profile);
        record
    }
}

/// One page from the external provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub records: Vec<PlaceRecord>,
    /// The provider signalled a continuation token.
    pub has_more_pages: bool,
}
