//! Row types for the `partners` and `menu_items` tables.

use chrono::{DateTime, Utc};
use placefeed_core::Coord;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A row from the `partners` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartnerRow {
    pub id: i64,
    pub public_id: Uuid,
    pub slug: Option<String>,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub logo_url: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Option<f64>,
    pub categories: Vec<String>,
    /// Weekday name → `{opensAt, closesAt}`; see [`placefeed_core::WeeklySchedule`].
    pub schedule: Option<serde_json::Value>,
    /// Id of the same business at the external places provider, if linked.
    pub external_place_id: Option<String>,
    pub is_partner: bool,
    pub has_menu: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnerRow {
    /// Coordinates, when both are present.
    #[must_use]
    pub fn coord(&self) -> Option<Coord> {
        Some(Coord::new(self.latitude?, self.longitude?))
    }

    /// Feed identity: the linked external id so the record deduplicates
    /// against provider results, otherwise the directory's public id.
    #[must_use]
    pub fn place_id(&self) -> String {
        self.external_place_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| self.public_id.to_string(), str::to_string)
    }
}

/// A row from the `menu_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItemRow {
    pub id: i64,
    pub partner_id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub photo_url: Option<String>,
    pub is_available: bool,
    pub position: i32,
}
