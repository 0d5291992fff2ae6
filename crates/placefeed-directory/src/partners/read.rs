//! Read operations for the `partners` and `menu_items` tables.

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{MenuItemRow, PartnerRow};

const PARTNER_COLUMNS: &str = "p.id, p.public_id, p.slug, p.name, p.address, \
     p.latitude, p.longitude, p.phone, p.whatsapp, p.logo_url, p.photo_url, \
     p.rating, p.categories, p.schedule, p.external_place_id, \
     p.is_partner, p.has_menu, p.is_active, p.created_at, p.updated_at";

/// All rows flagged both partner and active, ordered by `id`.
///
/// Distance filtering happens in Rust after the fetch; the table is small
/// and the cut-off depends on the caller's location.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_active_partners(pool: &PgPool) -> Result<Vec<PartnerRow>, sqlx::Error> {
    sqlx::query_as::<_, PartnerRow>(&format!(
        "SELECT {PARTNER_COLUMNS} \
         FROM partners p \
         WHERE p.is_partner = TRUE \
           AND p.is_active = TRUE \
         ORDER BY p.id"
    ))
    .fetch_all(pool)
    .await
}

/// Find a partner by navigation key: slug, public id or linked external
/// place id, in that order of precedence.
///
/// Inactive partners are still returned so a stale link resolves to a
/// record instead of a dead end.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_partner_by_key(
    pool: &PgPool,
    key: &str,
) -> Result<Option<PartnerRow>, sqlx::Error> {
    let public_id = Uuid::parse_str(key).ok();
    sqlx::query_as::<_, PartnerRow>(&format!(
        "SELECT {PARTNER_COLUMNS} \
         FROM partners p \
         WHERE p.slug = $1 \
            OR p.public_id = $2 \
            OR p.external_place_id = $1 \
         ORDER BY (p.slug = $1) DESC NULLS LAST, \
                  (p.public_id = $2) DESC NULLS LAST \
         LIMIT 1"
    ))
    .bind(key)
    .bind(public_id)
    .fetch_optional(pool)
    .await
}

/// Available menu items of one partner, ordered by `position` then `id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_available_menu_items(
    pool: &PgPool,
    partner_id: i64,
) -> Result<Vec<MenuItemRow>, sqlx::Error> {
    sqlx::query_as::<_, MenuItemRow>(
        "SELECT id, partner_id, name, description, price, category, \
                photo_url, is_available, position \
         FROM menu_items \
         WHERE partner_id = $1 \
           AND is_available = TRUE \
         ORDER BY position, id",
    )
    .bind(partner_id)
    .fetch_all(pool)
    .await
}
