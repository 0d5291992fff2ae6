//! [`PartnerDirectory`] implementation over the Postgres pool.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use placefeed_core::{Coord, DirectoryError, Partner, PartnerDirectory};
use sqlx::PgPool;

use crate::partners::{
    get_partner_by_key, list_active_partners, list_available_menu_items, partner_from_lookup,
    partner_from_row, MenuItemRow,
};
use crate::DirectoryDbError;

/// Partner directory backed by the `partners` table.
///
/// Open states are evaluated against the local wall clock at query time.
#[derive(Debug, Clone)]
pub struct PgPartnerDirectory {
    pool: PgPool,
}

impl PgPartnerDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Active partners within `max_distance_km` of `center` at time `now`,
    /// nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDbError::Sqlx`] if the query fails.
    pub async fn partners_near(
        &self,
        center: Coord,
        max_distance_km: f64,
        now: NaiveDateTime,
    ) -> Result<Vec<Partner>, DirectoryDbError> {
        let rows = list_active_partners(&self.pool).await?;
        let fetched = rows.len();
        let mut partners: Vec<Partner> = rows
            .into_iter()
            .filter_map(|row| partner_from_row(row, center, max_distance_km, now))
            .collect();
        partners.sort_by(|a, b| {
            let da = a.record.distance_km.unwrap_or(f64::MAX);
            let db = b.record.distance_km.unwrap_or(f64::MAX);
            da.total_cmp(&db)
        });
        tracing::debug!(
            %center,
            max_distance_km,
            fetched,
            listed = partners.len(),
            "partner listing complete"
        );
        Ok(partners)
    }

    /// Resolve a navigation key (slug, public id or linked external id) to a
    /// partner and its available menu.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDbError::NotFound`] when no partner matches, or
    /// [`DirectoryDbError::Sqlx`] if a query fails.
    pub async fn partner_with_menu(
        &self,
        key: &str,
    ) -> Result<(Partner, Vec<MenuItemRow>), DirectoryDbError> {
        let row = get_partner_by_key(&self.pool, key)
            .await?
            .ok_or(DirectoryDbError::NotFound)?;
        let menu = list_available_menu_items(&self.pool, row.id).await?;
        Ok((partner_from_lookup(row, Local::now().naive_local()), menu))
    }
}

#[async_trait]
impl PartnerDirectory for PgPartnerDirectory {
    async fn list_partners(
        &self,
        center: Coord,
        max_distance_km: f64,
    ) -> Result<Vec<Partner>, DirectoryError> {
        self.partners_near(center, max_distance_km, Local::now().naive_local())
            .await
            .map_err(|e| DirectoryError::StoreUnavailable(e.to_string()))
    }
}
