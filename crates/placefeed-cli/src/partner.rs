//! `partner`: one partner record and its available menu.

use anyhow::Context;
use placefeed_core::AppConfig;
use placefeed_directory::{DirectoryDbError, PgPartnerDirectory};

use crate::output;

/// Look up a partner by navigation key and print it with its menu.
///
/// # Errors
///
/// Returns an error if the database is unreachable or no partner matches.
pub(crate) async fn run_partner(config: &AppConfig, key: &str, json: bool) -> anyhow::Result<()> {
    let pool = placefeed_directory::connect_pool_from_config(config)
        .await
        .context("partner lookups need the partner directory database")?;
    let directory = PgPartnerDirectory::new(pool);

    let (partner, menu) = match directory.partner_with_menu(key).await {
        Ok(found) => found,
        Err(DirectoryDbError::NotFound) => anyhow::bail!("no partner found for '{key}'"),
        Err(e) => return Err(e.into()),
    };

    if json {
        output::print_partner_json(&partner, &menu)?;
    } else {
        output::print_partner(&partner, &menu);
    }
    Ok(())
}
