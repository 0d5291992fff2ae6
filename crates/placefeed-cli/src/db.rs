//! `db`: partner directory maintenance.

use placefeed_core::AppConfig;

pub(crate) async fn run_db_ping(config: &AppConfig) -> anyhow::Result<()> {
    let pool = placefeed_directory::connect_pool_from_config(config).await?;
    placefeed_directory::ping(&pool).await?;
    println!("database ok");
    Ok(())
}

pub(crate) async fn run_db_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = placefeed_directory::connect_pool_from_config(config).await?;
    let applied = placefeed_directory::run_migrations(&pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}
