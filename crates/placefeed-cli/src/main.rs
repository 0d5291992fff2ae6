mod db;
mod details;
mod output;
mod partner;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placefeed")]
#[command(about = "Discover nearby places that deliver, partners first-class")]
struct Cli {
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a nearby feed and print a filtered view of it
    Search(SearchArgs),
    /// Show a partner and its menu by slug, id or linked place id
    Partner {
        /// Navigation key of the partner
        key: String,
    },
    /// Show provider details for one place
    Details {
        /// Provider place id
        place_id: String,
    },
    /// Partner directory database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SearchArgs {
    /// Latitude of the search center
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Saved `{latitude, longitude}` reading to use instead of --lat/--lng
    #[arg(long, conflicts_with = "lat")]
    pub location_file: Option<PathBuf>,
    /// Provider place type (defaults to PLACEFEED_DEFAULT_CATEGORY)
    #[arg(long)]
    pub category: Option<String>,
    /// Provider keyword (defaults to PLACEFEED_DEFAULT_KEYWORD)
    #[arg(long)]
    pub keyword: Option<String>,
    /// Number of radius expansions to attempt after the first page
    #[arg(long, default_value = "0")]
    pub expand: u32,
    /// Keep places whose name or address contains this text
    #[arg(long, default_value = "")]
    pub text: String,
    /// Keep only places known to be open now
    #[arg(long)]
    pub open: bool,
    /// Keep only places within the near threshold
    #[arg(long)]
    pub near: bool,
    /// Show partners only
    #[arg(long)]
    pub partners: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = placefeed_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Search(args)) => search::run_search(&config, &args, cli.json).await?,
        Some(Commands::Partner { key }) => partner::run_partner(&config, &key, cli.json).await?,
        Some(Commands::Details { place_id }) => {
            details::run_details(&config, &place_id, cli.json).await?;
        }
        Some(Commands::Db { command }) => match command {
            DbCommands::Ping => db::run_db_ping(&config).await?,
            DbCommands::Migrate => db::run_db_migrate(&config).await?,
        },
        None => println!("nothing to do; try `placefeed search --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
