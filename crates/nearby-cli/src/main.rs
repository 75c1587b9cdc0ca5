mod output;
mod search;

use clap::{ArgGroup, Args, Parser, Subcommand};
use nearby_places::CategoryKind;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Find restaurants and hotels near a location")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Restaurants near a zip code or coordinate
    Restaurants(SearchArgs),
    /// Hotels near a zip code or coordinate
    Hotels(SearchArgs),
}

/// Where to search and how wide.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("origin").required(true).args(["zip", "lat"])))]
pub(crate) struct SearchArgs {
    /// Zip / postal code to search around
    #[arg(long)]
    pub zip: Option<String>,

    /// Device latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Device longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Search radius in kilometres (defaults to NEARBY_SEARCH_RADIUS_KM)
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Maximum number of results (defaults to NEARBY_RESULT_LIMIT)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = nearby_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Restaurants(args) => {
            search::run_search_command(&config, CategoryKind::Restaurant, &args, cli.json).await
        }
        Commands::Hotels(args) => {
            search::run_search_command(&config, CategoryKind::Hotel, &args, cli.json).await
        }
    }
}
