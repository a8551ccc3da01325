mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use placefinder_core::{TravelMode, AMENITIES, SUGGESTED_DENY_LIST};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placefinder")]
#[command(about = "Find nearby places from OpenStreetMap data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for an amenity around an address
    Search(SearchArgs),
    /// List the known amenity types
    Amenities,
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// OpenStreetMap amenity tag value (see `placefinder amenities`)
    #[arg(long, default_value = "cafe")]
    amenity: String,
    /// Street number and name of the starting address
    #[arg(long, default_value = "1912 Pike Place")]
    street: Option<String>,
    #[arg(long, default_value = "Seattle")]
    city: String,
    #[arg(long, default_value = "WA")]
    state: String,
    /// Search radius in kilometres (0-100)
    #[arg(long, default_value_t = 1.0)]
    radius_km: f64,
    /// Exclude places whose name contains this text; repeatable.
    /// Pass `--exclude ""` to exclude nothing.
    #[arg(long = "exclude", value_name = "NAME", default_values = ["Starbucks", "Dunkin"])]
    exclude: Vec<String>,
    /// `walking` or `driving`, used for directions links
    #[arg(long, default_value = "walking")]
    travel_mode: TravelMode,
    /// Maximum number of results (1-1000)
    #[arg(long, default_value_t = 200)]
    max_results: usize,
    /// Reverse geocode places that have no address tags (slow)
    #[arg(long)]
    reverse_geocode: bool,
    /// Also write the result table as CSV to this path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
    /// CSV text encoding: `utf-8` or `utf-8-sig`
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `--help` must work even when the environment is invalid.
    let cli = Cli::parse();

    // Loads `.env` too.
    let config = placefinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run(&config, args).await?,
        Commands::Amenities => {
            println!("{:<14}{:<14}ICON", "AMENITY", "LABEL");
            for amenity in AMENITIES {
                println!("{:<14}{:<14}{}", amenity.key, amenity.label(), amenity.icon);
            }
            println!();
            println!("Commonly excluded: {}", SUGGESTED_DENY_LIST.join(", "));
        }
    }

    Ok(())
}
