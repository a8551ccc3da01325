//! The `search` command: build collaborators from config, run one search,
//! print the summary and table, and optionally write the CSV download.

use anyhow::Context;
use placefinder_core::{icon_for, AppConfig, Options, PhysicalAddress};
use placefinder_geocode::{GeoLookupCache, NominatimClient};
use placefinder_places::{
    assemble, resolve_home, run_search, to_csv_bytes, DisplayTable, FeatureSource,
    OverpassClient, ResultSummary, SearchContext,
};

use crate::SearchArgs;

impl SearchArgs {
    pub(crate) fn to_options(&self) -> Options {
        Options {
            amenity: self.amenity.trim().to_owned(),
            physical_address: PhysicalAddress {
                street: self.street.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
            },
            radius_km: self.radius_km,
            deny_list: self.exclude.iter().cloned().collect(),
            travel_mode: self.travel_mode,
            max_results: self.max_results,
            attempt_reverse_geocoding: self.reverse_geocode,
        }
    }
}

fn build_context(
    config: &AppConfig,
) -> anyhow::Result<SearchContext<NominatimClient, OverpassClient>> {
    let ttl = std::time::Duration::from_secs(config.cache_ttl_secs);
    let geocoder = NominatimClient::with_base_url(
        &config.nominatim_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build geocoding client")?;
    let provider = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("failed to build Overpass client")?;

    Ok(
        SearchContext::new(GeoLookupCache::new(geocoder, ttl), FeatureSource::new(provider, ttl))
            .with_overfetch_multiplier(config.overfetch_multiplier)
            .with_radius_policy(config.radius_policy),
    )
}

/// Run one search from CLI arguments.
///
/// # Errors
///
/// Returns an error for invalid options, an unresolvable home address, or a
/// failed CSV write. An empty result prints "No matches found!" and succeeds.
pub(crate) async fn run(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let options = args.to_options();
    options.validate()?;
    let ctx = build_context(config)?;

    let home = resolve_home(&ctx, &options.physical_address).await?;
    let table = run_search(&ctx, &options, home.point).await?;

    if table.is_empty() {
        println!("No matches found!");
        return Ok(());
    }

    let display = assemble(&table, options.travel_mode);
    println!(
        "{} [{}] within {} km of {}",
        options.amenity,
        icon_for(&options.amenity),
        options.radius_km,
        home.flat_address()
    );
    print_summary(&ResultSummary::from_table(&display));
    println!();
    print_table(&display);

    if let Some(path) = &args.csv {
        let bytes = to_csv_bytes(&display, &args.encoding)?;
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        let rows = display.len();
        tracing::info!(path = %path.display(), rows, "wrote CSV");
    }

    Ok(())
}

fn print_summary(summary: &ResultSummary) {
    let km = |v: Option<f64>| v.map_or_else(|| "-".to_owned(), |d| format!("{d} km"));
    println!("Number of matches:              {}", summary.count);
    println!("Distance to nearest match:      {}", km(summary.nearest_km));
    println!("Median distance to all matches: {}", km(summary.median_km));
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}

fn print_table(display: &DisplayTable) {
    println!("{:<4}{:<32}{:<44}{:>9}  DIRECTIONS", "#", "NAME", "ADDRESS", "KM");
    for row in &display.rows {
        println!(
            "{:<4}{:<32}{:<44}{:>9.2}  {}",
            row.index,
            truncate(&row.name, 28),
            truncate(row.address.as_deref().unwrap_or("(no address available)"), 40),
            row.distance_km,
            row.directions_url
        );
    }
}
