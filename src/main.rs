//! Command line entry point for filmroute

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use filmroute::source::{GeoRecordSource, JsonRecordSource, LocationsListSource};
use filmroute::{
    Coordinate, FilmRouteConfig, GeoCache, GeoJsonSink, GeoRecord, MapSink, RoutePlan,
    RoutePlanner, RouteQuery,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Year the locations were filmed in
    year: i32,

    /// Reference latitude
    #[arg(allow_negative_numbers = true)]
    lat: f64,

    /// Reference longitude
    #[arg(allow_negative_numbers = true)]
    lng: f64,

    /// Dataset: a `.json` record list or an IMDb `locations.list`
    dataset: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of nearest locations to route through
    #[arg(short, long)]
    k: Option<usize>,

    /// Improve the greedy route with 2-opt
    #[arg(long)]
    two_opt: bool,

    /// Geocache used to resolve `locations.list` entries
    #[arg(long, value_name = "GEOCACHE")]
    geocache: Option<PathBuf>,

    /// GeoJSON map output path
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn load_records(dataset: &Path, geocache: &Path) -> Result<Vec<GeoRecord>> {
    let is_json = dataset
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        JsonRecordSource::new(dataset).records()
    } else {
        let cache = GeoCache::load(geocache)?;
        LocationsListSource::new(dataset, cache).records()
    };
    records.with_context(|| format!("Failed to load dataset {}", dataset.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = FilmRouteConfig::load_from_path(cli.config.clone())?;
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    if let Some(k) = cli.k {
        config.query.k = k;
    }
    if cli.two_opt {
        config.query.two_opt = true;
    }
    // command line overrides go through the same checks as the config file
    config.validate()?;

    filmroute::logging::init_logging(&config.logging)?;
    debug!("Configuration: {:?}", config);

    let reference = Coordinate::try_new(cli.lat, cli.lng)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let geocache = cli
        .geocache
        .unwrap_or_else(|| PathBuf::from(&config.output.geocache_path));
    let records = load_records(&cli.dataset, &geocache)?;

    let query = RouteQuery::new(cli.year, reference).with_k(config.query.k);
    let planner = RoutePlanner::new(config.query.route_builder());

    let route = match planner.plan(&records, &query)? {
        RoutePlan::Routed(route) => route,
        RoutePlan::NoMatchingYear { year } => {
            println!("No filming locations were recorded for {year}.");
            return Ok(());
        }
    };

    println!(
        "{} filming locations from {} ({:.1} km):",
        route.len(),
        reference.format_coordinates(),
        route.total_km
    );
    for (idx, (stop, leg)) in route.stops.iter().zip(&route.legs_km).enumerate() {
        println!(
            "  {:>2}. {} [{}] +{:.1} km",
            idx + 1,
            stop.title,
            stop.coordinate.format_coordinates(),
            leg
        );
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.map_path));
    let mut sink = GeoJsonSink::create(&output)?.pretty(true);
    sink.render(&route)?;
    println!("Map written to {}", output.display());

    Ok(())
}
