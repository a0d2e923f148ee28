//! # Moon Tracker Application Entry Point
//!
//! This binary crate resolves an observing site (coordinates, a city name, or
//! the configured default), computes the current lunar report for it and
//! prints the result as text or JSON.


use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use moon_clock_lib::config::Config;
use moon_clock_lib::gazetteer::{self, City};
use moon_clock_lib::{MoonReport, Observer};

/// Moon phase, illumination and today's moonrise/moonset for a site.
#[derive(Parser, Debug)]
#[command(name = "moon-tracker", version, about, long_about = None)]
struct Cli {
    /// Observer latitude in degrees, north positive
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Use the first city matching "name[, admin[, country]]"
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,

    /// List cities matching "name[, admin[, country]]" and exit
    #[arg(long)]
    search: Option<String>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Configuration file (defaults to ./moon-config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for messages written to stderr
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) -> Result<()> {
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    // Stdout is reserved for the report itself
    TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

fn load_cities(config: &Config) -> Result<Vec<City>> {
    let path = &config.gazetteer.cities_path;
    gazetteer::load_cities(path).with_context(|| format!("loading city list from {}", path))
}

fn validate(observer: Observer) -> Result<Observer> {
    if !(-90.0..=90.0).contains(&observer.latitude) {
        bail!("latitude {} is outside [-90, 90]", observer.latitude);
    }
    if !(-180.0..=180.0).contains(&observer.longitude) {
        bail!("longitude {} is outside [-180, 180]", observer.longitude);
    }
    Ok(observer)
}

/// Pick the observer from the command line, falling back to the config file.
fn resolve_observer(cli: &Cli, config: &Config) -> Result<Observer> {
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        return validate(Observer::new(lat, lon));
    }

    if let Some(query) = &cli.city {
        let cities = load_cities(config)?;
        let Some(city) = gazetteer::search(query, &cities, 1).into_iter().next() else {
            bail!("no city matches {:?}", query);
        };
        log::info!(
            "Using {} ({:.4}, {:.4})",
            city.label(),
            city.latitude,
            city.longitude
        );
        return validate(city.observer());
    }

    log::info!("Using configured observer: {}", config.observer.name);
    validate(config.observer.observer())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    log::debug!("Parsed arguments: {cli:?}");

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    if let Some(query) = &cli.search {
        let cities = load_cities(&config)?;
        for city in gazetteer::search(query, &cities, config.gazetteer.max_results) {
            println!(
                "{:<24} {:>9.4} {:>10.4}",
                city.label(),
                city.latitude,
                city.longitude
            );
        }
        return Ok(());
    }

    let observer = resolve_observer(&cli, &config)?;
    let report = MoonReport::now(&observer);

    if report.day_boundary_fallback() {
        log::warn!("Local midnight could not be resolved; rise/set searched from the current instant");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
