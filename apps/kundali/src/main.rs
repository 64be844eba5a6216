use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use jyotish::{BirthEvent, ChartEngine, ChartSettings};

#[derive(Parser)]
#[command(name = "kundali", about = "Compute a Vedic birth chart as JSON")]
struct Cli {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Local birth time (HH:MM or HH:MM:SS)
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Timezone the time was recorded in: UTC, +05:30, UTC-08:00, ...
    #[arg(long, default_value = "UTC", allow_hyphen_values = true)]
    tz: String,
    /// Chart settings TOML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Swiss Ephemeris data directory; overrides the settings file
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,
    /// Print only the running dasha periods
    #[arg(long)]
    current: bool,
    /// Instant for --current (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,
    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("expected HH:MM or HH:MM:SS: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ChartSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ChartSettings::default(),
    };
    if let Some(path) = cli.ephemeris_path.clone() {
        settings.ephemeris.path = Some(path);
    }

    let birth = BirthEvent::at(cli.date.and_time(cli.time), cli.lat, cli.lon, cli.tz.clone());
    log::info!("computing chart for {} {} ({})", cli.date, cli.time, cli.tz);

    let engine = ChartEngine::swiss(settings).context("initializing Swiss Ephemeris")?;
    let chart = engine.compute(&birth).await.context("computing chart")?;

    let output = if cli.current {
        let at = cli.at.unwrap_or_else(Utc::now);
        let current = chart
            .current_dasha(at)
            .context("chart has no dasha periods")?;
        serde_json::to_value(current)?
    } else {
        serde_json::to_value(&*chart)?
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}
