//! Analyze command handler
//!
//! Runs one analysis cycle for a coordinate or a place name.

use crate::analysis::{analyze, LiveEngine};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::energy::consumption::{average_daily_usage, known_regions, GLOBAL_AVERAGE_KWH};
use crate::energy::Timeframe;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::{get_geocoder, Geocoder};
use clap::Args;
use std::str::FromStr;

/// Analyze command arguments
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Named location (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub location: Option<String>,

    /// Demand timeframe: daily, weekly or monthly
    #[arg(long, short = 't')]
    pub timeframe: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,

    /// List regions with a known household consumption figure
    #[arg(short = 'R', long = "list-regions")]
    pub list_regions: bool,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }
    if args.list_regions {
        print!("{}", region_table());
        return Ok(());
    }

    let config = Config::load()?;

    let at = if let Some(query) = &args.location {
        let place = get_geocoder(&config.providers)?.resolve(query).await?;
        eprintln!("Resolved to: {} {}", place.display_name, place.coords);
        place.coords
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        Coordinates::new(lat, lng)
    } else {
        return Err(Error::InvalidCoordinates(
            "No location specified. Use --lat/--lng or --location".to_string(),
        ));
    };

    let timeframe = match &args.timeframe {
        Some(name) => Timeframe::from_str(name).map_err(Error::Config)?,
        None => config.timeframe()?,
    };
    let format = args.format.unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let engine = LiveEngine::from_config(&config.providers)?;
    let report = analyze(&engine, at).await?;

    let output = formatter.format(&report, timeframe)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

/// Household consumption table, one region per line
fn region_table() -> String {
    let mut out = String::from("Average household use (kWh/day):\n");
    for code in known_regions() {
        out.push_str(&format!("  {:7} {:>5.1}\n", code, average_daily_usage(code)));
    }
    out.push_str(&format!("  {:7} {:>5.1}\n", "other", GLOBAL_AVERAGE_KWH));
    out
}
