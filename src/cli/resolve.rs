//! Resolve command handler
//!
//! Prints the coordinate a place name resolves to.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geocoder, Geocoder};
use clap::Args;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Place name to look up
    pub query: String,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    let config = Config::load()?;
    let place = get_geocoder(&config.providers)?.resolve(&args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&place)?);
    } else {
        println!("{}", place.display_name);
        println!("{} {}", place.coords.lat, place.coords.lng);
    }

    Ok(())
}
