//! microgrid-scout CLI entry point
//!
//! Microgrid feasibility scout - CLI + web API

use microgrid_scout::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
