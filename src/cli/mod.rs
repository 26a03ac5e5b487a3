//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod analyze;
pub mod config;
pub mod resolve;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Microgrid feasibility scout
#[derive(Parser)]
#[command(name = "microgrid-scout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a location for solar, wind or hybrid suitability
    Analyze(analyze::AnalyzeArgs),

    /// Resolve a place name to coordinates
    Resolve(resolve::ResolveArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            init_tracing("warn");
            analyze::run(args).await
        }
        Commands::Resolve(args) => {
            init_tracing("warn");
            resolve::run(args).await
        }
        Commands::Serve(args) => {
            init_tracing("info");
            serve::run(args).await
        }
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging to stderr, honouring `RUST_LOG` when set
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
