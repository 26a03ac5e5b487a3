//! microgrid-scout: Microgrid Feasibility Scout
//!
//! A library and CLI tool that estimates whether a small renewable microgrid
//! at a given coordinate should favor solar, wind or a hybrid system, and how
//! much electricity the surrounding community uses.
//!
//! ## Features
//!
//! - Concurrent climate, building-density and country lookups that tolerate
//!   partial failure
//! - Deterministic solar/wind/hybrid classification
//! - Daily, weekly and monthly demand projection
//! - Place-name resolution via Nominatim
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use microgrid_scout::analysis::{analyze, LiveEngine};
//! use microgrid_scout::config::ProvidersConfig;
//! use microgrid_scout::coord::Coordinates;
//!
//! # async fn demo() -> microgrid_scout::Result<()> {
//! let engine = LiveEngine::from_config(&ProvidersConfig::default())?;
//! let report = analyze(&engine, Coordinates::new(-1.2864, 36.8172)).await?;
//!
//! println!("{}: {}", report.recommendation.label, report.recommendation.rationale);
//! for warning in &report.warnings {
//!     println!("note: {}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod energy;
pub mod error;
pub mod format;
pub mod geo;
pub mod server;
pub mod sources;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use analysis::{AnalysisOutcome, AnalysisReport, Category, LocationDataset, Recommendation};
pub use config::Config;
pub use coord::Coordinates;
pub use energy::Timeframe;
pub use error::{Error, Result};
