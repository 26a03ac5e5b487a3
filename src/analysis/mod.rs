//! Site analysis pipeline
//!
//! This module handles:
//! - Fusing the three remote sources into a [`LocationDataset`]
//! - Classifying the dataset into a solar/wind/hybrid [`Recommendation`]
//! - Packaging a cycle's result as an [`AnalysisReport`]
//! - Tracking cycles so only the newest one is ever committed

pub mod classify;
pub mod fusion;
pub mod session;

#[cfg(test)]
mod tests;

use crate::coord::Coordinates;
use crate::energy::{average_daily_usage, project, Timeframe};
use crate::error::Result;
use crate::sources::{ClimateSource, RegionSource, StructureSource};
use serde::{Deserialize, Serialize};

pub use crate::sources::{ClimateSummary, RegionCode};
pub use classify::{classify, Category, Recommendation};
pub use fusion::{Fused, FusionEngine, LiveEngine};
pub use session::{AnalysisOutcome, AnalysisSession, CycleResult, LiveSession};

/// Everything the classifier and demand projector need about one location
///
/// Built once per cycle and replaced wholesale on the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDataset {
    climate: ClimateSummary,
    number_of_houses: u64,
    region: RegionCode,
    avg_daily_usage_kwh: f64,
}

impl LocationDataset {
    /// Assemble a dataset, deriving household usage from the region table
    pub fn new(climate: ClimateSummary, number_of_houses: u64, region: RegionCode) -> Self {
        let avg_daily_usage_kwh = average_daily_usage(region.as_str());
        Self {
            climate,
            number_of_houses,
            region,
            avg_daily_usage_kwh,
        }
    }

    pub fn climate(&self) -> &ClimateSummary {
        &self.climate
    }

    pub fn peak_sun_hours(&self) -> f64 {
        self.climate.peak_sun_hours
    }

    pub fn avg_wind_speed_mph(&self) -> f64 {
        self.climate.avg_wind_speed_mph
    }

    pub fn number_of_houses(&self) -> u64 {
        self.number_of_houses
    }

    pub fn region(&self) -> &RegionCode {
        &self.region
    }

    pub fn avg_daily_usage_kwh(&self) -> f64 {
        self.avg_daily_usage_kwh
    }

    /// Community demand for one day in kWh
    pub fn daily_demand_kwh(&self) -> f64 {
        self.number_of_houses as f64 * self.avg_daily_usage_kwh
    }
}

/// Demand in kWh for each supported timeframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProjection {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl DemandProjection {
    pub fn for_dataset(dataset: &LocationDataset) -> Self {
        Self {
            daily: project(dataset, Timeframe::Daily),
            weekly: project(dataset, Timeframe::Weekly),
            monthly: project(dataset, Timeframe::Monthly),
        }
    }

    pub fn get(&self, timeframe: Timeframe) -> f64 {
        match timeframe {
            Timeframe::Daily => self.daily,
            Timeframe::Weekly => self.weekly,
            Timeframe::Monthly => self.monthly,
        }
    }
}

/// Result of one successful analysis cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique ID for this analysis
    pub id: String,
    /// When the analysis completed (RFC 3339)
    pub timestamp: String,
    pub coordinates: Coordinates,
    pub dataset: LocationDataset,
    pub recommendation: Recommendation,
    /// Non-fatal degradations, in source order
    pub warnings: Vec<String>,
    pub demand: DemandProjection,
}

impl AnalysisReport {
    pub fn new(coordinates: Coordinates, fused: Fused) -> Self {
        let recommendation = classify(&fused.dataset);
        let demand = DemandProjection::for_dataset(&fused.dataset);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            coordinates,
            dataset: fused.dataset,
            recommendation,
            warnings: fused.warnings,
            demand,
        }
    }
}

/// Run one full cycle: validate, fuse, classify
///
/// Fails with `InvalidCoordinates` before any request is made, or with
/// `ClimateUnavailable` when the climate source gives nothing usable.
pub async fn analyze<C, S, R>(engine: &FusionEngine<C, S, R>, at: Coordinates) -> Result<AnalysisReport>
where
    C: ClimateSource,
    S: StructureSource,
    R: RegionSource,
{
    at.validate()?;
    let fused = engine.fuse(at).await?;
    Ok(AnalysisReport::new(at, fused))
}
