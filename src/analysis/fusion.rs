//! Fusion engine
//!
//! Fans out to the three sources concurrently, waits for every one of them
//! to settle, then merges. Climate is mandatory; structures and region fall
//! back to defaults with a warning each.

use crate::analysis::LocationDataset;
use crate::config::ProvidersConfig;
use crate::constants::structures::DEFAULT_HOUSE_COUNT;
use crate::constants::warnings::{REGION_UNAVAILABLE, STRUCTURES_UNAVAILABLE};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::sources::{
    http_client, ClimateSource, NominatimRegion, OpenMeteoClimate, OverpassStructures, RegionCode,
    RegionSource, StructureSource,
};
use tracing::{info, warn};

/// A merged dataset plus the warnings accumulated while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Fused {
    pub dataset: LocationDataset,
    pub warnings: Vec<String>,
}

/// Merges one climate, one structure and one region source
#[derive(Debug, Clone)]
pub struct FusionEngine<C, S, R> {
    climate: C,
    structures: S,
    region: R,
}

/// Engine wired to the real providers
pub type LiveEngine = FusionEngine<OpenMeteoClimate, OverpassStructures, NominatimRegion>;

impl LiveEngine {
    /// Build the live engine from provider settings, sharing one HTTP client
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let client = http_client(config)?;
        Ok(Self::new(
            OpenMeteoClimate::new(client.clone(), config.climate_url.clone()),
            OverpassStructures::new(client.clone(), config.structures_url.clone()),
            NominatimRegion::new(client, config.nominatim_url.clone()),
        ))
    }
}

impl<C, S, R> FusionEngine<C, S, R>
where
    C: ClimateSource,
    S: StructureSource,
    R: RegionSource,
{
    pub fn new(climate: C, structures: S, region: R) -> Self {
        Self {
            climate,
            structures,
            region,
        }
    }

    /// Fetch and merge everything known about a coordinate
    ///
    /// All three lookups are in flight at once and each settles on its own;
    /// a failure in one never cancels the others. Warnings are built fresh
    /// for every call.
    pub async fn fuse(&self, at: Coordinates) -> Result<Fused> {
        let (climate, structures, region) = tokio::join!(
            self.climate.climate(at),
            self.structures.house_count(at),
            self.region.region(at),
        );

        let climate = climate.map_err(|e| {
            warn!(%at, error = %e, "climate data missing, abandoning analysis");
            Error::ClimateUnavailable
        })?;

        let mut warnings = Vec::new();

        let number_of_houses = structures.unwrap_or_else(|e| {
            warn!(%at, error = %e, default = DEFAULT_HOUSE_COUNT, "using default house count");
            warnings.push(STRUCTURES_UNAVAILABLE.to_string());
            DEFAULT_HOUSE_COUNT
        });

        let region = region.unwrap_or_else(|e| {
            warn!(%at, error = %e, "using global average consumption");
            warnings.push(REGION_UNAVAILABLE.to_string());
            RegionCode::fallback()
        });

        info!(
            %at,
            houses = number_of_houses,
            region = %region,
            warnings = warnings.len(),
            "fused location dataset"
        );

        Ok(Fused {
            dataset: LocationDataset::new(climate, number_of_houses, region),
            warnings,
        })
    }
}
