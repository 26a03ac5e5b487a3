//! Remote data source adapters
//!
//! Each adapter wraps exactly one outbound request to one provider and maps
//! the raw response (or its absence) into a typed partial value or an
//! [`Unavailable`] marker. Adapters never substitute defaults and never
//! retry; deciding what a missing source means is the fusion engine's job.
//!
//! ## Flex Point
//! The fusion engine is generic over the three adapter traits below, so a
//! provider can be swapped by implementing the matching trait.

pub mod climate;
pub mod region;
pub mod structures;

use crate::config::ProvidersConfig;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use climate::{ClimateSummary, OpenMeteoClimate};
pub use region::{NominatimRegion, RegionCode};
pub use structures::OverpassStructures;

/// Which provider an outcome came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Climate,
    Structures,
    Region,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Climate => write!(f, "climate"),
            Self::Structures => write!(f, "structures"),
            Self::Region => write!(f, "region"),
        }
    }
}

/// A source produced nothing usable this cycle
///
/// Covers transport failures, non-success statuses and responses missing
/// the expected fields alike.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} source unavailable: {reason}")]
pub struct Unavailable {
    pub kind: SourceKind,
    pub reason: String,
}

impl Unavailable {
    pub fn new(kind: SourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Outcome of a single adapter call
pub type SourceResult<T> = std::result::Result<T, Unavailable>;

/// Climate provider: 30-day trailing averages for a coordinate
pub trait ClimateSource: Send + Sync {
    fn climate(&self, at: Coordinates) -> impl Future<Output = SourceResult<ClimateSummary>> + Send;
}

/// Structure-density provider: residential buildings around a coordinate
pub trait StructureSource: Send + Sync {
    fn house_count(&self, at: Coordinates) -> impl Future<Output = SourceResult<u64>> + Send;
}

/// Region provider: country of a coordinate
pub trait RegionSource: Send + Sync {
    fn region(&self, at: Coordinates) -> impl Future<Output = SourceResult<RegionCode>> + Send;
}

/// Build the HTTP client shared by every provider
///
/// The configured timeout is the only timeout anywhere in the pipeline.
pub fn http_client(config: &ProvidersConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Send a request and decode a JSON body, folding every failure into `Unavailable`
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    kind: SourceKind,
) -> SourceResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| Unavailable::new(kind, format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Unavailable::new(kind, format!("provider returned status: {}", status)));
    }

    let body = response
        .json::<T>()
        .await
        .map_err(|e| Unavailable::new(kind, format!("failed to parse response: {}", e)))?;

    debug!(source = %kind, "provider responded");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = Unavailable::new(SourceKind::Structures, "timed out");
        assert_eq!(err.to_string(), "structures source unavailable: timed out");
    }

    #[test]
    fn test_http_client_from_default_config() {
        assert!(http_client(&ProvidersConfig::default()).is_ok());
    }
}
