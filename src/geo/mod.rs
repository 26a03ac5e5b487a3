//! Coordinate resolution
//!
//! Turns a free-text place name into a coordinate. Independent of the
//! analysis pipeline; its output is just another coordinate to analyze.

pub mod nominatim;

use crate::config::ProvidersConfig;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::sources::http_client;
use serde::{Deserialize, Serialize};

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coords: Coordinates,
    /// Display name (address or description)
    pub display_name: String,
}

/// Trait for geocoding backends
pub trait Geocoder: Send + Sync {
    /// Resolve a place name to its best-matching coordinate
    ///
    /// Fails with `Error::NotFound` when nothing matches and with
    /// `Error::Transport` when the service cannot be reached or answers
    /// with something unusable. Both are recoverable.
    fn resolve(&self, query: &str) -> impl std::future::Future<Output = Result<Place>> + Send;
}

/// Get the geocoder for the configured providers
pub fn get_geocoder(config: &ProvidersConfig) -> Result<nominatim::NominatimBackend> {
    Ok(nominatim::NominatimBackend::new(
        http_client(config)?,
        config.nominatim_url.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_serialization() {
        let place = Place {
            coords: Coordinates::new(40.7128, -74.0060),
            display_name: "New York City".to_string(),
        };

        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["coords"]["lat"], 40.7128);
        assert_eq!(json["display_name"], "New York City");
    }

    #[test]
    fn test_get_geocoder() {
        assert!(get_geocoder(&ProvidersConfig::default()).is_ok());
    }
}
