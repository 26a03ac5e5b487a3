//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim search API and takes the first candidate.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{Geocoder, Place};
use serde::Deserialize;
use tracing::{debug, warn};

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimBackend {
    /// Create a backend talking to `base_url`
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Parse lat/lng strings into validated coordinates
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Transport(format!("Invalid latitude in response: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Transport(format!("Invalid longitude in response: {}", lng)))?;
        Coordinates::checked(lat, lng)
            .map_err(|e| Error::Transport(format!("Nominatim returned {}", e)))
    }
}

impl Geocoder for NominatimBackend {
    async fn resolve(&self, query: &str) -> Result<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::NotFound(String::new()));
        }

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        );
        debug!(query, "resolving place name");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(query, error = %e, "geocoding request failed");
            Error::Transport(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse Nominatim response: {}", e)))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(query.to_string()))?;

        let coords = Self::parse_coords(&result.lat, &result.lon)?;
        debug!(query, %coords, "resolved place name");
        Ok(Place {
            coords,
            display_name: result.display_name,
        })
    }
}
