//! Nominatim region adapter
//!
//! Reverse-geocodes a coordinate at country zoom and keeps only the
//! two-letter country code.

use crate::coord::Coordinates;
use crate::sources::{fetch_json, RegionSource, SourceKind, SourceResult, Unavailable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sentinel for an unresolved region
pub const DEFAULT_REGION: &str = "DEFAULT";

/// Uppercase two-letter country code, or the `DEFAULT` sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    /// Normalize a code; anything that is not two ASCII letters becomes `DEFAULT`
    pub fn new(code: &str) -> Self {
        Self::parse(code).unwrap_or_else(Self::fallback)
    }

    /// Strictly parse a two-letter code
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// The `DEFAULT` sentinel
    pub fn fallback() -> Self {
        Self(DEFAULT_REGION.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_REGION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nominatim reverse response; `error` replaces `address` for open water
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    country_code: Option<String>,
}

/// Region adapter backed by Nominatim reverse geocoding
#[derive(Debug, Clone)]
pub struct NominatimRegion {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimRegion {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn country(response: ReverseResponse) -> SourceResult<RegionCode> {
        if let Some(error) = response.error {
            return Err(Unavailable::new(SourceKind::Region, error));
        }

        response
            .address
            .and_then(|a| a.country_code)
            .as_deref()
            .and_then(RegionCode::parse)
            .ok_or_else(|| Unavailable::new(SourceKind::Region, "no usable country_code"))
    }
}

impl RegionSource for NominatimRegion {
    async fn region(&self, at: Coordinates) -> SourceResult<RegionCode> {
        debug!(%at, "requesting region");

        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));
        let request = self.client.get(&url).query(&[
            ("lat", at.lat.to_string()),
            ("lon", at.lng.to_string()),
            ("format", "jsonv2".to_string()),
            ("zoom", "3".to_string()),
        ]);

        let result = fetch_json::<ReverseResponse>(request, SourceKind::Region)
            .await
            .and_then(Self::country);

        if let Err(e) = &result {
            warn!(%at, error = %e, "region lookup failed");
        }
        result
    }
}
