//! Open-Meteo climate adapter
//!
//! Pulls the trailing 30 days of daily shortwave radiation sums and daily
//! max wind speeds (in mph) and averages each series.

use crate::constants::climate::{RADIATION_UNIT, WIND_UNIT, WINDOW_DAYS};
use crate::coord::Coordinates;
use crate::energy::sun_hours_from_radiation;
use crate::sources::{fetch_json, ClimateSource, SourceKind, SourceResult, Unavailable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DAILY_FIELDS: &str = "shortwave_radiation_sum,wind_speed_10m_max";

/// Averaged climate figures for a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateSummary {
    /// Mean daily peak sun hours (kWh/m²/day)
    pub peak_sun_hours: f64,
    /// Mean daily max wind speed in mph
    pub avg_wind_speed_mph: f64,
}

/// Open-Meteo forecast response, restricted to the fields we ask for
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<DailySeries>,
    daily_units: Option<DailyUnits>,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    shortwave_radiation_sum: Option<Vec<Option<f64>>>,
    wind_speed_10m_max: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct DailyUnits {
    shortwave_radiation_sum: Option<String>,
    wind_speed_10m_max: Option<String>,
}

/// Climate adapter backed by the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct OpenMeteoClimate {
    client: reqwest::Client,
    url: String,
}

impl OpenMeteoClimate {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Reduce a decoded response to a summary, rejecting unexpected shapes and units
    fn summarize(response: OpenMeteoResponse) -> SourceResult<ClimateSummary> {
        let malformed = |reason: &str| Unavailable::new(SourceKind::Climate, reason);

        let units = response
            .daily_units
            .ok_or_else(|| malformed("missing daily_units"))?;
        let daily = response.daily.ok_or_else(|| malformed("missing daily block"))?;

        if units.shortwave_radiation_sum.as_deref() != Some(RADIATION_UNIT) {
            return Err(malformed("unexpected radiation unit"));
        }
        if units.wind_speed_10m_max.as_deref() != Some(WIND_UNIT) {
            return Err(malformed("unexpected wind speed unit"));
        }

        let radiation = daily
            .shortwave_radiation_sum
            .ok_or_else(|| malformed("missing shortwave_radiation_sum"))?;
        let wind = daily
            .wind_speed_10m_max
            .ok_or_else(|| malformed("missing wind_speed_10m_max"))?;

        let radiation = trailing_mean(&radiation).ok_or_else(|| malformed("no radiation values"))?;
        let wind = trailing_mean(&wind).ok_or_else(|| malformed("no wind speed values"))?;

        if radiation < 0.0 || wind < 0.0 {
            return Err(malformed("negative climate averages"));
        }

        Ok(ClimateSummary {
            peak_sun_hours: sun_hours_from_radiation(radiation),
            avg_wind_speed_mph: wind,
        })
    }
}

/// Mean of the last `WINDOW_DAYS` entries, skipping nulls and non-finite values
fn trailing_mean(series: &[Option<f64>]) -> Option<f64> {
    let start = series.len().saturating_sub(WINDOW_DAYS);
    let values: Vec<f64> = series[start..]
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl ClimateSource for OpenMeteoClimate {
    async fn climate(&self, at: Coordinates) -> SourceResult<ClimateSummary> {
        debug!(%at, "requesting climate summary");

        let request = self.client.get(&self.url).query(&[
            ("latitude", at.lat.to_string()),
            ("longitude", at.lng.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("wind_speed_unit", "mph".to_string()),
            ("past_days", WINDOW_DAYS.to_string()),
            ("forecast_days", "0".to_string()),
            ("timezone", "auto".to_string()),
        ]);

        let result = fetch_json::<OpenMeteoResponse>(request, SourceKind::Climate)
            .await
            .and_then(Self::summarize);

        if let Err(e) = &result {
            warn!(%at, error = %e, "climate lookup failed");
        }
        result
    }
}
