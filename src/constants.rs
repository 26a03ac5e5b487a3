//! Centralized constants for the microgrid-scout crate
//!
//! Fixed parameters of the analysis pipeline live here. None of them are
//! exposed through the config file.

/// External API endpoints
pub mod api {
    /// Open-Meteo forecast API (daily aggregates, supports `past_days`)
    pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

    /// Overpass API interpreter endpoint
    pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// User-Agent sent to every provider (Nominatim refuses anonymous clients)
    pub const USER_AGENT: &str = "microgrid-scout/0.1.0";

    /// Transport timeout applied by the HTTP client
    pub const TIMEOUT_SECS: u64 = 12;
}

/// Climate window and unit conversion
pub mod climate {
    /// Trailing window of daily values averaged per analysis
    pub const WINDOW_DAYS: usize = 30;

    /// MJ/m² per kWh/m²; one kWh/m² of daily radiation is one peak sun hour
    pub const MJ_PER_KWH: f64 = 3.6;

    /// Unit Open-Meteo reports for `shortwave_radiation_sum`
    pub const RADIATION_UNIT: &str = "MJ/m²";

    /// Unit Open-Meteo reports for wind speed when `wind_speed_unit=mph`
    pub const WIND_UNIT: &str = "mp/h";
}

/// Structure density lookup
pub mod structures {
    /// Search radius around the coordinate in meters
    pub const RADIUS_METERS: u32 = 500;

    /// House count substituted when the structure lookup fails
    pub const DEFAULT_HOUSE_COUNT: u64 = 50;

    /// OSM `building=*` values counted as residential
    pub const RESIDENTIAL_TAGS: &str = "house|residential|detached|semidetached_house|apartments|terrace|bungalow|hut";
}

/// Feasibility thresholds
pub mod thresholds {
    /// Average daily max wind speed (mph) above which wind wins outright
    pub const WIND_MPH: f64 = 12.0;

    /// Peak sun hours above which solar wins (when wind does not)
    pub const SUN_HOURS: f64 = 5.5;
}

/// Warnings surfaced alongside a degraded but usable result
pub mod warnings {
    pub const STRUCTURES_UNAVAILABLE: &str = "Could not fetch building count. Using default estimate.";
    pub const REGION_UNAVAILABLE: &str = "Could not detect country. Using global average for energy use.";
}
