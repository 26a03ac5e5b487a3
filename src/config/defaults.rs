//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api;

/// Default climate provider endpoint
pub const DEFAULT_CLIMATE_URL: &str = api::OPEN_METEO_URL;

/// Default structure-density provider endpoint
pub const DEFAULT_STRUCTURES_URL: &str = api::OVERPASS_URL;

/// Default Nominatim base URL (region lookup and place search)
pub const DEFAULT_NOMINATIM_URL: &str = api::NOMINATIM_URL;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = api::USER_AGENT;

/// Default transport timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = api::TIMEOUT_SECS;

/// Default demand timeframe
pub const DEFAULT_TIMEFRAME: &str = "daily";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "microgrid-scout";
