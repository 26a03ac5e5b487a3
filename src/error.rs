//! Error types for microgrid-scout

use thiserror::Error;

/// Main error type for microgrid-scout operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Fatal for an analysis cycle: nothing can be classified without climate data
    #[error("Could not fetch climate data.")]
    ClimateUnavailable,

    /// Free-text query matched no place
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Geocoding service could not be reached or answered garbage
    #[error("Geocoding service error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for microgrid-scout operations
pub type Result<T> = std::result::Result<T, Error>;
