//! Server shared state
//!
//! Holds configuration, the analysis session and the geocoder.

use crate::analysis::{LiveEngine, LiveSession};
use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geocoder, nominatim::NominatimBackend};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<Config>,

    /// The single analysis session all clients observe
    pub session: LiveSession,

    /// Place-name resolver
    pub geocoder: NominatimBackend,

    started: Instant,
}

impl AppState {
    /// Create new application state wired to the configured providers
    pub fn new(config: Config) -> Result<Self> {
        let session = LiveSession::new(LiveEngine::from_config(&config.providers)?);
        let geocoder = get_geocoder(&config.providers)?;
        Ok(Self {
            config: Arc::new(config),
            session,
            geocoder,
            started: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
