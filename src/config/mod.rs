//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/microgrid-scout/config.toml

pub mod defaults;

use crate::energy::Timeframe;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for analysis output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Remote data providers
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Default values for analysis output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default demand timeframe (daily, weekly, monthly)
    #[serde(default = "default_timeframe")]
    pub timeframe: String,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Remote provider endpoints and transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Open-Meteo compatible forecast endpoint
    #[serde(default = "default_climate_url")]
    pub climate_url: String,

    /// Overpass interpreter endpoint
    #[serde(default = "default_structures_url")]
    pub structures_url: String,

    /// Nominatim base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// User-Agent sent to every provider
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_timeframe() -> String {
    DEFAULT_TIMEFRAME.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_climate_url() -> String {
    DEFAULT_CLIMATE_URL.to_string()
}
fn default_structures_url() -> String {
    DEFAULT_STRUCTURES_URL.to_string()
}
fn default_nominatim_url() -> String {
    DEFAULT_NOMINATIM_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeframe: default_timeframe(),
            format: default_format(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            climate_url: default_climate_url(),
            structures_url: default_structures_url(),
            nominatim_url: default_nominatim_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "timeframe"] => Some(self.defaults.timeframe.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["providers", "climate_url"] => Some(self.providers.climate_url.clone()),
            ["providers", "structures_url"] => Some(self.providers.structures_url.clone()),
            ["providers", "nominatim_url"] => Some(self.providers.nominatim_url.clone()),
            ["providers", "user_agent"] => Some(self.providers.user_agent.clone()),
            ["providers", "timeout_secs"] => Some(self.providers.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "timeframe"] => {
                Timeframe::from_str(value).map_err(Error::Config)?;
                self.defaults.timeframe = value.to_lowercase();
            }
            ["defaults", "format"] => {
                if get_formatter(value).is_none() {
                    let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
                    return Err(Error::Config(format!(
                        "Unknown format: {} (available: {})",
                        value,
                        names.join(", ")
                    )));
                }
                self.defaults.format = value.to_lowercase();
            }

            ["providers", "climate_url"] => {
                self.providers.climate_url = value.to_string();
            }
            ["providers", "structures_url"] => {
                self.providers.structures_url = value.to_string();
            }
            ["providers", "nominatim_url"] => {
                self.providers.nominatim_url = value.to_string();
            }
            ["providers", "user_agent"] => {
                if value.trim().is_empty() {
                    return Err(Error::Config("User-Agent must not be empty".to_string()));
                }
                self.providers.user_agent = value.to_string();
            }
            ["providers", "timeout_secs"] => {
                let secs: u64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
                if secs == 0 {
                    return Err(Error::Config("Timeout must be at least one second".to_string()));
                }
                self.providers.timeout_secs = secs;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.timeframe",
            "defaults.format",
            "providers.climate_url",
            "providers.structures_url",
            "providers.nominatim_url",
            "providers.user_agent",
            "providers.timeout_secs",
            "server.host",
            "server.port",
        ]
    }

    /// Parsed default timeframe
    pub fn timeframe(&self) -> Result<Timeframe> {
        Timeframe::from_str(&self.defaults.timeframe).map_err(Error::Config)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
