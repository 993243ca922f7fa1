//! Application configuration.
//!
//! Configuration is stored in `config.yaml` inside the platform config
//! directory (or `$CONECTA_CONFIG_DIR`) and includes:
//! - The API base URL
//! - The default search region and the region catalog
//! - Request timeout and user-facing messages

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConectaError, Result};
use crate::region::{Region, RegionCatalog};

pub const DEFAULT_API_BASE_URL: &str = "https://conectas-production.up.railway.app";

/// Overrides the directory holding `config.yaml` and the session token.
pub const CONFIG_DIR_ENV: &str = "CONECTA_CONFIG_DIR";
/// Overrides the configured API base URL when set and non-empty.
pub const API_BASE_URL_ENV: &str = "CONECTA_API_BASE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API base URL (falls back to the production deployment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Region a new search session starts in
    #[serde(default)]
    pub default_region: Region,

    /// States and cities available for searching
    #[serde(default)]
    pub regions: RegionCatalog,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub messages: Messages,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            default_region: Region::default(),
            regions: RegionCatalog::default(),
            timeout_secs: default_timeout_secs(),
            messages: Messages::default(),
        }
    }
}

/// User-facing texts surfaced by the search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Shown when a search has neither a term nor a tag
    #[serde(default = "default_invalid_query")]
    pub invalid_query: String,
    /// Shown when the server could not be reached
    #[serde(default = "default_connection_failure")]
    pub connection_failure: String,
}

fn default_invalid_query() -> String {
    "select a category or enter a search term".to_string()
}

fn default_connection_failure() -> String {
    "could not reach the server".to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_query: default_invalid_query(),
            connection_failure: default_connection_failure(),
        }
    }
}

impl Config {
    /// Directory holding the config file and the stored session token
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("com", "conectaservicos", "conecta")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                ConectaError::Config(format!(
                    "could not determine a config directory; set {CONFIG_DIR_ENV}"
                ))
            })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found.
    ///
    /// The default region is not checked here so `config set` can repair it;
    /// call [`Config::validate`] before searching.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Reject a default region the catalog cannot resolve.
    pub fn validate(&self) -> Result<()> {
        self.regions.first_city(&self.default_region.state)?;
        Ok(())
    }

    /// Get the API base URL from the environment or config file
    pub fn api_base_url(&self) -> Result<Url> {
        if let Ok(url) = env::var(API_BASE_URL_ENV)
            && !url.is_empty()
        {
            return Ok(Url::parse(&url)?);
        }

        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Ok(Url::parse(raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the default region. Without a city the state's first city is used.
    pub fn set_default_region(&mut self, state: &str, city: Option<&str>) -> Result<()> {
        let city = match city {
            Some(city) => city.to_string(),
            None => self.regions.first_city(state)?.to_string(),
        };
        self.default_region = Region::new(state, city);
        Ok(())
    }
}
