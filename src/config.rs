//! Configuration management
//!
//! Loads the optional JSON config file and applies environment overrides
//! (`BROKER_DESK_USER`, `BROKER_DESK_FIXTURES`, read through `.env` when present).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::fixtures::FixtureStore;
use crate::session::UserId;

pub const DEFAULT_CONFIG_PATH: &str = "configs/broker_desk.json";

const USER_ENV: &str = "BROKER_DESK_USER";
const FIXTURES_ENV: &str = "BROKER_DESK_FIXTURES";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// User selected at startup
    #[serde(default)]
    pub default_user: UserId,
    /// JSON fixture file; the compiled-in data is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_path: Option<String>,
    #[serde(default = "default_true")]
    pub validate_fixtures: bool,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_user: UserId::default(),
            fixtures_path: None,
            validate_fixtures: true,
            watchlist: WatchlistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        config.apply_env();
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the default config file
    /// does not exist. An explicitly given path must exist.
    pub fn load(path: &str) -> Result<Self> {
        if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
            info!("No config at {}, using defaults", path);
            let mut config = Config::default();
            config.apply_env();
            return Ok(config);
        }
        let config = Self::from_file(path)?;
        info!("Loaded configuration from: {}", path);
        Ok(config)
    }

    fn apply_env(&mut self) {
        dotenv::dotenv().ok();
        self.apply_overrides(std::env::var(USER_ENV).ok(), std::env::var(FIXTURES_ENV).ok());
    }

    pub fn apply_overrides(&mut self, user: Option<String>, fixtures: Option<String>) {
        if let Some(user) = user {
            match UserId::parse(&user) {
                Some(id) => self.default_user = id,
                None => warn!("Ignoring {}={}: unknown user id", USER_ENV, user),
            }
        }
        if let Some(path) = fixtures.filter(|p| !p.trim().is_empty()) {
            self.fixtures_path = Some(path);
        }
    }

    /// Fixture store named by the config, validated when enabled
    pub fn load_fixtures(&self) -> Result<FixtureStore> {
        let store = match &self.fixtures_path {
            Some(path) => FixtureStore::from_file(path)?,
            None => FixtureStore::builtin(),
        };
        if self.validate_fixtures {
            store.validate_and_report();
        }
        Ok(store)
    }
}

/// Watchlist screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistConfig {
    /// Starting position of the market-move slider, in percent
    #[serde(default)]
    pub default_move: f64,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        WatchlistConfig { default_move: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: default_log_dir(),
        }
    }
}
