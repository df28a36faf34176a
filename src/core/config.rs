//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.agrilease/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::DEFAULT_BASE_URL;
use crate::api::mock::DEFAULT_WEATHER_LOCATION;
use crate::api::{Category, Latency};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AgriLeaseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub app_name: Option<String>,
    pub locale: Option<String>,
    pub currency: Option<String>,
    pub page_size: Option<usize>,
    pub default_location: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    /// Applies to every read query.
    pub mock_delay_ms: Option<u64>,
    pub rental_delay_ms: Option<u64>,
    pub login_delay_ms: Option<u64>,
    pub register_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub districts: Option<Vec<String>>,
    pub machine_categories: Option<Vec<Category>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_APP_NAME: &str = "AgriLease";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_LOCALE: &str = "en-LK";
pub const DEFAULT_CURRENCY: &str = "LKR";
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const DEFAULT_DISTRICTS: [&str; 25] = [
    "Colombo", "Gampaha", "Kalutara", "Kandy", "Matale", "Nuwara Eliya",
    "Galle", "Matara", "Hambantota", "Jaffna", "Kilinochchi", "Mannar",
    "Vavuniya", "Mullaitivu", "Batticaloa", "Ampara", "Trincomalee",
    "Kurunegala", "Puttalam", "Anuradhapura", "Polonnaruwa", "Badulla",
    "Monaragala", "Ratnapura", "Kegalle",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub app_name: String,
    pub version: String,
    pub locale: String,
    pub currency: String,
    pub page_size: usize,
    pub default_location: String,
    pub base_url: String,
    pub latency: Latency,
    pub districts: Vec<String>,
    pub machine_categories: Vec<Category>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub delay_ms: Option<u64>,
    pub page_size: Option<usize>,
    pub base_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.agrilease/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".agrilease").join("config.toml"))
}

/// Load config from `~/.agrilease/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AgriLeaseConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AgriLeaseConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AgriLeaseConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<AgriLeaseConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AgriLeaseConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AgriLeaseConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# AgriLease Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# app_name = "AgriLease"
# locale = "en-LK"
# currency = "LKR"
# page_size = 10                     # Or set AGRILEASE_PAGE_SIZE env var
# default_location = "Colombo"       # Weather location when none is given

# [api]
# base_url = "http://localhost:8080/api/v1"   # Or set AGRILEASE_BASE_URL
# mock_delay_ms = 400                # Or set AGRILEASE_MOCK_DELAY_MS
# rental_delay_ms = 800
# login_delay_ms = 600
# register_delay_ms = 800

# [catalog]
# districts = ["Colombo", "Kandy", "Galle"]
# machine_categories = ["Tractor", "Harvester", "Drone"]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {name}={raw}: not a valid value");
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AgriLeaseConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("AGRILEASE_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Page size: CLI → env → config → default
    let page_size = cli
        .page_size
        .or_else(|| env_parse("AGRILEASE_PAGE_SIZE"))
        .or(config.general.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let latency = resolve_latency(config, cli);

    ResolvedConfig {
        app_name: config
            .general
            .app_name
            .clone()
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        version: APP_VERSION.to_string(),
        locale: config
            .general
            .locale
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        currency: config
            .general
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        page_size,
        default_location: config
            .general
            .default_location
            .clone()
            .unwrap_or_else(|| DEFAULT_WEATHER_LOCATION.to_string()),
        base_url,
        latency,
        districts: config
            .catalog
            .districts
            .clone()
            .unwrap_or_else(|| DEFAULT_DISTRICTS.iter().map(|d| d.to_string()).collect()),
        machine_categories: config
            .catalog
            .machine_categories
            .clone()
            .unwrap_or_else(|| Category::ALL.to_vec()),
    }
}

/// A CLI or env delay replaces every call site; file values are per call site.
fn resolve_latency(config: &AgriLeaseConfig, cli: &CliOverrides) -> Latency {
    if let Some(ms) = cli.delay_ms.or_else(|| env_parse("AGRILEASE_MOCK_DELAY_MS")) {
        return Latency::uniform(Duration::from_millis(ms));
    }
    let defaults = Latency::default();
    let pick = |value: Option<u64>, fallback: Duration| value.map(Duration::from_millis).unwrap_or(fallback);
    Latency {
        query: pick(config.api.mock_delay_ms, defaults.query),
        rental: pick(config.api.rental_delay_ms, defaults.rental),
        login: pick(config.api.login_delay_ms, defaults.login),
        register: pick(config.api.register_delay_ms, defaults.register),
    }
}
