// src/config.rs
use serde::Deserialize;
use std::{env, fs, io, path::Path};
use tracing::{debug, info};

use crate::auth::SessionConfig;
use crate::errors::ServerError;

pub const CONFIG_PATH_VAR: &str = "AGENCY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sessions: SessionConfig,
    pub pricing: PricingConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_workers: usize,
    /// Request bodies above this are refused with 413.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "agency.sqlite3".to_string(),
            schema: "sql/schema.sql".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PricingConfig {
    /// Recompute price-request totals server side and reject mismatches.
    pub verify_price_requests: bool,
}

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents)
            .map_err(|e| ServerError::Config(format!("Failed to parse TOML config: {e}")))
    }

    /// Apply `BIND_ADDR` / `DATABASE_PATH` from the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var("BIND_ADDR") {
            debug!("BIND_ADDR overrides server.bind");
            self.server.bind = bind;
        }
        if let Ok(path) = env::var("DATABASE_PATH") {
            debug!("DATABASE_PATH overrides database.path");
            self.database.path = path;
        }
    }
}

/// Read the config file, if any. A missing file means defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ServerError> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    match fs::read_to_string(path_ref) {
        Ok(contents) => AppConfig::from_toml(&contents)
            .map_err(|e| ServerError::Config(format!("{:?}: {e}", path_ref))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No config file at {:?}, using defaults", path_ref);
            Ok(AppConfig::default())
        }
        Err(e) => Err(ServerError::Config(format!(
            "Failed to read config file {:?}: {e}",
            path_ref
        ))),
    }
}

/// Config file named by `AGENCY_CONFIG` (default `config.toml`) plus env overrides.
pub fn load_app_configuration() -> Result<AppConfig, ServerError> {
    let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    config.apply_env_overrides();
    info!(
        "Configuration loaded: bind {}, database {}, price verification {}",
        config.server.bind, config.database.path, config.pricing.verify_price_requests
    );
    Ok(config)
}
