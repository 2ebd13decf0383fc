//! Configuration management
//!
//! Settings come from `config.yml` (path taken from `WCC_CONFIG`), then
//! `WCC_<SECTION>_<KEY>` environment variables override individual values.
//! Anything left unset falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed by CORS
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    /// File path or `:memory:` for SQLite, connection url for MySQL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::Sqlite,
            url: "data/wcc.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Sqlite,
    Mysql,
}

impl FromStr for DatabaseDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "mysql" => Ok(Self::Mysql),
            other => Err(format!("Unknown database driver '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory searched for page and event resources before the
    /// copies embedded in the binary
    pub resources_path: Option<PathBuf>,
    /// Store the default documents and events on startup when absent
    pub seed_defaults: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            resources_path: None,
            seed_defaults: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load `path`. A missing or blank file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::FileRead {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: describe_yaml_error(&e),
        })
    }

    /// Load `path`, then apply `WCC_*` environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override values from `lookup`. Values that fail to parse are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("WCC_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = typed(&lookup, "WCC_SERVER_PORT") {
            self.server.port = port;
        }
        if let Some(origin) = lookup("WCC_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Some(driver) = typed(&lookup, "WCC_DATABASE_DRIVER") {
            self.database.driver = driver;
        }
        if let Some(url) = lookup("WCC_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(path) = lookup("WCC_CONTENT_RESOURCES_PATH") {
            self.content.resources_path = Some(PathBuf::from(path));
        }
        if let Some(seed) = typed(&lookup, "WCC_CONTENT_SEED_DEFAULTS") {
            self.content.seed_defaults = seed;
        }
    }
}

fn typed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

fn describe_yaml_error(e: &serde_yaml::Error) -> String {
    match e.location() {
        Some(at) => format!("line {}, column {}: {}", at.line(), at.column(), e),
        None => e.to_string(),
    }
}
