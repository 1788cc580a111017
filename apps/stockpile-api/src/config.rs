//! # API Server Configuration
//!
//! ## Loading Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults            0.0.0.0:5000, ./stockpile.db, 5 connections    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. TOML file           $STOCKPILE_CONFIG or ./stockpile.toml          │
//! │          │              (skipped when absent)                           │
//! │          ▼                                                              │
//! │  3. Environment         PORT / STOCKPILE_PORT, STOCKPILE_BIND_ADDR,    │
//! │          │              STOCKPILE_DB_PATH, STOCKPILE_DB_MAX_CONNECTIONS,│
//! │          │              STOCKPILE_STATIC_DIR                            │
//! │          ▼                                                              │
//! │  4. validate()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `stockpile.toml`
//! ```toml
//! bind_addr = "127.0.0.1"
//! port = 8080
//! database_path = "/var/lib/stockpile/stockpile.db"
//! max_connections = 8
//! static_dir = "./client/dist"
//! ```

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stockpile.toml";

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: IpAddr,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Maximum pooled SQLite connections.
    pub max_connections: u32,

    /// Built browser UI to serve for non-API paths (optional).
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            database_path: PathBuf::from("./stockpile.db"),
            max_connections: 5,
            static_dir: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration: defaults, then the config file, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("STOCKPILE_CONFIG").map(PathBuf::from);
        let mut config = match path {
            // An explicitly named file must exist.
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment overrides.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // STOCKPILE_PORT wins over the conventional PORT.
        for key in ["PORT", "STOCKPILE_PORT"] {
            if let Some(value) = lookup(key) {
                self.port = parse_var(key, &value)?;
            }
        }

        if let Some(value) = lookup("STOCKPILE_BIND_ADDR") {
            self.bind_addr = parse_var("STOCKPILE_BIND_ADDR", &value)?;
        }

        if let Some(value) = lookup("STOCKPILE_DB_PATH") {
            self.database_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("STOCKPILE_DB_MAX_CONNECTIONS") {
            self.max_connections = parse_var("STOCKPILE_DB_MAX_CONNECTIONS", &value)?;
        }

        if let Some(value) = lookup("STOCKPILE_STATIC_DIR") {
            self.static_dir = if value.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be greater than 0".into()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path must not be empty".into()));
        }

        Ok(())
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.max_connections, 5);
        assert!(config.static_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_env_overrides(env(&[
                ("PORT", "8080"),
                ("STOCKPILE_BIND_ADDR", "127.0.0.1"),
                ("STOCKPILE_DB_PATH", "/tmp/inventory.db"),
                ("STOCKPILE_DB_MAX_CONNECTIONS", "12"),
                ("STOCKPILE_STATIC_DIR", "./client/dist"),
            ]))
            .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("/tmp/inventory.db"));
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.static_dir, Some(PathBuf::from("./client/dist")));
    }

    #[test]
    fn test_stockpile_port_wins() {
        let mut config = ApiConfig::default();
        config
            .apply_env_overrides(env(&[("PORT", "8080"), ("STOCKPILE_PORT", "9090")]))
            .unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_env_overrides(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "PORT"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ApiConfig {
            port: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            max_connections: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            database_path: PathBuf::new(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockpile.toml");
        std::fs::write(&path, "port = 7000\nstatic_dir = \"./public\"\n").unwrap();

        let config = ApiConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.static_dir, Some(PathBuf::from("./public")));
        assert_eq!(config.database_path, PathBuf::from("./stockpile.db"));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockpile.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        assert!(matches!(
            ApiConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
