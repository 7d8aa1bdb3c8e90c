//! Site configuration loading and management
//!
//! Configuration is read from YAML. Every field has a default, so an empty
//! document is a valid config. Environment overrides are applied on top with
//! [`SiteConfig::merge_env`].

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

pub const ENV_HOST: &str = "PALBOOK_HOST";
pub const ENV_PORT: &str = "PALBOOK_PORT";
pub const ENV_DATA_DIR: &str = "PALBOOK_DATA_DIR";

/// Complete configuration for the site
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub data: DataConfig,

    #[validate(nested)]
    pub search: SearchConfig,

    #[validate(nested)]
    pub log: LogConfig,
}

/// HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1, max = 65535))]
    pub port: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Where the JSON datasets live
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

/// Search box behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiescence window before a typed search is committed
    #[validate(range(min = 1, max = 10000))]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

/// Log filter used when `RUST_LOG` is unset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogConfig {
    #[validate(length(min = 1))]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null
        if yaml.trim().is_empty() {
            return Self::default().validated();
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validated()
    }

    /// Check value ranges
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;
        Ok(self)
    }

    /// Apply overrides from the process environment
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, then re-validate
    pub fn merge_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                message: format!("{} must be a port number, got '{}'", ENV_PORT, port),
            })?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data.dir = PathBuf::from(dir);
        }
        self.validated()
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                message: format!(
                    "cannot bind to {}:{}: {}",
                    self.server.host, self.server.port, e
                ),
            })
    }

    /// Search debounce window
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
