//! Configuration loading and typed config structures for the SolarTrack server.
//!
//! The configuration lives in `solartrack-config.yaml` in the working
//! directory. Every field has a default, so a missing file or an empty
//! document yields a runnable configuration serving the bundled data set
//! on `127.0.0.1:5000`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use solartrack_api::ServerConfig;

/// Environment variable overriding `server.host`.
pub const HOST_ENV: &str = "SOLARTRACK_HOST";
/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "SOLARTRACK_PORT";
/// Environment variable overriding `data.snapshots_path`.
pub const SNAPSHOTS_ENV: &str = "SOLARTRACK_SNAPSHOTS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Env {
        /// Name of the environment variable.
        name: &'static str,
        /// The value that was rejected.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `solartrack-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Snapshot data source.
    #[serde(default)]
    pub data: DataSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SOLARTRACK_HOST` overrides `server.host`
    /// - `SOLARTRACK_PORT` overrides `server.port`
    /// - `SOLARTRACK_SNAPSHOTS` overrides `data.snapshots_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `SOLARTRACK_PORT` is not a valid port.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if the port override is not a `u16`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse::<u16>().map_err(|e| ConfigError::Env {
                name: PORT_ENV,
                value: port,
                reason: e.to_string(),
            })?;
        }
        if let Some(path) = lookup(SNAPSHOTS_ENV) {
            self.data.snapshots_path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Listener settings in the form the API server expects.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Snapshot data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSection {
    /// Path of the JSON snapshot file, relative to the working directory.
    #[serde(default = "default_snapshots_path")]
    pub snapshots_path: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            snapshots_path: default_snapshots_path(),
        }
    }
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    5000
}

fn default_snapshots_path() -> PathBuf {
    PathBuf::from("data/technicians.json")
}
