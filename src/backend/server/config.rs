/**
 * Server Configuration
 *
 * This module assembles the server configuration from three layers, each
 * overriding the previous one:
 *
 * 1. Built-in defaults (port 3000, data in `./db`, static files in `./public`)
 * 2. An optional TOML file named by `SOCIALHUB_CONFIG`
 * 3. Environment variables (`PORT`, `DATA_DIR`, `STATIC_DIR`,
 *    `BODY_LIMIT_BYTES`, `AVATAR_LIMIT_BYTES`, `ADMIN_USERNAME`,
 *    `ADMIN_PASSWORD`, `ADMIN_EMAIL`)
 *
 * # Example File
 *
 * ```toml
 * port = 8080
 * data_dir = "/var/lib/socialhub"
 *
 * [admin]
 * username = "root"
 * password = "change-me"
 * ```
 */
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::store::AdminSeed;

/// Environment variable naming the optional TOML config file
pub const CONFIG_PATH_VAR: &str = "SOCIALHUB_CONFIG";

const MIB: usize = 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Seed account for a fresh data directory
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "ab".to_string(),
            password: "ab".to_string(),
            email: "admin@official.com".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port for HTTP and WebSocket traffic
    pub port: u16,
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Directory served for any path not handled by the API
    pub static_dir: PathBuf,
    /// Maximum accepted request body
    pub body_limit_bytes: usize,
    /// Maximum size of a `data:image` avatar
    pub avatar_limit_bytes: usize,
    pub admin: AdminConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("db"),
            static_dir: PathBuf::from("public"),
            body_limit_bytes: 50 * MIB,
            avatar_limit_bytes: 3 * MIB,
            admin: AdminConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Layer defaults, an optional file and an environment lookup
    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::info!("Loaded configuration file {}", path.display());
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(env)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Override fields from environment variables
    pub fn apply_env(mut self, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = env("PORT") {
            self.port = parse_value("PORT", value)?;
        }
        if let Some(value) = env("DATA_DIR") {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = env("STATIC_DIR") {
            self.static_dir = PathBuf::from(value);
        }
        if let Some(value) = env("BODY_LIMIT_BYTES") {
            self.body_limit_bytes = parse_value("BODY_LIMIT_BYTES", value)?;
        }
        if let Some(value) = env("AVATAR_LIMIT_BYTES") {
            self.avatar_limit_bytes = parse_value("AVATAR_LIMIT_BYTES", value)?;
        }
        if let Some(value) = env("ADMIN_USERNAME") {
            self.admin.username = value;
        }
        if let Some(value) = env("ADMIN_PASSWORD") {
            self.admin.password = value;
        }
        if let Some(value) = env("ADMIN_EMAIL") {
            self.admin.email = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.username.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "admin.username",
                value: String::new(),
            });
        }
        if self.avatar_limit_bytes > self.body_limit_bytes {
            return Err(ConfigError::InvalidValue {
                key: "avatar_limit_bytes",
                value: self.avatar_limit_bytes.to_string(),
            });
        }
        Ok(())
    }

    /// Admin account written into a fresh `users.json`
    pub fn admin_seed(&self) -> AdminSeed {
        AdminSeed {
            username: self.admin.username.clone(),
            password: self.admin.password.clone(),
            email: self.admin.email.clone(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    pub fn body_limit_bytes(mut self, limit: usize) -> Self {
        self.config.body_limit_bytes = limit;
        self
    }

    pub fn avatar_limit_bytes(mut self, limit: usize) -> Self {
        self.config.avatar_limit_bytes = limit;
        self
    }

    pub fn admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.admin.username = username.into();
        self.config.admin.password = password.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
