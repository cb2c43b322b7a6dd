//! Configuration management for foyerweb
//!
//! This module handles loading, validation, and management of
//! foyerweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./data/foyerweb.db")
}

/// Security and encryption configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Secret used to derive the field encryption key.
    /// A 44-character base64 string is used as-is (32 bytes decoded);
    /// anything else is hashed into a key.
    #[serde(default)]
    pub encryption_key: String,
    /// Pepper mixed into invitation code hashes
    #[serde(default)]
    pub invite_pepper: String,
    /// Session lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// Invitation validity in days
    #[serde(default = "default_invite_expiration_days")]
    pub invite_expiration_days: i64,
}

impl SecurityConfig {
    /// Pepper for invitation code hashes; falls back to the encryption
    /// secret when unset.
    pub fn effective_pepper(&self) -> &str {
        if self.invite_pepper.trim().is_empty() {
            &self.encryption_key
        } else {
            &self.invite_pepper
        }
    }
}

fn default_session_ttl_hours() -> i64 {
    168
}

fn default_invite_expiration_days() -> i64 {
    7
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Security settings
    #[serde(default)]
    pub security: SecurityConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        // Try to parse the YAML
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        // Validate port
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        // The encryption key protects every stored label and amount
        if self.security.encryption_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "security.encryption_key".to_string(),
            });
        }

        if self.security.session_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "security.session_ttl_hours".to_string(),
                reason: "Session lifetime must be at least one hour".to_string(),
            });
        }

        if self.security.invite_expiration_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "security.invite_expiration_days".to_string(),
                reason: "Invitation validity must be at least one day".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address string for the HTTP server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
