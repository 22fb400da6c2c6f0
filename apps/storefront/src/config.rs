//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TOOLRENT_BIND_ADDR=127.0.0.1                                       │
//! │     TOOLRENT_PORT=3000                                                 │
//! │     TOOLRENT_DEV_MODE=true                                             │
//! │     TOOLRENT_PAYMENT_MODE=decline                                      │
//! │     TOOLRENT_PAYMENT_LIMIT_PAISE=500000                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $TOOLRENT_CONFIG, else                                             │
//! │     ~/.config/toolrent/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.toolrent.toolrent/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, dev mode off, payments approved, no limit            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8080
//! dev_mode = true
//!
//! [payment]
//! mode = "approve"      # approve | decline
//! limit_paise = 500000  # sandbox declines anything above ₹5000.00
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Constants
// =============================================================================

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

const ENV_CONFIG_PATH: &str = "TOOLRENT_CONFIG";
const ENV_BIND_ADDR: &str = "TOOLRENT_BIND_ADDR";
const ENV_PORT: &str = "TOOLRENT_PORT";
const ENV_DEV_MODE: &str = "TOOLRENT_DEV_MODE";
const ENV_PAYMENT_MODE: &str = "TOOLRENT_PAYMENT_MODE";
const ENV_PAYMENT_LIMIT: &str = "TOOLRENT_PAYMENT_LIMIT_PAISE";

// =============================================================================
// Payment Mode
// =============================================================================

/// How the sandbox payment gateway answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Every payment within the limit succeeds.
    #[default]
    Approve,

    /// Every payment is declined.
    Decline,
}

impl FromStr for PaymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Ok(PaymentMode::Approve),
            "decline" | "declined" => Ok(PaymentMode::Decline),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_PAYMENT_MODE.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_addr: String,
    pub port: u16,
    /// Reveals raw fault detail on the error page.
    pub dev_mode: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        ServerSection {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            dev_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    pub mode: PaymentMode,
    /// Largest amount (paise) the sandbox approves. `None` = unlimited.
    pub limit_paise: Option<i64>,
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub server: ServerSection,
    pub payment: PaymentSection,
}

impl StorefrontConfig {
    /// Loads configuration from the process environment and config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` for environment variables.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = parse_env(ENV_PORT, &port)?;
        }

        if let Some(dev) = lookup(ENV_DEV_MODE) {
            self.server.dev_mode = parse_flag(ENV_DEV_MODE, &dev)?;
            debug!(dev_mode = self.server.dev_mode, "Overriding dev mode from environment");
        }

        if let Some(mode) = lookup(ENV_PAYMENT_MODE) {
            self.payment.mode = mode.parse()?;
        }

        if let Some(limit) = lookup(ENV_PAYMENT_LIMIT) {
            self.payment.limit_paise = Some(parse_env(ENV_PAYMENT_LIMIT, &limit)?);
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::MissingRequired("server.bind_addr".to_string()));
        }

        if let Some(limit) = self.payment.limit_paise {
            if limit <= 0 {
                return Err(ConfigError::InvalidValue {
                    key: "payment.limit_paise".to_string(),
                    value: limit.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "toolrent", "toolrent")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    pub fn dev_mode(&self) -> bool {
        self.server.dev_mode
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read config file {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
