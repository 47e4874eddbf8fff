//! One-time-passcode lifecycle and token store configuration

use serde::{Deserialize, Serialize};

use crate::utils::phone::DEFAULT_PHONE_PATTERN;

/// Passcode lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a freshly issued code stays valid
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: i64,

    /// Failed verifications tolerated before the token is burned
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Regular expression a phone number must match
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,

    /// Interval of the expired-token sweep in seconds (0 disables it)
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl_seconds(),
            max_attempts: default_max_attempts(),
            phone_pattern: default_phone_pattern(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_seconds: std::env::var("OTP_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.code_ttl_seconds),
            max_attempts: std::env::var("OTP_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|max: &u32| *max > 0)
                .unwrap_or(defaults.max_attempts),
            phone_pattern: std::env::var("OTP_PHONE_PATTERN").unwrap_or(defaults.phone_pattern),
            sweep_interval_seconds: std::env::var("OTP_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_seconds),
        }
    }
}

/// Token store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map
    #[default]
    Memory,
    /// Redis keys with TTL
    Redis,
    /// MySQL table keyed by phone
    Mysql,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Mysql => write!(f, "mysql"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "mysql" => Ok(StoreBackend::Mysql),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Token store selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Backend holding the tokens
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or_default(),
        }
    }
}

fn default_code_ttl_seconds() -> i64 {
    300
}

fn default_max_attempts() -> u32 {
    5
}

fn default_phone_pattern() -> String {
    DEFAULT_PHONE_PATTERN.to_string()
}

fn default_sweep_interval_seconds() -> u64 {
    60
}
