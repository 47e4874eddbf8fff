//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection for the token store
//! - `database` - MySQL connection for the token store
//! - `environment` - Deployment profile and logging configuration
//! - `otp` - Passcode lifecycle and store backend selection
//! - `server` - HTTP server binding
//! - `sms` - Delivery sink selection and gateway credentials

pub mod cache;
pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, StoreBackend, StoreConfig};
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment profile
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Passcode lifecycle configuration
    pub otp: OtpConfig,

    /// Token store selection
    pub store: StoreConfig,

    /// Redis configuration (redis store backend)
    pub cache: CacheConfig,

    /// Database configuration (mysql store backend)
    pub database: DatabaseConfig,

    /// Delivery configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            sms: SmsConfig::console(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            server: ServerConfig::from_env(),
            otp: OtpConfig::from_env(),
            store: StoreConfig::from_env(),
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
            sms: SmsConfig::from_env(env),
            logging: LoggingConfig::from_env(env),
        }
    }
}
