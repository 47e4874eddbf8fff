//! Shared utilities and common types for the OTP Gate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Error and response structures for the HTTP surface
//! - Phone number utilities (validation pattern, normalisation, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    CacheConfig, DatabaseConfig, LoggingConfig, OtpConfig,
    ServerConfig, SmsConfig, SmsProvider, StoreBackend, StoreConfig,
};
pub use errors::{ErrorResponse, error_codes};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::phone;
