//! # Infrastructure Layer
//!
//! Concrete implementations of the contracts declared in `otp_core`:
//!
//! - **Store**: token store backends (in-memory, Redis, MySQL) and the
//!   factory that picks one from configuration
//! - **Cache**: Redis client with retry logic and the Redis token store
//! - **Database**: MySQL connection pool and the MySQL token store
//! - **SMS**: console and Twilio notifiers
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL token store (default)
//! - `redis-cache`: Enable the Redis token store (default)
//! - `twilio-sms`: Enable the Twilio notifier (default)

use otp_core::errors::DomainError;

/// Redis client and Redis-backed token store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// MySQL connection pool and MySQL-backed token store
#[cfg(feature = "mysql")]
pub mod database;

/// SMS notifiers
pub mod sms;

/// Token store selection and the in-memory backend
pub mod store;

pub use sms::{create_notifier, ConsoleNotifier};
pub use store::{create_token_repository, InMemoryOtpTokenRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            InfrastructureError::Sms(message) => DomainError::Delivery { message },
            InfrastructureError::Http(e) => DomainError::Delivery {
                message: e.to_string(),
            },
            other => DomainError::Persistence {
                message: other.to_string(),
            },
        }
    }
}
