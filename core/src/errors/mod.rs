//! Domain-specific error types and error handling.

use otp_shared::error_codes;
use otp_shared::phone::mask_phone_number;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Phone number failed the format predicate; rejected before any store access
    ///
    /// The message masks the number so the error can be logged as-is.
    #[error("Invalid phone format: {}", mask_phone_number(.phone))]
    InvalidPhoneFormat { phone: String },

    /// Token store unavailable or the operation failed
    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    /// Notifier could not send the code
    #[error("Delivery failure: {message}")]
    Delivery { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn persistence(message: impl Into<String>) -> Self {
        DomainError::Persistence {
            message: message.into(),
        }
    }

    /// Stable code used in error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::InvalidPhoneFormat { .. } => error_codes::PHONE_INVALID,
            DomainError::Persistence { .. } => error_codes::PERSISTENCE_ERROR,
            DomainError::Delivery { .. } => error_codes::SMS_ERROR,
            DomainError::Configuration { .. } => error_codes::CONFIGURATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Delivery { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
