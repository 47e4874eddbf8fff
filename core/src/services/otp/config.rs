//! Configuration for the passcode lifecycle service

use otp_shared::OtpConfig;

use crate::domain::entities::otp_token::{DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS};

/// Configuration for the passcode lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before a freshly issued code expires
    pub code_ttl_seconds: i64,
    /// Failed verifications tolerated before the token is burned
    pub max_attempts: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_EXPIRATION_SECONDS,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl_seconds: config.code_ttl_seconds,
            max_attempts: config.max_attempts,
        }
    }
}
