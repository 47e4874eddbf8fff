//! One-time-passcode token bound to a phone number.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Failed verifications tolerated before a token is burned
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Smallest passcode value
pub const CODE_MIN: u32 = 100_000;

/// Largest passcode value
pub const CODE_MAX: u32 = 999_999;

/// Default lifetime of a freshly issued token (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// The only persisted entity: at most one live token exists per phone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpToken {
    /// Validated phone number, the store key
    pub phone: String,

    /// The secret 6-digit passcode
    pub code: String,

    /// Instant after which the token is invalid
    pub expires_at: DateTime<Utc>,

    /// Failed verification tries since issuance
    pub attempts: u32,
}

impl OtpToken {
    /// Creates a token with an explicit code and lifetime
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number the code belongs to
    /// * `code` - The passcode
    /// * `ttl_seconds` - Seconds until the token expires
    pub fn new(phone: impl Into<String>, code: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            phone: phone.into(),
            code: code.into(),
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
            attempts: 0,
        }
    }

    /// Creates a token with a freshly generated code
    pub fn issue(phone: impl Into<String>, ttl_seconds: i64) -> Self {
        Self::new(phone, Self::generate_code(), ttl_seconds)
    }

    /// Generates a passcode from the OS random source, uniform over 100000..=999999
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether the token had expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the failed-attempt budget is spent
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compares a submitted code against the stored one in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Counts one failed verification
    pub fn record_failed_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Attempts left before the token is burned
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
