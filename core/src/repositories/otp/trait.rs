//! Token store trait defining the interface for passcode persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_token::OtpToken;
use crate::errors::DomainError;

/// Keyed persistence for at most one active token per phone number
///
/// Implementations own the stored token state. Callers never hold a token
/// across operations; every lifecycle step re-reads the current state.
///
/// # Error Handling
/// Every backend failure is reported as `DomainError::Persistence`.
#[async_trait]
pub trait OtpTokenRepository: Send + Sync {
    /// Find the token stored for a phone number
    ///
    /// # Returns
    /// * `Ok(Some(OtpToken))` - Token found (it may already be expired)
    /// * `Ok(None)` - No token stored for this phone
    /// * `Err(DomainError)` - Store unavailable
    ///
    /// # Example
    /// ```no_run
    /// # use otp_core::repositories::OtpTokenRepository;
    /// # async fn example(repo: &impl OtpTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// if let Some(token) = repo.find_by_phone("+919812345678").await? {
    ///     println!("{} failed attempts so far", token.attempts);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpToken>, DomainError>;

    /// Upsert a token keyed by its phone number
    async fn save(&self, token: &OtpToken) -> Result<(), DomainError>;

    /// Store a changed attempt count for a token that is still present
    ///
    /// Writes nothing when the token has been removed since it was read
    /// (sweeper, native expiry), so a deleted token never comes back.
    ///
    /// # Returns
    /// * `Ok(true)` - Attempt count updated
    /// * `Ok(false)` - No token with this code is stored any more
    async fn update_attempts(&self, token: &OtpToken) -> Result<bool, DomainError>;

    /// Delete the token for a phone number; a no-op when none is stored
    async fn delete_by_phone(&self, phone: &str) -> Result<(), DomainError>;

    /// Delete every token that had expired at `now`
    ///
    /// Resource reclamation only; lifecycle correctness never depends on it.
    /// Backends with native expiry return `Ok(0)`.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of tokens removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
