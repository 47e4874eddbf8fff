//! Mock implementation of OtpTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_token::OtpToken;
use crate::errors::DomainError;

use super::r#trait::OtpTokenRepository;

/// Mock token store for testing
///
/// Counts every call so tests can assert the store was never touched,
/// and can be switched into a failing mode.
pub struct MockOtpTokenRepository {
    tokens: Arc<RwLock<HashMap<String, OtpToken>>>,
    should_fail: AtomicBool,
    remove_after_find: AtomicBool,
    calls: AtomicUsize,
}

impl MockOtpTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
            remove_after_find: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with a persistence error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Drop the token right after the next lookup returns it, as a
    /// concurrent sweep would
    pub fn set_remove_after_find(&self, remove: bool) {
        self.remove_after_find.store(remove, Ordering::SeqCst);
    }

    /// Number of store calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Insert a token directly, bypassing the call counter
    pub async fn seed(&self, token: OtpToken) {
        self.tokens.write().await.insert(token.phone.clone(), token);
    }

    /// Read a token directly, bypassing the call counter
    pub async fn snapshot(&self, phone: &str) -> Option<OtpToken> {
        self.tokens.read().await.get(phone).cloned()
    }

    /// Number of stored tokens
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    fn enter(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("mock store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockOtpTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpTokenRepository for MockOtpTokenRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpToken>, DomainError> {
        self.enter()?;
        if self.remove_after_find.swap(false, Ordering::SeqCst) {
            return Ok(self.tokens.write().await.remove(phone));
        }
        let tokens = self.tokens.read().await;
        Ok(tokens.get(phone).cloned())
    }

    async fn save(&self, token: &OtpToken) -> Result<(), DomainError> {
        self.enter()?;
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.phone.clone(), token.clone());
        Ok(())
    }

    async fn update_attempts(&self, token: &OtpToken) -> Result<bool, DomainError> {
        self.enter()?;
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&token.phone) {
            Some(stored) if stored.code == token.code => {
                stored.attempts = token.attempts;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<(), DomainError> {
        self.enter()?;
        let mut tokens = self.tokens.write().await;
        tokens.remove(phone);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.enter()?;
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| !token.is_expired_at(now));

        Ok((initial_count - tokens.len()) as u64)
    }
}
