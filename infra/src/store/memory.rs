//! Process-local token store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use otp_core::domain::entities::otp_token::OtpToken;
use otp_core::errors::DomainError;
use otp_core::repositories::OtpTokenRepository;

/// Token store backed by a map guarded by an async read-write lock
///
/// Tokens live as long as the process; the sweeper reclaims expired ones.
#[derive(Default)]
pub struct InMemoryOtpTokenRepository {
    tokens: RwLock<HashMap<String, OtpToken>>,
}

impl InMemoryOtpTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, expired ones included
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl OtpTokenRepository for InMemoryOtpTokenRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpToken>, DomainError> {
        Ok(self.tokens.read().await.get(phone).cloned())
    }

    async fn save(&self, token: &OtpToken) -> Result<(), DomainError> {
        self.tokens
            .write()
            .await
            .insert(token.phone.clone(), token.clone());
        Ok(())
    }

    async fn update_attempts(&self, token: &OtpToken) -> Result<bool, DomainError> {
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
        self.tokens.write().await.remove(phone);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, token| !token.is_expired_at(now));
        Ok((before - tokens.len()) as u64)
    }
}
