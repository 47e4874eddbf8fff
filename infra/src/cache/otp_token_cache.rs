//! Redis-backed token store
//!
//! Each token is stored as JSON under `{prefix}:{phone}` with a TTL equal to
//! its remaining lifetime, so abandoned tokens disappear without a sweep.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use otp_core::domain::entities::otp_token::OtpToken;
use otp_core::errors::DomainError;
use otp_core::repositories::OtpTokenRepository;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Token store on top of [`RedisClient`]
pub struct RedisOtpTokenRepository {
    client: RedisClient,
}

impl RedisOtpTokenRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, phone: &str) -> String {
        self.client.config().make_key(phone)
    }
}

/// Remaining lifetime rounded up to whole seconds, never below one
///
/// Rounding up keeps the key alive through the final partial second, while
/// the token itself still verifies.
pub(crate) fn ttl_seconds(token: &OtpToken, now: DateTime<Utc>) -> u64 {
    let millis = (token.expires_at - now).num_milliseconds();
    ((millis + 999) / 1000).max(1) as u64
}

fn persistence(error: InfrastructureError) -> DomainError {
    DomainError::persistence(error.to_string())
}

#[async_trait]
impl OtpTokenRepository for RedisOtpTokenRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpToken>, DomainError> {
        let raw = self.client.get(&self.key(phone)).await.map_err(persistence)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| persistence(InfrastructureError::Serialization(e))),
            None => Ok(None),
        }
    }

    async fn save(&self, token: &OtpToken) -> Result<(), DomainError> {
        let json = serde_json::to_string(token)
            .map_err(|e| persistence(InfrastructureError::Serialization(e)))?;
        let ttl = ttl_seconds(token, Utc::now());

        debug!(ttl_seconds = ttl, "Saving token to Redis");
        self.client
            .set_with_expiry(&self.key(&token.phone), &json, ttl)
            .await
            .map_err(persistence)
    }

    async fn update_attempts(&self, token: &OtpToken) -> Result<bool, DomainError> {
        let json = serde_json::to_string(token)
            .map_err(|e| persistence(InfrastructureError::Serialization(e)))?;
        let ttl = ttl_seconds(token, Utc::now());

        // SET XX: a key that expired or was deleted stays gone
        self.client
            .set_existing_with_expiry(&self.key(&token.phone), &json, ttl)
            .await
            .map_err(persistence)
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<(), DomainError> {
        self.client
            .delete(&self.key(phone))
            .await
            .map(|_| ())
            .map_err(persistence)
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        // Keys expire natively.
        Ok(0)
    }
}
