//! MySQL implementation of the OtpTokenRepository trait.
//!
//! Tokens live in the `otp_tokens` table keyed by phone number; the primary
//! key gives the one-token-per-phone guarantee and `save` is an upsert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use otp_core::domain::entities::otp_token::OtpToken;
use otp_core::errors::DomainError;
use otp_core::repositories::OtpTokenRepository;

/// MySQL implementation of OtpTokenRepository
pub struct MySqlOtpTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OtpToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<OtpToken, DomainError> {
        Ok(OtpToken {
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::persistence(format!("Failed to get phone: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::persistence(format!("Failed to get code: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::persistence(format!("Failed to get expires_at: {}", e)))?,
            attempts: row
                .try_get::<u32, _>("attempts")
                .map_err(|e| DomainError::persistence(format!("Failed to get attempts: {}", e)))?,
        })
    }
}

#[async_trait]
impl OtpTokenRepository for MySqlOtpTokenRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpToken>, DomainError> {
        let row = sqlx::query(
            "SELECT phone, code, expires_at, attempts FROM otp_tokens WHERE phone = ?",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to find token: {}", e)))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn save(&self, token: &OtpToken) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO otp_tokens (phone, code, expires_at, attempts)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                expires_at = VALUES(expires_at),
                attempts = VALUES(attempts)
            "#,
        )
        .bind(&token.phone)
        .bind(&token.code)
        .bind(token.expires_at)
        .bind(token.attempts)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to save token: {}", e)))?;

        Ok(())
    }

    async fn update_attempts(&self, token: &OtpToken) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE otp_tokens SET attempts = ? WHERE phone = ? AND code = ?")
            .bind(token.attempts)
            .bind(&token.phone)
            .bind(&token.code)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to update attempts: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otp_tokens WHERE phone = ?")
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to delete token: {}", e)))?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to delete expired tokens: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}
