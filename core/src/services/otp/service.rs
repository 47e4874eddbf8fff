//! Main passcode lifecycle service implementation

use chrono::Utc;
use std::sync::Arc;

use otp_shared::phone::mask_phone_number;

use crate::domain::entities::otp_token::OtpToken;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpTokenRepository;

use super::config::OtpServiceConfig;
use super::locks::PhoneLocks;
use super::traits::{Notifier, PhoneValidator};
use super::types::{DeliveryStatus, IssueOutcome};

/// Lifecycle manager for phone-bound one-time passcodes
///
/// Holds no token state between calls: every operation re-reads the store
/// inside the per-phone exclusive section.
pub struct OtpService<R: OtpTokenRepository + ?Sized, N: Notifier + ?Sized> {
    /// Token store
    repository: Arc<R>,
    /// Delivery sink
    notifier: Arc<N>,
    /// Phone format predicate
    validator: Arc<dyn PhoneValidator>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Per-phone exclusive sections
    locks: PhoneLocks,
}

impl<R: OtpTokenRepository + ?Sized, N: Notifier + ?Sized> OtpService<R, N> {
    /// Create a new lifecycle service
    ///
    /// # Arguments
    ///
    /// * `repository` - Token store implementation
    /// * `notifier` - Delivery sink implementation
    /// * `validator` - Phone format predicate
    /// * `config` - Service configuration
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        validator: Arc<dyn PhoneValidator>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            validator,
            config,
            locks: PhoneLocks::new(),
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a passcode, or re-send the current one if it has not expired
    ///
    /// This method:
    /// 1. Validates the phone number format
    /// 2. Reuses an unexpired code as-is, keeping its attempt count
    /// 3. Otherwise deletes any prior token and saves a fresh one
    /// 4. Releases the per-phone section, then delivers the current code once
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Token committed; `delivery` reports whether the send worked
    /// * `Err(DomainError::InvalidPhoneFormat)` - Rejected before any store access
    /// * `Err(DomainError::Persistence)` - Store failure, nothing delivered
    pub async fn issue_or_resend(&self, phone: &str) -> DomainResult<IssueOutcome> {
        self.ensure_valid_phone(phone)?;
        let masked = mask_phone_number(phone);

        let guard = self.locks.lock(phone).await;
        let now = Utc::now();

        let (token, reused) = match self.repository.find_by_phone(phone).await? {
            Some(current) if !current.is_expired_at(now) => (current, true),
            previous => {
                if previous.is_some() {
                    tracing::info!(
                        phone = %masked,
                        event = "otp_expired",
                        "Replacing expired verification code"
                    );
                }

                let fresh = OtpToken::issue(phone, self.config.code_ttl_seconds);
                self.repository.delete_by_phone(phone).await?;
                self.repository.save(&fresh).await?;
                (fresh, false)
            }
        };
        drop(guard);

        if reused {
            tracing::info!(
                phone = %masked,
                event = "otp_resent",
                attempts = token.attempts,
                expires_at = %token.expires_at,
                "Re-sending unexpired verification code"
            );
        } else {
            tracing::info!(
                phone = %masked,
                event = "otp_issued",
                expires_at = %token.expires_at,
                "Issued new verification code"
            );
        }

        let delivery = match self.notifier.deliver(phone, &token.code).await {
            Ok(message_id) => DeliveryStatus::Sent { message_id },
            Err(reason) => {
                tracing::error!(
                    phone = %masked,
                    event = "otp_delivery_failed",
                    provider = self.notifier.provider_name(),
                    error = %reason,
                    "Failed to deliver verification code; token remains claimable by resend"
                );
                DeliveryStatus::Failed { reason }
            }
        };

        Ok(IssueOutcome {
            expires_at: token.expires_at,
            reused,
            delivery,
        })
    }

    /// Verify a submitted code
    ///
    /// Rules apply in order: missing token, expiry, exhausted attempts,
    /// match, mismatch. Expiry is checked first so an expired token is never
    /// matched or attempt-counted.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Code matched; the token is consumed
    /// * `Ok(false)` - No token, expired, burned, or wrong code
    /// * `Err(DomainError)` - Invalid phone format or store failure
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<bool> {
        self.ensure_valid_phone(phone)?;
        let masked = mask_phone_number(phone);

        let _guard = self.locks.lock(phone).await;

        let mut token = match self.repository.find_by_phone(phone).await? {
            Some(token) => token,
            None => {
                tracing::debug!(
                    phone = %masked,
                    event = "otp_verification_failed",
                    reason = "no_token",
                    "No verification code to check"
                );
                return Ok(false);
            }
        };

        if token.is_expired_at(Utc::now()) {
            self.repository.delete_by_phone(phone).await?;
            tracing::info!(
                phone = %masked,
                event = "otp_expired",
                "Verification code expired"
            );
            return Ok(false);
        }

        if token.attempts_exhausted(self.config.max_attempts) {
            self.repository.delete_by_phone(phone).await?;
            tracing::warn!(
                phone = %masked,
                event = "otp_burned",
                attempts = token.attempts,
                "Maximum verification attempts exceeded; code burned"
            );
            return Ok(false);
        }

        if token.matches(code) {
            self.repository.delete_by_phone(phone).await?;
            tracing::info!(
                phone = %masked,
                event = "otp_verified",
                "Verification code successfully verified"
            );
            return Ok(true);
        }

        token.record_failed_attempt();
        if !self.repository.update_attempts(&token).await? {
            tracing::info!(
                phone = %masked,
                event = "otp_expired",
                "Verification code removed before the failed attempt was recorded"
            );
            return Ok(false);
        }
        tracing::warn!(
            phone = %masked,
            event = "otp_verification_failed",
            attempts = token.attempts,
            remaining_attempts = token.remaining_attempts(self.config.max_attempts),
            "Verification code mismatch"
        );
        Ok(false)
    }

    fn ensure_valid_phone(&self, phone: &str) -> DomainResult<()> {
        if self.validator.is_valid_phone(phone) {
            Ok(())
        } else {
            tracing::debug!(
                phone = %mask_phone_number(phone),
                event = "invalid_phone_format",
                "Rejected phone number"
            );
            Err(DomainError::InvalidPhoneFormat {
                phone: phone.to_string(),
            })
        }
    }
}
