//! Background removal of expired tokens
//!
//! Lifecycle operations enforce expiry lazily, so this is pure resource
//! reclamation for tokens nobody comes back for.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::errors::DomainError;
use crate::repositories::OtpTokenRepository;

/// Periodic expired-token sweeper
pub struct ExpiredTokenSweeper<R: OtpTokenRepository + ?Sized + 'static> {
    repository: Arc<R>,
    interval_seconds: u64,
}

impl<R: OtpTokenRepository + ?Sized + 'static> ExpiredTokenSweeper<R> {
    /// Create a sweeper; an interval of 0 disables the background task
    pub fn new(repository: Arc<R>, interval_seconds: u64) -> Self {
        Self {
            repository,
            interval_seconds,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_seconds > 0
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - Number of tokens removed
    /// * `Err(DomainError)` - If the store failed
    pub async fn run_sweep(&self) -> Result<SweepResult, DomainError> {
        let removed = self.repository.delete_expired(Utc::now()).await?;

        if removed > 0 {
            info!(event = "otp_sweep", removed, "Removed expired verification codes");
        } else {
            debug!(event = "otp_sweep", "No expired verification codes to remove");
        }

        Ok(SweepResult {
            expired_tokens_deleted: removed,
        })
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when disabled. The first sweep runs after one interval.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.is_enabled() {
            warn!("Expired token sweeper is disabled");
            return None;
        }

        let period = Duration::from_secs(self.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Expired token sweeper started - will run every {} seconds",
                self.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick completes immediately.
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!(event = "otp_sweep_failed", error = %e, "Expired token sweep failed");
                }
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired tokens deleted
    pub expired_tokens_deleted: u64,
}
