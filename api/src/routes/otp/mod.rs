//! Passcode route handlers
//!
//! - `send` - issue a new code or re-send the current one
//! - `verify` - check a submitted code

pub mod send;
pub mod verify;

use std::sync::Arc;

use otp_core::repositories::OtpTokenRepository;
use otp_core::services::{Notifier, OtpService};

/// Lifecycle service over the backends chosen at startup
pub type SharedOtpService = Arc<OtpService<dyn OtpTokenRepository, dyn Notifier>>;

/// Application state shared by all handlers
pub struct AppState {
    pub otp_service: SharedOtpService,
    /// Store backend name reported by the health check
    pub store_backend: String,
    /// Notifier provider name reported by the health check
    pub notifier_provider: String,
}

impl AppState {
    pub fn new(
        otp_service: SharedOtpService,
        store_backend: impl Into<String>,
        notifier_provider: impl Into<String>,
    ) -> Self {
        Self {
            otp_service,
            store_backend: store_backend.into(),
            notifier_provider: notifier_provider.into(),
        }
    }
}
