//! SMS Notifier Module
//!
//! Delivery sinks for verification codes, selected once at startup:
//!
//! - **Console**: logs and prints the code, for development and staging
//! - **Twilio**: production delivery through the Twilio Messages API,
//!   degrading to logging the code when credentials are absent

use std::sync::Arc;
use tracing::info;

use otp_core::services::Notifier;
use otp_shared::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub mod console;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use console::ConsoleNotifier;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioNotifier};

#[cfg(test)]
mod tests;

/// Create the configured notifier
///
/// # Arguments
///
/// * `config` - Provider selection and gateway credentials
/// * `code_ttl_seconds` - Code lifetime, quoted in the message body
pub fn create_notifier(
    config: &SmsConfig,
    code_ttl_seconds: i64,
) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    match config.provider {
        SmsProvider::Console => {
            info!(provider = "console", "Using console SMS notifier");
            Ok(Arc::new(ConsoleNotifier::new()))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let notifier =
                TwilioNotifier::new(TwilioConfig::from_sms_config(config, code_ttl_seconds))?;
            info!(
                provider = "twilio",
                credentials = config.has_credentials(),
                "Using Twilio SMS notifier"
            );
            Ok(Arc::new(notifier))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => {
            let _ = code_ttl_seconds;
            Err(InfrastructureError::Config(
                "Twilio SMS provider is not enabled in this build".to_string(),
            ))
        }
    }
}
