//! Twilio SMS Notifier
//!
//! Production delivery through the Twilio Messages REST API.
//!
//! ## Behaviour
//!
//! - Form-encoded POST with HTTP basic auth
//! - Retries rate limiting (429), server errors (5xx) and connection
//!   failures with exponential backoff; other 4xx responses fail at once
//! - Without an account SID or auth token the code is logged instead of
//!   sent, so a misconfigured deployment keeps working

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use otp_core::services::Notifier;
use otp_shared::phone::{is_valid_international_phone, mask_phone_number};
use otp_shared::SmsConfig;

use crate::InfrastructureError;

/// Default Twilio API endpoint
pub const TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

/// Twilio notifier configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: Option<String>,
    /// Twilio Auth Token
    pub auth_token: Option<String>,
    /// From phone number (must be a Twilio phone number)
    pub from_number: Option<String>,
    /// Maximum send attempts for retryable failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// API endpoint, overridable for tests
    pub api_base_url: String,
    /// Code lifetime quoted in the message body
    pub code_ttl_seconds: i64,
}

impl TwilioConfig {
    /// Build from the shared SMS configuration
    pub fn from_sms_config(config: &SmsConfig, code_ttl_seconds: i64) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
            api_base_url: TWILIO_API_BASE_URL.to_string(),
            code_ttl_seconds,
        }
    }

    fn has_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some()
    }
}

/// Subset of the Twilio message resource we read back
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Twilio notifier implementation
pub struct TwilioNotifier {
    client: Client,
    config: TwilioConfig,
}

impl TwilioNotifier {
    /// Create a new Twilio notifier
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        if let Some(from) = &config.from_number {
            if !is_valid_international_phone(from) {
                return Err(InfrastructureError::Config(
                    "TWILIO_FROM_NUMBER must be in E.164 format (e.g. +14155552671)".to_string(),
                ));
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if config.has_credentials() {
            info!(
                "Twilio SMS notifier initialized with from number: {}",
                config
                    .from_number
                    .as_deref()
                    .map(mask_phone_number)
                    .unwrap_or_else(|| "<unset>".to_string())
            );
        } else {
            warn!("Twilio credentials are not configured; verification codes will be logged instead of sent");
        }

        Ok(Self { client, config })
    }

    /// Message text sent to the user
    pub fn message_body(&self, code: &str) -> String {
        let minutes = (self.config.code_ttl_seconds + 59) / 60;
        format!(
            "Your verification code is: {}. This code will expire in {} minutes.",
            code, minutes
        )
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            account_sid
        )
    }

    /// Send SMS with retry logic
    async fn send_with_retry(
        &self,
        account_sid: &str,
        auth_token: &str,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let url = self.messages_url(account_sid);
        let form = [("To", to), ("From", from), ("Body", body)];

        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let failure = match self
                .client
                .post(&url)
                .basic_auth(account_sid, Some(auth_token))
                .form(&form)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    let message: TwilioMessageResponse = response.json().await?;
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        message.sid
                    );
                    return Ok(message.sid);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();

                    if !is_retryable_status(status) {
                        error!("Twilio rejected SMS request ({}): {}", status, detail);
                        return Err(InfrastructureError::Sms(format!(
                            "Invalid request ({}): {}",
                            status, detail
                        )));
                    }
                    format!("Twilio returned {}: {}", status, detail)
                }
                Err(e) if e.is_timeout() || e.is_connect() => e.to_string(),
                Err(e) => return Err(InfrastructureError::Http(e)),
            };

            error!(
                "Failed to send SMS (attempt {}/{}): {}",
                attempts, self.config.max_retries, failure
            );

            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    attempts, failure
                )));
            }

            warn!("Retrying SMS delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Rate limiting and server errors are worth another try
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String> {
        let (account_sid, auth_token) =
            match (&self.config.account_sid, &self.config.auth_token) {
                (Some(sid), Some(token)) => (sid, token),
                _ => {
                    // Documented fallback: the code goes to the log instead of the phone.
                    warn!(
                        provider = "twilio",
                        phone = %phone,
                        code = %code,
                        event = "otp_delivery_logged",
                        "Twilio credentials missing; logging verification code instead of sending"
                    );
                    return Ok(format!("logged_{}", Uuid::new_v4()));
                }
            };

        let from = self
            .config
            .from_number
            .as_deref()
            .ok_or_else(|| "TWILIO_FROM_NUMBER is not configured".to_string())?;

        let body = self.message_body(code);
        self.send_with_retry(account_sid, auth_token, from, phone, &body)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
