//! SMS delivery configuration module

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Which delivery sink handles outgoing codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Log and print the code locally
    Console,
    /// Send through the Twilio Messages API
    Twilio,
}

impl SmsProvider {
    /// Provider used when none is configured explicitly
    pub fn for_environment(env: Environment) -> Self {
        if env.is_production() {
            SmsProvider::Twilio
        } else {
            SmsProvider::Console
        }
    }
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "mock" | "local" => Ok(SmsProvider::Console),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected delivery sink
    pub provider: SmsProvider,

    /// Twilio Account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio Auth Token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Sender phone number (E.164)
    #[serde(default)]
    pub from_number: Option<String>,

    /// Maximum send attempts for retryable gateway errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for gateway requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl SmsConfig {
    /// Console sink with no credentials
    pub fn console() -> Self {
        Self {
            provider: SmsProvider::Console,
            account_sid: None,
            auth_token: None,
            from_number: None,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Create from environment variables.
    ///
    /// `SMS_PROVIDER` wins when set; otherwise the provider follows the profile.
    /// Blank credential variables are treated as absent.
    pub fn from_env(env: Environment) -> Self {
        let provider = std::env::var("SMS_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(|| SmsProvider::for_environment(env));

        Self {
            provider,
            account_sid: non_blank_var("TWILIO_ACCOUNT_SID"),
            auth_token: non_blank_var("TWILIO_AUTH_TOKEN"),
            from_number: non_blank_var("TWILIO_FROM_NUMBER"),
            max_retries: std::env::var("TWILIO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            retry_delay_ms: std::env::var("TWILIO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_retry_delay_ms),
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
        }
    }

    /// Whether gateway credentials are present
    pub fn has_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some()
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}
