//! Console notifier
//!
//! Prints the code instead of sending it. Never use outside development
//! and staging: the code appears in clear text on stdout and in the logs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use otp_core::services::Notifier;
use otp_shared::phone::mask_phone_number;

/// Console notifier for development and testing
#[derive(Clone)]
pub struct ConsoleNotifier {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to stdout
    console_output: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a notifier with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String> {
        let masked_phone = mask_phone_number(phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                provider = "console",
                phone = %masked_phone,
                "Console notifier simulating failure"
            );
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("CONSOLE SMS NOTIFIER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("Message ID: {}", message_id);
            println!("Verification code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "console",
            phone = %masked_phone,
            code = %code,
            message_id = %message_id,
            "Verification code delivered to console"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}
