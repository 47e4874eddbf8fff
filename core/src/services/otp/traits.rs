//! Traits for delivery and phone validation collaborators

use async_trait::async_trait;

/// Delivery sink for passcodes
///
/// Implementations are chosen once at startup from configuration.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a code to a phone number, returning the provider message id
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String>;

    /// Name of the provider, used in logs
    fn provider_name(&self) -> &str;
}

/// Format predicate on phone numbers
///
/// Must be total and free of side effects.
pub trait PhoneValidator: Send + Sync {
    fn is_valid_phone(&self, phone: &str) -> bool;
}
