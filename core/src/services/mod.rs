//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    DeliveryStatus, ExpiredTokenSweeper, IssueOutcome, Notifier, OtpService, OtpServiceConfig,
    PhoneLocks, PhoneValidator, RegexPhoneValidator, SweepResult,
};
