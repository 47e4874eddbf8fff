//! Passcode lifecycle module
//!
//! This module provides the issue/resend and verify workflow:
//! - Code generation with reuse of an unexpired code on resend
//! - Lazy expiry enforcement and bounded-attempt verification
//! - Per-phone mutual exclusion around every read-modify-write
//! - Delivery through a pluggable notifier
//! - Optional background sweep of expired tokens

mod config;
mod locks;
mod service;
mod sweeper;
mod traits;
mod types;
mod validator;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use locks::PhoneLocks;
pub use service::OtpService;
pub use sweeper::{ExpiredTokenSweeper, SweepResult};
pub use traits::{Notifier, PhoneValidator};
pub use types::{DeliveryStatus, IssueOutcome};
pub use validator::RegexPhoneValidator;
