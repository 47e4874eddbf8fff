//! # OTP Gate Core
//!
//! Domain layer for the OTP Gate backend.
//! This crate contains the one-time-passcode entity, the lifecycle service,
//! the token store and notifier contracts, and the domain error type.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::OtpToken;
pub use errors::{DomainError, DomainResult};
pub use repositories::OtpTokenRepository;
pub use services::{
    DeliveryStatus, ExpiredTokenSweeper, IssueOutcome, Notifier, OtpService, OtpServiceConfig,
    PhoneLocks, PhoneValidator, RegexPhoneValidator, SweepResult,
};
