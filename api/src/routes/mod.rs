//! Route handlers
//!
//! - `health` - liveness endpoint
//! - `otp` - passcode issuance and verification

pub mod health;
pub mod otp;
