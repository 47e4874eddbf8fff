//! Domain entities representing core business objects.

pub mod otp_token;

pub use otp_token::{
    OtpToken, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
