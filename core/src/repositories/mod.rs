pub mod otp;

pub use otp::OtpTokenRepository;

#[cfg(test)]
pub use otp::MockOtpTokenRepository;
