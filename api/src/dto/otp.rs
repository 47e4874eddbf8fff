use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/otp/send`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(length(min = 8, max = 16, message = "Phone number must be 8 to 16 characters"))]
    pub phone: String,
}

/// Body of `POST /api/v1/otp/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 8, max = 16, message = "Phone number must be 8 to 16 characters"))]
    pub phone: String,
    #[validate(length(equal = 6, message = "OTP must be exactly 6 characters"))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    pub expires_in: i64, // seconds until the current code expires
    pub resent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}
