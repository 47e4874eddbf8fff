use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::otp::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/v1/otp/verify
///
/// A wrong, expired or exhausted code is a normal `verified: false` answer,
/// not an error.
///
/// # Request Body
///
/// ```json
/// { "phone": "+919812345678", "otp": "482913" }
/// ```
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.otp_service.verify(&request.phone, &request.otp).await {
        Ok(verified) => {
            tracing::info!(
                phone = %mask_phone_number(&request.phone),
                verified,
                "Processed verify OTP request"
            );
            HttpResponse::Ok().json(ApiResponse::success(VerifyOtpResponse { verified }))
        }
        Err(e) => domain_error_response(&e),
    }
}
