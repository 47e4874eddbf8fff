use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::otp::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/v1/otp/send
///
/// Issues a fresh code, or re-sends the current one while it is still valid.
///
/// # Request Body
///
/// ```json
/// { "phone": "+919812345678" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "message": "Verification code sent", "expires_in": 300, "resent": false },
///     "timestamp": "2025-01-01T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR` / `PHONE_INVALID`
/// - 500 `PERSISTENCE_ERROR`
/// - 503 `SMS_ERROR`: the code was stored but not delivered; sending again
///   replays the same code
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    tracing::info!(
        phone = %mask_phone_number(&request.phone),
        "Processing send OTP request"
    );

    let outcome = match state
        .otp_service
        .issue_or_resend(&request.phone)
        .await
        .and_then(|outcome| outcome.ensure_delivered())
    {
        Ok(outcome) => outcome,
        Err(e) => return domain_error_response(&e),
    };

    let message = if outcome.reused {
        "Verification code re-sent"
    } else {
        "Verification code sent"
    };

    HttpResponse::Ok().json(ApiResponse::success(SendOtpResponse {
        message: message.to_string(),
        expires_in: outcome.expires_in_seconds(),
        resent: outcome.reused,
    }))
}
