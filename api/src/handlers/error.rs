//! Mapping from domain and request errors to HTTP responses
//!
//! | Error | Status | Code |
//! |-------|--------|------|
//! | `InvalidPhoneFormat` | 400 | `PHONE_INVALID` |
//! | `Persistence` | 500 | `PERSISTENCE_ERROR` |
//! | `Delivery` | 503 | `SMS_ERROR` (`retryable: true`) |
//! | `Configuration`, `Internal` | 500 | `CONFIGURATION_ERROR`, `INTERNAL_ERROR` |
//! | body validation | 400 | `VALIDATION_ERROR` |
//! | malformed JSON | 400 | `BAD_REQUEST` |

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

use otp_core::errors::DomainError;
use otp_shared::{error_codes, ErrorResponse};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::InvalidPhoneFormat { .. } => StatusCode::BAD_REQUEST,
        DomainError::Delivery { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Persistence { .. }
        | DomainError::Configuration { .. }
        | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the error response for a failed service call
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let message = match error {
        DomainError::InvalidPhoneFormat { .. } => "Invalid phone number format".to_string(),
        DomainError::Delivery { .. } => {
            "Verification code was issued but could not be delivered. Please request it again."
                .to_string()
        }
        // Store and configuration details stay in the logs
        DomainError::Persistence { .. } => "Verification store is unavailable".to_string(),
        DomainError::Configuration { .. } | DomainError::Internal { .. } => {
            "An internal error occurred".to_string()
        }
    };

    if status.is_server_error() {
        tracing::error!(error = %error, code = error.error_code(), "Request failed");
    } else {
        tracing::warn!(error = %error, code = error.error_code(), "Request rejected");
    }

    let mut body = ErrorResponse::new(error.error_code(), message);
    if error.is_retryable() {
        body = body.add_detail("retryable", true);
    }

    HttpResponse::build(status).json(body)
}

/// Build the 400 response for a request body that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    tracing::warn!(fields = ?fields, "Request validation failed");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// JSON extractor error handler: malformed bodies become `BAD_REQUEST`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Invalid JSON body: {}", err),
    ));
    InternalError::from_response(err, response).into()
}
