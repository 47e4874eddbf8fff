//! Application routing
//!
//! Routes and extractor configuration live here so that the server binary
//! and the HTTP tests mount exactly the same application.

use actix_web::{web, HttpResponse};

use otp_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::routes::{health, otp};

/// Mount every route on an actix-web application
///
/// The caller provides `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/otp")
                    .route("/send", web::post().to(otp::send::send_otp))
                    .route("/verify", web::post().to(otp::verify::verify_otp)),
            ),
        )
        .default_service(web::route().to(not_found));
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
