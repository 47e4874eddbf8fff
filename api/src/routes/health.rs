use actix_web::{web, HttpResponse};

use otp_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use super::otp::AppState;

pub const SERVICE_NAME: &str = "otp-gate-api";

/// Handler for GET /health
///
/// Reports the configured store backend and delivery provider. Backend
/// connectivity is checked once at startup, not per request.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let health = HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION"))
        .with_service(
            "store",
            ServiceHealth::new(HealthStatus::Healthy, state.store_backend.clone()),
        )
        .with_service(
            "notifier",
            ServiceHealth::new(HealthStatus::Healthy, state.notifier_provider.clone()),
        );

    HttpResponse::Ok().json(health)
}
