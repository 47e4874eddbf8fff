use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use otp_api::{configure, telemetry, AppState};
use otp_core::services::{ExpiredTokenSweeper, OtpService, OtpServiceConfig, RegexPhoneValidator};
use otp_infra::{create_notifier, create_token_repository};
use otp_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Profile file first; variables already set are never overridden
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        store = %config.store.backend,
        "Starting OTP Gate API server"
    );

    let validator = Arc::new(
        RegexPhoneValidator::new(&config.otp.phone_pattern).context("Invalid OTP_PHONE_PATTERN")?,
    );
    let repository = create_token_repository(&config)
        .await
        .context("Failed to initialise token store")?;
    let notifier = create_notifier(&config.sms, config.otp.code_ttl_seconds)
        .context("Failed to initialise SMS notifier")?;
    let notifier_provider = notifier.provider_name().to_string();

    let otp_service = Arc::new(OtpService::new(
        repository.clone(),
        notifier,
        validator,
        OtpServiceConfig::from(&config.otp),
    ));

    let sweeper = Arc::new(ExpiredTokenSweeper::new(
        repository,
        config.otp.sweep_interval_seconds,
    ));
    let sweeper_handle = sweeper.start_background_task();

    let state = web::Data::new(AppState::new(
        otp_service,
        config.store.backend.to_string(),
        notifier_provider,
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind to address");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(configure)
    });
    if let Some(workers) = config.server.worker_count() {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}
