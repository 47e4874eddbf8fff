//! Token store selection
//!
//! The backend is picked once at startup from `STORE_BACKEND`.

mod memory;

use std::sync::Arc;
use tracing::info;

use otp_core::repositories::OtpTokenRepository;
use otp_shared::{AppConfig, StoreBackend};

use crate::InfrastructureError;

pub use memory::InMemoryOtpTokenRepository;

/// Create the configured token store
///
/// Connects to Redis or MySQL when those backends are selected, so a bad
/// URL or unreachable server fails startup instead of the first request.
pub async fn create_token_repository(
    config: &AppConfig,
) -> Result<Arc<dyn OtpTokenRepository>, InfrastructureError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!(backend = "memory", "Using in-memory token store");
            Ok(Arc::new(InMemoryOtpTokenRepository::new()))
        }
        #[cfg(feature = "redis-cache")]
        StoreBackend::Redis => {
            let client = crate::cache::RedisClient::new(config.cache.clone()).await?;
            if !client.health_check().await? {
                return Err(InfrastructureError::Config(
                    "Redis did not answer PING".to_string(),
                ));
            }
            info!(backend = "redis", "Using Redis token store");
            Ok(Arc::new(crate::cache::RedisOtpTokenRepository::new(client)))
        }
        #[cfg(feature = "mysql")]
        StoreBackend::Mysql => {
            let pool = crate::database::DatabasePool::new(config.database.clone()).await?;
            if !pool.health_check().await? {
                return Err(InfrastructureError::Config(
                    "MySQL health check failed".to_string(),
                ));
            }
            pool.run_migrations().await?;
            info!(backend = "mysql", "Using MySQL token store");
            Ok(Arc::new(crate::database::MySqlOtpTokenRepository::new(
                pool.get_pool().clone(),
            )))
        }
        #[allow(unreachable_patterns)]
        other => Err(InfrastructureError::Config(format!(
            "Token store backend {:?} is not enabled in this build",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::domain::entities::otp_token::OtpToken;

    #[tokio::test]
    async fn test_default_backend_is_memory() {
        let config = AppConfig::default();
        let store = create_token_repository(&config).await.unwrap();

        store
            .save(&OtpToken::new("+919812345678", "123456", 300))
            .await
            .unwrap();
        assert!(store.find_by_phone("+919812345678").await.unwrap().is_some());
    }
}
