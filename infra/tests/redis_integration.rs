//! Redis token store tests
//!
//! Require a running Redis server:
//! `REDIS_URL=redis://localhost:6379 cargo test -p otp_infra -- --ignored`

#![cfg(feature = "redis-cache")]

use chrono::{Duration, Utc};

use otp_core::domain::entities::otp_token::OtpToken;
use otp_core::repositories::OtpTokenRepository;
use otp_infra::cache::{CacheConfig, RedisClient, RedisOtpTokenRepository};

async fn store(prefix: &str) -> RedisOtpTokenRepository {
    let mut config = CacheConfig::from_env();
    config.key_prefix = format!("otp:test:{}", prefix);
    let client = RedisClient::new(config).await.expect("Redis must be running");
    RedisOtpTokenRepository::new(client)
}

#[tokio::test]
#[ignore]
async fn test_redis_round_trip_and_upsert() {
    let store = store("upsert").await;
    let phone = "+919812345678";

    let mut token = OtpToken::new(phone, "482913", 300);
    store.save(&token).await.unwrap();

    token.record_failed_attempt();
    store.save(&token).await.unwrap();

    let stored = store.find_by_phone(phone).await.unwrap().unwrap();
    assert_eq!(stored.code, "482913");
    assert_eq!(stored.attempts, 1);

    store.delete_by_phone(phone).await.unwrap();
    assert!(store.find_by_phone(phone).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_redis_keys_expire_natively() {
    let store = store("ttl").await;
    let phone = "+919812345679";

    let mut token = OtpToken::new(phone, "482913", 300);
    token.expires_at = Utc::now() + Duration::seconds(1);
    store.save(&token).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
    assert!(store.find_by_phone(phone).await.unwrap().is_none());
    assert_eq!(store.delete_expired(Utc::now()).await.unwrap(), 0);
}

#[tokio::test]
#[ignore]
async fn test_redis_update_attempts_skips_missing_key() {
    let store = store("update").await;
    let phone = "+919812345670";
    store.delete_by_phone(phone).await.unwrap();

    let mut token = OtpToken::new(phone, "482913", 300);
    token.record_failed_attempt();
    assert!(!store.update_attempts(&token).await.unwrap());
    assert!(store.find_by_phone(phone).await.unwrap().is_none());

    store.save(&OtpToken::new(phone, "482913", 300)).await.unwrap();
    assert!(store.update_attempts(&token).await.unwrap());
    assert_eq!(store.find_by_phone(phone).await.unwrap().unwrap().attempts, 1);

    store.delete_by_phone(phone).await.unwrap();
}
