//! Cache module for Redis-based token storage
//!
//! Provides a Redis client with retry logic and the token store built on it.

pub mod otp_token_cache;
pub mod redis_client;

pub use otp_token_cache::RedisOtpTokenRepository;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use otp_shared::config::cache::CacheConfig;
