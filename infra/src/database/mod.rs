//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema migrations
//! - The MySQL token store

pub mod connection;
pub mod otp_token_repository;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use otp_token_repository::MySqlOtpTokenRepository;
