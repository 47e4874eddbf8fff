//! Type definitions shared by the HTTP surface
//!
//! - `response` - API response wrapper and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
