//! # OTP Gate API
//!
//! actix-web surface over the passcode lifecycle service. The binary in
//! `main.rs` wires configuration, the token store and the notifier; tests
//! build the same application through [`app::configure`].

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::configure;
pub use routes::otp::AppState;
