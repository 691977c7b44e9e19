//! # API REST
//!
//! REST API implementation for VHD.
//!
//! Handles:
//! - HTTP endpoints with axum (health check, chat relay, assessments)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, CORS, status mapping)
//!
//! The scoring engine itself lives in `vhd-core`; this crate only adapts it
//! to HTTP and hosts the outbound chat relay.

#![warn(rust_2018_idioms)]

pub mod relay;
pub mod routes;

pub use relay::{ChatMessage, ChatRelay, ChatReq};
pub use routes::{AppState, HealthRes, router};
