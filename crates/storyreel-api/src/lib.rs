//! Axum HTTP API server.
//!
//! This crate provides:
//! - Synchronous and asynchronous video generation endpoints
//! - Job status polling and artifact download
//! - Liveness/readiness probes

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
