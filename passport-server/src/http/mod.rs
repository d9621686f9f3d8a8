//! HTTP layer
//!
//! Axum server with:
//! - Form endpoints rendering server-side HTML
//! - Request tracing and timeout
//! - Graceful shutdown
//! - Plain-text error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
