//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS by default (localhost only when disabled)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelope for every failure

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_router, normalize_prefix, run_server, AppState, ServerConfig, ServerError, RECORDS_PREFIX,
};
