//! applicant-server: HTTP CRUD over applicant profiles
//!
//! Exposes the `users` table as a small JSON API. Each handler issues
//! exactly one parameterized statement through an injected [`db::UserStore`].

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::DbConfig;
pub use db::{DbError, MemoryUserStore, PgUserStore, UserStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{User, UserId, UserPayload, ValidationError};
