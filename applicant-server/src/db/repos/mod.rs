//! Record stores for the `users` table
//!
//! [`UserStore`] is the seam the HTTP handlers depend on. Each method
//! maps to one statement; update and delete report affected rows so the
//! caller can decide what a zero count means.

pub mod memory;
pub mod users;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{User, UserId, UserPayload};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Storage operations behind the record endpoints.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Every record, in whatever order storage yields them.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    /// Zero or one record with this id.
    async fn find(&self, id: UserId) -> Result<Vec<User>, DbError>;

    /// Insert a record and return the stored row, if storage returned one.
    async fn create(&self, payload: &UserPayload) -> Result<Option<User>, DbError>;

    /// Overwrite every non-id column of the matching row. Returns rows affected.
    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<u64, DbError>;

    /// Remove the matching row. Returns rows affected.
    async fn delete(&self, id: UserId) -> Result<u64, DbError>;

    /// Liveness probe: the storage clock.
    async fn probe(&self) -> Result<DateTime<Utc>, DbError>;
}
