//! PostgreSQL user store
//!
//! One parameterized statement per operation. All SQL is generated from
//! [`UserPayload::COLUMNS`] so placeholder numbers cannot drift away from
//! the bind order.
//!
//! `date_of_birth` is a `DATE` column but travels as text: binds are cast
//! with `::date` and reads select `date_of_birth::text`. The cast is also
//! valid against a `TEXT` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use sqlx::PgPool;

use super::{DbError, UserStore};
use crate::models::{User, UserId, UserPayload};

const DELETE_SQL: &str = "DELETE FROM users WHERE id = $1";
const PROBE_SQL: &str = "SELECT NOW()";

/// Columns stored with a `DATE` type.
const DATE_COLUMNS: [&str; 1] = ["date_of_birth"];

fn is_date(column: &str) -> bool {
    DATE_COLUMNS.contains(&column)
}

/// Placeholder for the `n`th bind of `column`, cast where the column is not text.
fn placeholder(column: &str, n: usize) -> String {
    if is_date(column) {
        format!("${}::date", n)
    } else {
        format!("${}", n)
    }
}

/// `id, first_name, ..., date_of_birth::text AS date_of_birth, ...`
static RECORD_COLUMNS: Lazy<String> = Lazy::new(|| {
    std::iter::once("id".to_string())
        .chain(UserPayload::COLUMNS.iter().map(|column| {
            if is_date(column) {
                format!("{0}::text AS {0}", column)
            } else {
                column.to_string()
            }
        }))
        .collect::<Vec<_>>()
        .join(", ")
});

static SELECT_ALL_SQL: Lazy<String> =
    Lazy::new(|| format!("SELECT {} FROM users", RECORD_COLUMNS.as_str()));

static SELECT_ONE_SQL: Lazy<String> =
    Lazy::new(|| format!("SELECT {} FROM users WHERE id = $1", RECORD_COLUMNS.as_str()));

/// `INSERT INTO users (first_name, ...) VALUES ($1, ...) RETURNING id, ...`
static INSERT_SQL: Lazy<String> = Lazy::new(|| {
    let columns = UserPayload::COLUMNS.join(", ");
    let placeholders = UserPayload::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| placeholder(column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO users ({}) VALUES ({}) RETURNING {}",
        columns,
        placeholders,
        RECORD_COLUMNS.as_str()
    )
});

/// `UPDATE users SET first_name = $1, ... WHERE id = $12`
static UPDATE_SQL: Lazy<String> = Lazy::new(|| {
    let assignments = UserPayload::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = {}", column, placeholder(column, i + 1)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE users SET {} WHERE id = ${}",
        assignments,
        UserPayload::COLUMNS.len() + 1
    )
});

/// User store backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(SELECT_ALL_SQL.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find(&self, id: UserId) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(SELECT_ONE_SQL.as_str())
            .bind(id.get())
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, payload: &UserPayload) -> Result<Option<User>, DbError> {
        let mut query = sqlx::query_as::<_, User>(INSERT_SQL.as_str());
        for value in payload.values() {
            query = query.bind(value);
        }

        let user = query.fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<u64, DbError> {
        let mut query = sqlx::query(UPDATE_SQL.as_str());
        for value in payload.values() {
            query = query.bind(value);
        }

        let result = query.bind(id.get()).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: UserId) -> Result<u64, DbError> {
        let result = sqlx::query(DELETE_SQL)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn probe(&self) -> Result<DateTime<Utc>, DbError> {
        let now = sqlx::query_scalar::<_, DateTime<Utc>>(PROBE_SQL)
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }
}
