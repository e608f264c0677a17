//! In-process user store
//!
//! Same contract as the Postgres store, kept in a map. Backs the
//! `--in-memory` serve mode and the handler tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{DbError, UserStore};
use crate::models::{User, UserId, UserPayload};

#[derive(Debug)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

/// User store held entirely in memory. Ids start at 1 like a `SERIAL`.
#[derive(Debug)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: UserId) -> Result<Vec<User>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.get()).cloned().into_iter().collect())
    }

    async fn create(&self, payload: &UserPayload) -> Result<Option<User>, DbError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let user = payload.clone().into_user(id);
        table.rows.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<u64, DbError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id.get()) {
            Some(row) => {
                *row = payload.clone().into_user(id.get());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: UserId) -> Result<u64, DbError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id.get()).map_or(0, |_| 1))
    }

    async fn probe(&self) -> Result<DateTime<Utc>, DbError> {
        Ok(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first: &str) -> UserPayload {
        UserPayload {
            first_name: Some(first.into()),
            ..UserPayload::default()
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let store = MemoryUserStore::new();
        let a = store.create(&named("a")).await.unwrap().unwrap();
        let b = store.create(&named("b")).await.unwrap().unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryUserStore::new();
        let a = store.create(&named("a")).await.unwrap().unwrap();
        store.delete(UserId::from(a.id)).await.unwrap();
        let b = store.create(&named("b")).await.unwrap().unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = MemoryUserStore::new();
        let mut payload = named("a");
        payload.email = Some("a@example.com".into());
        let user = store.create(&payload).await.unwrap().unwrap();

        let affected = store.update(UserId::from(user.id), &named("b")).await.unwrap();
        assert_eq!(affected, 1);

        let found = store.find(UserId::from(user.id)).await.unwrap();
        assert_eq!(found[0].first_name.as_deref(), Some("b"));
        assert!(found[0].email.is_none());
    }

    #[tokio::test]
    async fn missing_ids_affect_nothing() {
        let store = MemoryUserStore::new();
        assert_eq!(store.update(UserId::from(9), &named("x")).await.unwrap(), 0);
        assert_eq!(store.delete(UserId::from(9)).await.unwrap(), 0);
        assert!(store.find(UserId::from(9)).await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }
}
