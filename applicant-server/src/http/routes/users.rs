//! User record endpoints
//!
//! Each handler runs exactly one statement through the injected store.
//! Update and delete report success whether or not a row matched; a zero
//! row count is only logged.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUserId};
use crate::http::server::AppState;
use crate::models::{User, UserPayload};

/// Body returned by a successful update
pub const UPDATED_MESSAGE: &str = "User updated successfully";

/// GET / - list every record
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

/// GET /{id} - zero or one record; a missing id is an empty array
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.find(id).await?;
    Ok(Json(users))
}

/// POST / - insert a record and return it with its new id
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<UserPayload>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .store
        .create(&payload)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: "failed to create user: insert returned no row".into(),
        })?;

    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /{id} - overwrite every field of a record
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
    ValidJson(payload): ValidJson<UserPayload>,
) -> Result<Json<&'static str>, ApiError> {
    let affected = state.store.update(id, &payload).await?;
    if affected == 0 {
        tracing::debug!(%id, "update matched no rows");
    }

    Ok(Json(UPDATED_MESSAGE))
}

/// DELETE /{id} - remove a record
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<String>, ApiError> {
    let affected = state.store.delete(id).await?;
    if affected == 0 {
        tracing::debug!(%id, "delete matched no rows");
    }

    Ok(Json(format!("User {} deleted successfully", id)))
}

/// User routes under `prefix`. The collection answers with and without a
/// trailing slash.
pub fn router(prefix: &str) -> Router<Arc<AppState>> {
    let collection = get(list_users).post(create_user);

    Router::new()
        .route(prefix, collection.clone())
        .route(&format!("{}/", prefix), collection)
        .route(
            &format!("{}/{{id}}", prefix),
            get(get_user).put(update_user).delete(delete_user),
        )
}
