//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input gets the same JSON
//! envelope as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{UserId, ValidationError};

/// Extract and validate a user id from path
pub struct ValidUserId(pub UserId);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = UserId::parse(&id)?;
        Ok(Self(id))
    }
}

/// JSON body whose rejection is a validation error instead of axum's plain text
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}
