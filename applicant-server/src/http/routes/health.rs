//! Health check endpoint
//!
//! Reports the service version and whether the store answers its
//! liveness probe right now. A store outage turns the check into a 503.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Storage clock, when reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now: Option<String>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match state.store.probe().await {
        Ok(now) => (
            StatusCode::OK,
            DatabaseHealth {
                reachable: true,
                now: Some(now.to_rfc3339()),
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                DatabaseHealth {
                    reachable: false,
                    now: None,
                },
            )
        }
    };

    let body = HealthResponse {
        status: if database.reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (status, Json(body))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
