//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS unless disabled
//! - Tracing middleware
//! - Startup liveness probe
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::UserStore;

/// Default path prefix the record routes are mounted under
pub const RECORDS_PREFIX: &str = "/applicant";

/// Normalize a record route prefix to `/segment[/segment...]`.
///
/// The site root is taken by the greeting route, so an empty prefix is
/// rejected.
pub fn normalize_prefix(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err("records prefix cannot be the site root".to_string());
    }
    if trimmed.contains("//") || trimmed.contains('{') || trimmed.contains('}') {
        return Err(format!("invalid records prefix '{}'", raw));
    }
    Ok(format!("/{}", trimmed))
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Allow any origin (default: true)
    ///
    /// When false, only localhost origins on port 3000 are allowed.
    pub cors_permissive: bool,

    /// Prefix for the record routes (default: /applicant)
    pub records_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_permissive: true,
            records_prefix: RECORDS_PREFIX.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        // Localhost only
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::home::router())
        .merge(routes::health::router())
        .merge(routes::users::router(&config.records_prefix))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// The store is probed once after binding. A failed probe is logged and
/// the server keeps running; requests then fail individually with 500.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(PgUserStore::new(create_pool(&DbConfig::from_env())));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Arc<dyn UserStore>, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(Arc::clone(&store));
    if !config.cors_permissive {
        tracing::info!("CORS: restricted to localhost origins");
    }
    let app = build_router(state, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    probe_store(store.as_ref()).await;

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Liveness probe: log whether storage answers.
pub async fn probe_store(store: &dyn UserStore) -> bool {
    match store.probe().await {
        Ok(now) => {
            tracing::info!(%now, "database connected");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "database connection failed");
            false
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
