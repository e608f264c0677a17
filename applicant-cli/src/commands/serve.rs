//! HTTP server command
//!
//! Builds the store, then runs the server until Ctrl+C/SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use applicant_server::db::create_pool;
use applicant_server::http::{normalize_prefix, RECORDS_PREFIX};
use applicant_server::{run_server, MemoryUserStore, PgUserStore, ServerConfig, UserStore};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path prefix for the record routes
    #[arg(long, env = "RECORDS_PREFIX", default_value = RECORDS_PREFIX, value_parser = normalize_prefix)]
    pub prefix: String,

    /// Only allow localhost origins instead of any origin
    #[arg(long)]
    pub restrict_cors: bool,

    /// Keep records in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: !self.restrict_cors,
            records_prefix: self.prefix.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let store: Arc<dyn UserStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; records are lost on exit");
        Arc::new(MemoryUserStore::new())
    } else {
        let db = args.db.into_config();
        tracing::info!(?db, "Using PostgreSQL store");
        Arc::new(PgUserStore::new(create_pool(&db)))
    };

    tracing::info!(
        prefix = %config.records_prefix,
        "Starting applicant server on {}",
        config.bind_addr
    );

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
