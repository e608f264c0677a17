//! Database liveness probe command

use anyhow::{Context, Result};
use clap::Parser;

use applicant_server::db::create_pool;
use applicant_server::{PgUserStore, UserStore};

use super::DbArgs;

/// Arguments for the probe command
#[derive(Parser, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Run `SELECT NOW()` once and print the database time
pub async fn run_probe(args: ProbeArgs) -> Result<()> {
    let db = args.db.into_config();
    let store = PgUserStore::new(create_pool(&db));

    let now = store
        .probe()
        .await
        .with_context(|| format!("Database at {}:{} is unreachable", db.host, db.port))?;

    println!("Database connected: {}", now);
    Ok(())
}
