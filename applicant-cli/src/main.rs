//! applicant - HTTP API for applicant profile records
//!
//! Entry point for the server binary:
//! - `serve` runs the HTTP API against PostgreSQL (or in memory)
//! - `probe` checks that the configured database answers

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "applicant",
    author,
    version,
    about = "JSON CRUD API over the users table",
    long_about = "Serve create/read/update/delete endpoints for applicant profile records. \
                  Database settings come from flags, DB_* environment variables, or a .env file."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Run the database liveness probe and exit
    Probe(commands::probe::ProbeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env never overrides variables already set in the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Probe(args) => commands::probe::run_probe(args).await,
    }
}
