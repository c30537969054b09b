//! newsdesk CLI - serve the news API and seed its database

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    author,
    version,
    about = "REST API for articles, topics, users and comments",
    long_about = "Serve the newsdesk JSON API over Postgres, or reset the database from a \
                  JSON dataset. Configuration is read from NEWSDESK_ENV, the matching \
                  .env.<env> file and the process environment."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Drop, recreate and populate every table
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Seed(args) => commands::run_seed(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
