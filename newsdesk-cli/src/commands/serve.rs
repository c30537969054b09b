//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use newsdesk_server::db::{create_pool_with_options, schema};
use newsdesk_server::http::{run_server, ServerConfig};
use newsdesk_server::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: HOST:PORT, 127.0.0.1:8080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides .env file and PGDATABASE)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::from_env_with(|key| match key {
        "DATABASE_URL" => args.database_url.clone(),
        _ => None,
    })
    .context("Failed to load configuration")?;

    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config.cors_permissive |= args.cors_permissive;

    tracing::info!(
        environment = %config.environment,
        "Starting newsdesk server on {}",
        config.bind_addr
    );

    // Create database pool
    let pool = create_pool_with_options(&config.database)
        .await
        .context("Failed to create database pool")?;

    schema::ensure(&pool)
        .await
        .context("Failed to create database schema")?;

    // Run server (blocks until shutdown)
    run_server(pool, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
