//! Database seeding command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use newsdesk_server::db::create_pool_with_options;
use newsdesk_server::db::seed::{seed, SeedData};
use newsdesk_server::AppConfig;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Dataset directory with topics.json, users.json, articles.json and
    /// comments.json (default: bundled dataset for NEWSDESK_ENV)
    #[arg(long, short = 'd', value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Database URL (overrides .env file and PGDATABASE)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Reset the database and load a dataset
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = AppConfig::from_env_with(|key| match key {
        "DATABASE_URL" => args.database_url.clone(),
        _ => None,
    })
    .context("Failed to load configuration")?;

    let data = match &args.data {
        Some(dir) => SeedData::load_dir(dir)
            .with_context(|| format!("Failed to load dataset from {}", dir.display()))?,
        None => SeedData::bundled(config.environment)
            .context("Failed to load bundled dataset")?,
    };

    let source = match &args.data {
        Some(dir) => dir.display().to_string(),
        None => "bundled".to_owned(),
    };
    tracing::info!(environment = %config.environment, %source, "Seeding database");

    let pool = create_pool_with_options(&config.database)
        .await
        .context("Failed to create database pool")?;

    let summary = seed(&pool, &data).await.context("Seeding failed")?;

    tracing::info!(
        topics = summary.topics,
        users = summary.users,
        articles = summary.articles,
        comments = summary.comments,
        "Seed complete"
    );

    pool.close().await;
    Ok(())
}
