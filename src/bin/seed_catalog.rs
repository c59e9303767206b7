// ABOUTME: Catalog seeding utility for the Liftlog server
// ABOUTME: Creates the schema and inserts any missing global muscle groups and default exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Default catalog seeder.
//!
//! The server seeds on startup as well; this binary prepares a database ahead
//! of time. Seeding is idempotent.
//!
//! Usage:
//! ```bash
//! # Seed using DATABASE_URL from environment
//! cargo run --bin seed-catalog
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/liftlog.db
//!
//! # Verbose output
//! cargo run --bin seed-catalog -- -v
//! ```

use std::env;

use anyhow::Result;
use clap::Parser;
use liftlog_server::config::database::DEFAULT_DATABASE_URL;
use liftlog_server::config::DatabaseUrl;
use liftlog_server::database::Database;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Liftlog default exercise catalog seeder",
    long_about = "Create the schema and insert the global muscle groups and default exercises"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Liftlog Catalog Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
    let url = DatabaseUrl::parse_url(&database_url)?;

    info!("Connecting to database: {url}");
    let database = Database::new(&url).await?;

    let (muscle_groups,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM muscle_groups")
        .fetch_one(database.pool())
        .await?;
    let (exercises,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM exercises WHERE is_default = 1 AND is_deleted = 0")
            .fetch_one(database.pool())
            .await?;

    info!("=== Seeding Complete ===");
    info!("Muscle groups: {muscle_groups}");
    info!("Default exercises: {exercises}");

    Ok(())
}
