// ABOUTME: SQLite persistence layer with schema migrations and typed query functions
// ABOUTME: Owns the connection pool and hands out RAII transaction guards for multi-row mutations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Database Management
//!
//! `Database` owns the `SqlitePool`. Query functions in the submodules take a
//! `&mut SqliteConnection` so the same function runs on a pooled connection
//! for reads and inside a [`SqliteTransactionGuard`] for mutations.
//!
//! Invariants the engine relies on are also enforced by the schema: one active
//! program per user, one active day per program, dense unique set numbers and
//! at most one log per set.

/// Global muscle-group and default exercise catalog
pub mod catalog;
/// Flat join rows backing the day log read-model
pub mod day_log;
/// Set log queries
pub mod exercise_logs;
/// Exercise set queries
pub mod exercise_sets;
/// Catalog exercise queries
pub mod exercises;
/// Daily and exercise note queries
pub mod notes;
/// Program queries
pub mod programs;
/// RAII transaction guard
pub mod transactions;
/// User account queries
pub mod users;
/// Workout day queries
pub mod workout_days;
/// Workout exercise queries
pub mod workout_exercises;

pub use transactions::{SqliteTransactionGuard, TransactionGuard};

use std::fs;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Pool size for file-backed databases
const FILE_POOL_MAX_CONNECTIONS: u32 = 5;
/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database manager for programs, schedules, logs and the exercise catalog
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, run migrations and seed the default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, a migration or the seed fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            // A single connection that is never recycled keeps the in-memory
            // database alive for the lifetime of the pool.
            DatabaseUrl::Memory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| AppError::config(format!("Invalid in-memory URL: {e}")))?
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| {
                        AppError::config(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .foreign_keys(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(BUSY_TIMEOUT);
                SqlitePoolOptions::new()
                    .max_connections(FILE_POOL_MAX_CONNECTIONS)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        db.seed_default_catalog().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Borrow a pooled connection for reads
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))
    }

    /// Start a write transaction wrapped in a rollback-on-drop guard
    ///
    /// The write lock is taken at `BEGIN`, so concurrent writers queue on the
    /// busy timeout instead of failing when a read lock cannot be upgraded.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the lock is still held when the busy timeout
    /// expires, or a database error if the transaction cannot be started
    pub async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(TransactionGuard::new(tx))
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_catalog().await?;
        self.migrate_programs().await?;
        self.migrate_workout_days().await?;
        self.migrate_workout_exercises().await?;
        self.migrate_exercise_sets().await?;
        self.migrate_exercise_logs().await?;
        self.migrate_notes().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    /// Execute a list of DDL statements in order
    async fn execute_ddl(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}

/// Parse a TEXT uuid column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

/// Parse a TEXT rfc3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp: {e}")))
}

/// Current time as stored in TEXT timestamp columns
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Map a write error, replacing a unique-constraint message with `conflict_message`
pub(crate) fn map_unique_violation(error: sqlx::Error, conflict_message: &str) -> AppError {
    let mapped = AppError::from(error);
    if mapped.code == ErrorCode::ResourceAlreadyExists {
        AppError::conflict(conflict_message)
    } else {
        mapped
    }
}
