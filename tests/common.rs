// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, users, catalog lookups and scheduled programs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftlog_server`

use std::env;
use std::path::Path;
use std::sync::{Arc, Once};

use anyhow::{anyhow, Result};
use liftlog_server::auth::AuthManager;
use liftlog_server::config::environment::ServerConfig;
use liftlog_server::config::DatabaseUrl;
use liftlog_server::database::{users, Database};
use liftlog_server::models::{CreateProgramRequest, Program, User, WorkoutDay};
use liftlog_server::resources::ServerResources;
use liftlog_server::services::{exercises, programs, scheduler};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Secret shared by every test `AuthManager`
pub const TEST_JWT_SECRET: &[u8] = b"liftlog-test-secret-0123456789abcdef";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with the default catalog seeded
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

/// File-backed database at `path`, for tests that need several connections
pub async fn create_file_test_database(path: &Path) -> Result<Database> {
    init_test_logging();
    let url = DatabaseUrl::SQLite {
        path: path.to_path_buf(),
    };
    Ok(Database::new(&url).await?)
}

/// Auth manager with a fixed secret and the cheapest bcrypt cost
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, 24).with_bcrypt_cost(4)
}

/// Server resources over an in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = ServerConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_owned()),
        _ => None,
    })?;
    Ok(Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
        config,
    )))
}

/// Insert a user directly, bypassing password hashing
pub async fn create_test_user(database: &Database, email: &str) -> Result<Uuid> {
    let user = User::new(email.to_owned(), "test_hash".to_owned());
    let mut conn = database.acquire().await?;
    users::insert_user(&mut conn, &user).await?;
    Ok(user.id)
}

/// Id of a default catalog exercise by exact name
pub async fn default_exercise_id(database: &Database, user_id: Uuid, name: &str) -> Result<Uuid> {
    exercises::list_exercises(database, user_id, None)
        .await?
        .into_iter()
        .find(|exercise| exercise.is_default && exercise.name == name)
        .map(|exercise| exercise.id)
        .ok_or_else(|| anyhow!("default exercise {name} not seeded"))
}

/// Id of a global muscle group by exact name
pub async fn muscle_group_id(database: &Database, name: &str) -> Result<Uuid> {
    exercises::list_muscle_groups(database)
        .await?
        .into_iter()
        .find(|group| group.name == name)
        .map(|group| group.id)
        .ok_or_else(|| anyhow!("muscle group {name} not seeded"))
}

/// Create a program and schedule its days in one step
pub async fn create_scheduled_program(
    database: &Database,
    user_id: Uuid,
    duration_weeks: i64,
    weekdays: &[i64],
) -> Result<(Program, Vec<WorkoutDay>)> {
    let request = CreateProgramRequest {
        name: None,
        duration_weeks,
    };
    let program = programs::create_program(database, user_id, &request).await?;
    let days =
        scheduler::schedule_days(database, user_id, program.id, weekdays, duration_weeks).await?;
    Ok((program, days))
}

/// The scheduled day for a given week and weekday
pub fn find_day(days: &[WorkoutDay], week_number: i64, day_of_week: i64) -> &WorkoutDay {
    days.iter()
        .find(|day| day.week_number == week_number && i64::from(day.day_of_week) == day_of_week)
        .expect("scheduled day exists")
}
