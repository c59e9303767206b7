// ABOUTME: Program database operations with the single-active-program-per-user rule
// ABOUTME: Activation clears every other active program of the owner before setting the flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::Program;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

const PROGRAM_COLUMNS: &str = "id, user_id, name, duration_weeks, is_active, created_at";

impl Database {
    /// Create the programs table
    pub(super) async fn migrate_programs(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                duration_weeks INTEGER NOT NULL CHECK (duration_weeks BETWEEN 4 AND 16),
                is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
                created_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_programs_user ON programs(user_id)",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_programs_one_active
            ON programs(user_id) WHERE is_active = 1
            ",
        ])
        .await
    }
}

/// Number of programs the user owns
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn count_programs(conn: &mut SqliteConnection, user_id: Uuid) -> AppResult<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM programs WHERE user_id = $1")
        .bind(user_id.to_string())
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to count programs: {e}")))
}

/// Clear the active flag on all of the user's programs
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn deactivate_all(conn: &mut SqliteConnection, user_id: Uuid) -> AppResult<u64> {
    let result =
        sqlx::query("UPDATE programs SET is_active = 0 WHERE user_id = $1 AND is_active = 1")
            .bind(user_id.to_string())
            .execute(conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to deactivate programs: {e}")))?;
    Ok(result.rows_affected())
}

/// Insert a program row as given
///
/// # Errors
///
/// Returns a conflict if another active program exists for the owner
pub async fn insert_program(conn: &mut SqliteConnection, program: &Program) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO programs (id, user_id, name, duration_weeks, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(program.id.to_string())
    .bind(program.user_id.to_string())
    .bind(&program.name)
    .bind(program.duration_weeks)
    .bind(program.is_active)
    .bind(program.created_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Another program was activated concurrently"))?;
    Ok(())
}

/// Set the active flag on one owned program; returns whether a row changed
///
/// # Errors
///
/// Returns a conflict if another program is still active
pub async fn activate(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    user_id: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query("UPDATE programs SET is_active = 1 WHERE id = $1 AND user_id = $2")
        .bind(program_id.to_string())
        .bind(user_id.to_string())
        .execute(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Another program was activated concurrently"))?;
    Ok(result.rows_affected() > 0)
}

/// Get a program only if `user_id` owns it
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_owned_program(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<Program>> {
    let row = sqlx::query(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1 AND user_id = $2"
    ))
    .bind(program_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get program: {e}")))?;

    row.map(|r| row_to_program(&r)).transpose()
}

/// The user's active program, if any
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_active_program(
    conn: &mut SqliteConnection,
    user_id: Uuid,
) -> AppResult<Option<Program>> {
    let row = sqlx::query(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM programs WHERE user_id = $1 AND is_active = 1"
    ))
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get active program: {e}")))?;

    row.map(|r| row_to_program(&r)).transpose()
}

/// All of the user's programs in creation order
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_programs(conn: &mut SqliteConnection, user_id: Uuid) -> AppResult<Vec<Program>> {
    let rows = sqlx::query(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM programs WHERE user_id = $1 ORDER BY created_at, rowid"
    ))
    .bind(user_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list programs: {e}")))?;

    rows.iter().map(row_to_program).collect()
}

fn row_to_program(row: &SqliteRow) -> AppResult<Program> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let is_active: i64 = row.get("is_active");
    let created_at: String = row.get("created_at");

    Ok(Program {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        name: row.get("name"),
        duration_weeks: row.get("duration_weeks"),
        is_active: is_active == 1,
        created_at: parse_timestamp(&created_at)?,
    })
}
