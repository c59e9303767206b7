// ABOUTME: User account database operations
// ABOUTME: Creates the users table and looks accounts up by id or email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::User;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_ddl(&[r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "])
        .await
    }
}

/// Insert a new user
///
/// # Errors
///
/// Returns a conflict error when the email is already registered
pub async fn insert_user(conn: &mut SqliteConnection, user: &User) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO users (id, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(user.id.to_string())
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Email already registered"))?;
    Ok(())
}

/// Look a user up by (lowercase) email
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> AppResult<Option<User>> {
    let row = sqlx::query(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

    row.map(|r| row_to_user(&r)).transpose()
}

/// Look a user up by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_user(conn: &mut SqliteConnection, user_id: Uuid) -> AppResult<Option<User>> {
    let row = sqlx::query("SELECT id, email, password_hash, created_at FROM users WHERE id = $1")
        .bind(user_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

    row.map(|r| row_to_user(&r)).transpose()
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    Ok(User {
        id: parse_uuid(&id)?,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(&created_at)?,
    })
}
