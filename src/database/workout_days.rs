// ABOUTME: Workout day queries: bulk schedule rows, active-day pointer and weekday lookups
// ABOUTME: The earliest-pending rule orders by week_number then day_of_week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::Utc;
use liftlog_core::models::{Weekday, WorkoutDay};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

const DAY_COLUMNS: &str = r"
    wd.id AS id, wd.program_id AS program_id, wd.week_number AS week_number,
    wd.day_of_week AS day_of_week, wd.is_completed AS is_completed,
    wd.is_active AS is_active, wd.created_at AS created_at
";

impl Database {
    /// Create the workout_days table
    ///
    /// The partial unique index makes a second active day per program
    /// impossible even under concurrent completion requests.
    pub(super) async fn migrate_workout_days(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS workout_days (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
                week_number INTEGER NOT NULL CHECK (week_number >= 1),
                day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
                is_completed INTEGER NOT NULL DEFAULT 0 CHECK (is_completed IN (0, 1)),
                is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
                created_at TEXT NOT NULL,
                UNIQUE (program_id, week_number, day_of_week),
                CHECK (NOT (is_active = 1 AND is_completed = 1))
            )
            ",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_workout_days_one_active
            ON workout_days(program_id) WHERE is_active = 1
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_days_weekday
            ON workout_days(program_id, day_of_week, week_number)
            ",
        ])
        .await
    }
}

/// Insert one pending day
///
/// # Errors
///
/// Returns a conflict if the (program, week, weekday) slot already exists
pub async fn insert_day(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    week_number: i64,
    day_of_week: Weekday,
) -> AppResult<WorkoutDay> {
    let day = WorkoutDay {
        id: Uuid::new_v4(),
        program_id,
        week_number,
        day_of_week,
        is_completed: false,
        is_active: false,
        created_at: Utc::now(),
    };

    sqlx::query(
        r"
        INSERT INTO workout_days (id, program_id, week_number, day_of_week, is_completed, is_active, created_at)
        VALUES ($1, $2, $3, $4, 0, 0, $5)
        ",
    )
    .bind(day.id.to_string())
    .bind(program_id.to_string())
    .bind(week_number)
    .bind(i64::from(day_of_week))
    .bind(day.created_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Workout days already scheduled for this program"))?;

    Ok(day)
}

/// Number of days scheduled for a program
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn count_days(conn: &mut SqliteConnection, program_id: Uuid) -> AppResult<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM workout_days WHERE program_id = $1")
        .bind(program_id.to_string())
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to count workout days: {e}")))
}

/// Activate the earliest pending day, unless the program already has an active day
///
/// Returns the newly active day, or `None` when nothing was activated.
///
/// # Errors
///
/// Returns a conflict if a concurrent request activated a day first
pub async fn activate_earliest_pending(
    conn: &mut SqliteConnection,
    program_id: Uuid,
) -> AppResult<Option<WorkoutDay>> {
    let row = sqlx::query(
        r"
        UPDATE workout_days SET is_active = 1
        WHERE id = (
            SELECT id FROM workout_days
            WHERE program_id = $1 AND is_completed = 0 AND is_active = 0
            ORDER BY week_number ASC, day_of_week ASC
            LIMIT 1
        )
        AND NOT EXISTS (
            SELECT 1 FROM workout_days WHERE program_id = $1 AND is_active = 1
        )
        RETURNING id, program_id, week_number, day_of_week, is_completed, is_active, created_at
        ",
    )
    .bind(program_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Another workout day was activated concurrently"))?;

    row.map(|r| row_to_day(&r)).transpose()
}

/// Move the active day to completed; returns the updated day, or `None` if it was not active
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn complete_active(
    conn: &mut SqliteConnection,
    day_id: Uuid,
) -> AppResult<Option<WorkoutDay>> {
    let row = sqlx::query(
        r"
        UPDATE workout_days SET is_completed = 1, is_active = 0
        WHERE id = $1 AND is_active = 1 AND is_completed = 0
        RETURNING id, program_id, week_number, day_of_week, is_completed, is_active, created_at
        ",
    )
    .bind(day_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to complete workout day: {e}")))?;

    row.map(|r| row_to_day(&r)).transpose()
}

/// Get a day only if its program belongs to `user_id`
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_owned_day(
    conn: &mut SqliteConnection,
    day_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<WorkoutDay>> {
    let row = sqlx::query(&format!(
        "SELECT {DAY_COLUMNS} FROM workout_days wd \
         JOIN programs p ON p.id = wd.program_id \
         WHERE wd.id = $1 AND p.user_id = $2"
    ))
    .bind(day_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get workout day: {e}")))?;

    row.map(|r| row_to_day(&r)).transpose()
}

/// The active day of an owned program, if any
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_active_day(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<WorkoutDay>> {
    let row = sqlx::query(&format!(
        "SELECT {DAY_COLUMNS} FROM workout_days wd \
         JOIN programs p ON p.id = wd.program_id \
         WHERE wd.program_id = $1 AND p.user_id = $2 AND wd.is_active = 1"
    ))
    .bind(program_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get active workout day: {e}")))?;

    row.map(|r| row_to_day(&r)).transpose()
}

/// All days of a program in progression order
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_days(
    conn: &mut SqliteConnection,
    program_id: Uuid,
) -> AppResult<Vec<WorkoutDay>> {
    let rows = sqlx::query(&format!(
        "SELECT {DAY_COLUMNS} FROM workout_days wd \
         WHERE wd.program_id = $1 ORDER BY wd.week_number, wd.day_of_week"
    ))
    .bind(program_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list workout days: {e}")))?;

    rows.iter().map(row_to_day).collect()
}

/// Days of a program on one weekday, optionally only those after `after_week`
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn days_on_weekday(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    day_of_week: Weekday,
    after_week: Option<i64>,
) -> AppResult<Vec<WorkoutDay>> {
    let rows = sqlx::query(&format!(
        "SELECT {DAY_COLUMNS} FROM workout_days wd \
         WHERE wd.program_id = $1 AND wd.day_of_week = $2 \
           AND ($3 IS NULL OR wd.week_number > $3) \
         ORDER BY wd.week_number"
    ))
    .bind(program_id.to_string())
    .bind(i64::from(day_of_week))
    .bind(after_week)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list workout days by weekday: {e}")))?;

    rows.iter().map(row_to_day).collect()
}

/// The day at a specific (week, weekday) slot
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_day(
    conn: &mut SqliteConnection,
    program_id: Uuid,
    week_number: i64,
    day_of_week: Weekday,
) -> AppResult<Option<WorkoutDay>> {
    let row = sqlx::query(&format!(
        "SELECT {DAY_COLUMNS} FROM workout_days wd \
         WHERE wd.program_id = $1 AND wd.week_number = $2 AND wd.day_of_week = $3"
    ))
    .bind(program_id.to_string())
    .bind(week_number)
    .bind(i64::from(day_of_week))
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to find workout day: {e}")))?;

    row.map(|r| row_to_day(&r)).transpose()
}

pub(super) fn row_to_day(row: &SqliteRow) -> AppResult<WorkoutDay> {
    let id: String = row.get("id");
    let program_id: String = row.get("program_id");
    let day_of_week: i64 = row.get("day_of_week");
    let is_completed: i64 = row.get("is_completed");
    let is_active: i64 = row.get("is_active");
    let created_at: String = row.get("created_at");

    Ok(WorkoutDay {
        id: parse_uuid(&id)?,
        program_id: parse_uuid(&program_id)?,
        week_number: row.get("week_number"),
        day_of_week: Weekday::try_from(day_of_week)?,
        is_completed: is_completed == 1,
        is_active: is_active == 1,
        created_at: parse_timestamp(&created_at)?,
    })
}
