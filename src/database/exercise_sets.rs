// ABOUTME: Exercise set queries that keep set numbers dense and unique per workout exercise
// ABOUTME: Appends compute max+1 and deletes remove the current max in a single statement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::ExerciseSet;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, now_rfc3339, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

impl Database {
    /// Create the exercise_sets table
    pub(super) async fn migrate_exercise_sets(&self) -> AppResult<()> {
        self.execute_ddl(&[r"
            CREATE TABLE IF NOT EXISTS exercise_sets (
                id TEXT PRIMARY KEY,
                workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
                set_number INTEGER NOT NULL CHECK (set_number >= 1),
                created_at TEXT NOT NULL,
                UNIQUE (workout_exercise_id, set_number)
            )
            "])
        .await
    }
}

/// Insert a set with an explicit number (template seeding)
///
/// # Errors
///
/// Returns a conflict if the number is already taken
pub async fn insert_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
    set_number: i64,
) -> AppResult<ExerciseSet> {
    let set = ExerciseSet {
        id: Uuid::new_v4(),
        workout_exercise_id,
        set_number,
    };

    sqlx::query(
        r"
        INSERT INTO exercise_sets (id, workout_exercise_id, set_number, created_at)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(set.id.to_string())
    .bind(workout_exercise_id.to_string())
    .bind(set_number)
    .bind(now_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Set number already exists"))?;

    Ok(set)
}

/// Append a set numbered one past the current maximum (1 when there are none)
///
/// # Errors
///
/// Returns a conflict when a concurrent writer took the same number
pub async fn append_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
) -> AppResult<ExerciseSet> {
    let row = sqlx::query(
        r"
        INSERT INTO exercise_sets (id, workout_exercise_id, set_number, created_at)
        SELECT $1, $2, COALESCE(MAX(set_number), 0) + 1, $3
        FROM exercise_sets
        WHERE workout_exercise_id = $2
        RETURNING id, workout_exercise_id, set_number
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(workout_exercise_id.to_string())
    .bind(now_rfc3339())
    .fetch_one(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Set was modified concurrently, retry the request"))?;

    row_to_set(&row)
}

/// Delete the highest-numbered set; `None` when the exercise has no sets
///
/// Any log on the deleted set is removed with it.
///
/// # Errors
///
/// Returns an error if the delete fails
pub async fn delete_last_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
) -> AppResult<Option<ExerciseSet>> {
    let row = sqlx::query(
        r"
        DELETE FROM exercise_sets
        WHERE id = (
            SELECT id FROM exercise_sets
            WHERE workout_exercise_id = $1
            ORDER BY set_number DESC
            LIMIT 1
        )
        RETURNING id, workout_exercise_id, set_number
        ",
    )
    .bind(workout_exercise_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to remove set: {e}")))?;

    row.map(|r| row_to_set(&r)).transpose()
}

/// Get a set only if `user_id` owns the program it belongs to
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_owned_set(
    conn: &mut SqliteConnection,
    set_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<ExerciseSet>> {
    let row = sqlx::query(
        r"
        SELECT es.id AS id, es.workout_exercise_id AS workout_exercise_id,
               es.set_number AS set_number
        FROM exercise_sets es
        JOIN workout_exercises we ON we.id = es.workout_exercise_id
        JOIN workout_days wd ON wd.id = we.workout_day_id
        JOIN programs p ON p.id = wd.program_id
        WHERE es.id = $1 AND p.user_id = $2
        ",
    )
    .bind(set_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get set: {e}")))?;

    row.map(|r| row_to_set(&r)).transpose()
}

fn row_to_set(row: &SqliteRow) -> AppResult<ExerciseSet> {
    let id: String = row.get("id");
    let workout_exercise_id: String = row.get("workout_exercise_id");
    Ok(ExerciseSet {
        id: parse_uuid(&id)?,
        workout_exercise_id: parse_uuid(&workout_exercise_id)?,
        set_number: row.get("set_number"),
    })
}
