// ABOUTME: Set log queries: the in-order completion check and the one-log-per-set insert
// ABOUTME: A set counts as done only when its log exists and is marked completed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::Utc;
use liftlog_core::models::{ExerciseLog, SetPerformance};
use sqlx::SqliteConnection;
use uuid::Uuid;

use super::{map_unique_violation, Database};
use crate::errors::{AppError, AppResult};

impl Database {
    /// Create the exercise_logs table
    pub(super) async fn migrate_exercise_logs(&self) -> AppResult<()> {
        self.execute_ddl(&[r"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                id TEXT PRIMARY KEY,
                exercise_set_id TEXT NOT NULL UNIQUE REFERENCES exercise_sets(id) ON DELETE CASCADE,
                reps INTEGER NOT NULL CHECK (reps > 0),
                weight REAL NOT NULL CHECK (weight >= 0),
                rpe REAL CHECK (rpe IS NULL OR (rpe >= 0 AND rpe <= 10)),
                is_completed INTEGER NOT NULL DEFAULT 1 CHECK (is_completed IN (0, 1)),
                created_at TEXT NOT NULL
            )
            "])
        .await
    }
}

/// Lowest set number below `set_number` that has no completed log
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn first_unlogged_before(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
    set_number: i64,
) -> AppResult<Option<i64>> {
    sqlx::query_scalar(
        r"
        SELECT es.set_number
        FROM exercise_sets es
        LEFT JOIN exercise_logs el
               ON el.exercise_set_id = es.id AND el.is_completed = 1
        WHERE es.workout_exercise_id = $1
          AND es.set_number < $2
          AND el.id IS NULL
        ORDER BY es.set_number
        LIMIT 1
        ",
    )
    .bind(workout_exercise_id.to_string())
    .bind(set_number)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to check earlier sets: {e}")))
}

/// Record a completed log for a set
///
/// # Errors
///
/// Returns a conflict if the set was already logged
pub async fn insert_log(
    conn: &mut SqliteConnection,
    exercise_set_id: Uuid,
    performance: SetPerformance,
) -> AppResult<ExerciseLog> {
    let log = ExerciseLog {
        id: Uuid::new_v4(),
        exercise_set_id,
        reps: performance.reps,
        weight: performance.weight,
        rpe: performance.rpe,
        is_completed: true,
        created_at: Utc::now(),
    };

    sqlx::query(
        r"
        INSERT INTO exercise_logs (id, exercise_set_id, reps, weight, rpe, is_completed, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(log.id.to_string())
    .bind(exercise_set_id.to_string())
    .bind(log.reps)
    .bind(log.weight)
    .bind(log.rpe)
    .bind(log.is_completed)
    .bind(log.created_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Set already logged"))?;

    Ok(log)
}
