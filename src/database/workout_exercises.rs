// ABOUTME: Workout exercise queries, including owner-scoped lookup with scheduling context
// ABOUTME: Future occurrences match the same program, weekday and catalog exercise in later weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{Weekday, WorkoutExercise};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{now_rfc3339, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

/// A workout exercise together with where it sits in the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutExerciseContext {
    /// The workout exercise row
    pub workout_exercise: WorkoutExercise,
    /// Program the parent day belongs to
    pub program_id: Uuid,
    /// Week of the parent day
    pub week_number: i64,
    /// Weekday of the parent day
    pub day_of_week: Weekday,
}

impl Database {
    /// Create the workout_exercises table
    pub(super) async fn migrate_workout_exercises(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_day_id TEXT NOT NULL REFERENCES workout_days(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                order_index INTEGER NOT NULL CHECK (order_index >= 0),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_exercises_day
            ON workout_exercises(workout_day_id, order_index)
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_exercises_exercise
            ON workout_exercises(exercise_id)
            ",
        ])
        .await
    }
}

/// Place a catalog exercise on a day
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn insert_workout_exercise(
    conn: &mut SqliteConnection,
    workout_day_id: Uuid,
    exercise_id: Uuid,
    order_index: i64,
) -> AppResult<WorkoutExercise> {
    let workout_exercise = WorkoutExercise {
        id: Uuid::new_v4(),
        workout_day_id,
        exercise_id,
        order_index,
    };

    sqlx::query(
        r"
        INSERT INTO workout_exercises (id, workout_day_id, exercise_id, order_index, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(workout_exercise.id.to_string())
    .bind(workout_day_id.to_string())
    .bind(exercise_id.to_string())
    .bind(order_index)
    .bind(now_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to add workout exercise: {e}")))?;

    Ok(workout_exercise)
}

/// Get a workout exercise and its scheduling context if `user_id` owns the program
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_owned_context(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<WorkoutExerciseContext>> {
    let row = sqlx::query(
        r"
        SELECT we.id AS id, we.workout_day_id AS workout_day_id,
               we.exercise_id AS exercise_id, we.order_index AS order_index,
               wd.program_id AS program_id, wd.week_number AS week_number,
               wd.day_of_week AS day_of_week
        FROM workout_exercises we
        JOIN workout_days wd ON wd.id = we.workout_day_id
        JOIN programs p ON p.id = wd.program_id
        WHERE we.id = $1 AND p.user_id = $2
        ",
    )
    .bind(workout_exercise_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get workout exercise: {e}")))?;

    row.map(|r| {
        let program_id: String = r.get("program_id");
        let day_of_week: i64 = r.get("day_of_week");
        Ok(WorkoutExerciseContext {
            workout_exercise: row_to_workout_exercise(&r)?,
            program_id: parse_uuid(&program_id)?,
            week_number: r.get("week_number"),
            day_of_week: Weekday::try_from(day_of_week)?,
        })
    })
    .transpose()
}

/// Workout exercises for the same catalog exercise on the same weekday in later weeks
///
/// Ordered by week, so propagation results come back in a stable order.
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn future_occurrences(
    conn: &mut SqliteConnection,
    origin: &WorkoutExerciseContext,
) -> AppResult<Vec<WorkoutExercise>> {
    let rows = sqlx::query(
        r"
        SELECT we.id AS id, we.workout_day_id AS workout_day_id,
               we.exercise_id AS exercise_id, we.order_index AS order_index
        FROM workout_exercises we
        JOIN workout_days wd ON wd.id = we.workout_day_id
        WHERE wd.program_id = $1
          AND wd.day_of_week = $2
          AND wd.week_number > $3
          AND we.exercise_id = $4
        ORDER BY wd.week_number, we.order_index, we.rowid
        ",
    )
    .bind(origin.program_id.to_string())
    .bind(i64::from(origin.day_of_week))
    .bind(origin.week_number)
    .bind(origin.workout_exercise.exercise_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to find future occurrences: {e}")))?;

    rows.iter().map(row_to_workout_exercise).collect()
}

fn row_to_workout_exercise(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    let id: String = row.get("id");
    let workout_day_id: String = row.get("workout_day_id");
    let exercise_id: String = row.get("exercise_id");

    Ok(WorkoutExercise {
        id: parse_uuid(&id)?,
        workout_day_id: parse_uuid(&workout_day_id)?,
        exercise_id: parse_uuid(&exercise_id)?,
        order_index: row.get("order_index"),
    })
}
