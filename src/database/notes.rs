// ABOUTME: Daily and exercise note queries, one note per parent row
// ABOUTME: Edits and deletes are scoped to the owner through the program join
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use liftlog_core::models::{DailyNote, ExerciseNote};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};

/// Day ids owned by the user bound at `$user`
fn owned_days(user: &str) -> String {
    format!(
        "SELECT wd.id FROM workout_days wd \
         JOIN programs p ON p.id = wd.program_id WHERE p.user_id = {user}"
    )
}

/// Workout exercise ids owned by the user bound at `$user`
fn owned_workout_exercises(user: &str) -> String {
    format!(
        "SELECT we.id FROM workout_exercises we \
         JOIN workout_days wd ON wd.id = we.workout_day_id \
         JOIN programs p ON p.id = wd.program_id WHERE p.user_id = {user}"
    )
}

impl Database {
    /// Create the note tables
    pub(super) async fn migrate_notes(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS daily_notes (
                id TEXT PRIMARY KEY,
                workout_day_id TEXT NOT NULL UNIQUE REFERENCES workout_days(id) ON DELETE CASCADE,
                note TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS exercise_notes (
                id TEXT PRIMARY KEY,
                workout_exercise_id TEXT NOT NULL UNIQUE REFERENCES workout_exercises(id) ON DELETE CASCADE,
                note TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        ])
        .await
    }
}

/// Attach a note to a day
///
/// # Errors
///
/// Returns a conflict if the day already has a note
pub async fn insert_daily_note(
    conn: &mut SqliteConnection,
    workout_day_id: Uuid,
    note: &str,
) -> AppResult<DailyNote> {
    let daily_note = DailyNote {
        id: Uuid::new_v4(),
        workout_day_id,
        note: note.to_owned(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO daily_notes (id, workout_day_id, note, updated_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(daily_note.id.to_string())
    .bind(workout_day_id.to_string())
    .bind(note)
    .bind(daily_note.updated_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Workout day already has a note"))?;

    Ok(daily_note)
}

/// Replace the text of an owned daily note
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn update_daily_note(
    conn: &mut SqliteConnection,
    note_id: Uuid,
    user_id: Uuid,
    note: &str,
) -> AppResult<Option<DailyNote>> {
    let row = sqlx::query(&format!(
        "UPDATE daily_notes SET note = $1, updated_at = $4 \
         WHERE id = $2 AND workout_day_id IN ({}) \
         RETURNING id, workout_day_id, note, updated_at",
        owned_days("$3")
    ))
    .bind(note)
    .bind(note_id.to_string())
    .bind(user_id.to_string())
    .bind(Utc::now().to_rfc3339())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to update daily note: {e}")))?;

    row.map(|r| {
        let workout_day_id: String = r.get("workout_day_id");
        Ok(DailyNote {
            id: row_id(&r)?,
            workout_day_id: parse_uuid(&workout_day_id)?,
            note: r.get("note"),
            updated_at: row_updated_at(&r)?,
        })
    })
    .transpose()
}

/// Delete an owned daily note; returns whether a row was removed
///
/// # Errors
///
/// Returns an error if the delete fails
pub async fn delete_daily_note(
    conn: &mut SqliteConnection,
    note_id: Uuid,
    user_id: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query(&format!(
        "DELETE FROM daily_notes WHERE id = $1 AND workout_day_id IN ({})",
        owned_days("$2")
    ))
    .bind(note_id.to_string())
    .bind(user_id.to_string())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to delete daily note: {e}")))?;
    Ok(result.rows_affected() > 0)
}

/// Attach a note to a workout exercise
///
/// # Errors
///
/// Returns a conflict if the exercise already has a note
pub async fn insert_exercise_note(
    conn: &mut SqliteConnection,
    workout_exercise_id: Uuid,
    note: &str,
) -> AppResult<ExerciseNote> {
    let exercise_note = ExerciseNote {
        id: Uuid::new_v4(),
        workout_exercise_id,
        note: note.to_owned(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO exercise_notes (id, workout_exercise_id, note, updated_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(exercise_note.id.to_string())
    .bind(workout_exercise_id.to_string())
    .bind(note)
    .bind(exercise_note.updated_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "Exercise already has a note"))?;

    Ok(exercise_note)
}

/// Replace the text of an owned exercise note
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn update_exercise_note(
    conn: &mut SqliteConnection,
    note_id: Uuid,
    user_id: Uuid,
    note: &str,
) -> AppResult<Option<ExerciseNote>> {
    let row = sqlx::query(&format!(
        "UPDATE exercise_notes SET note = $1, updated_at = $4 \
         WHERE id = $2 AND workout_exercise_id IN ({}) \
         RETURNING id, workout_exercise_id, note, updated_at",
        owned_workout_exercises("$3")
    ))
    .bind(note)
    .bind(note_id.to_string())
    .bind(user_id.to_string())
    .bind(Utc::now().to_rfc3339())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to update exercise note: {e}")))?;

    row.map(|r| {
        let workout_exercise_id: String = r.get("workout_exercise_id");
        Ok(ExerciseNote {
            id: row_id(&r)?,
            workout_exercise_id: parse_uuid(&workout_exercise_id)?,
            note: r.get("note"),
            updated_at: row_updated_at(&r)?,
        })
    })
    .transpose()
}

/// Delete an owned exercise note; returns whether a row was removed
///
/// # Errors
///
/// Returns an error if the delete fails
pub async fn delete_exercise_note(
    conn: &mut SqliteConnection,
    note_id: Uuid,
    user_id: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query(&format!(
        "DELETE FROM exercise_notes WHERE id = $1 AND workout_exercise_id IN ({})",
        owned_workout_exercises("$2")
    ))
    .bind(note_id.to_string())
    .bind(user_id.to_string())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to delete exercise note: {e}")))?;
    Ok(result.rows_affected() > 0)
}

fn row_id(row: &SqliteRow) -> AppResult<Uuid> {
    let id: String = row.get("id");
    parse_uuid(&id)
}

fn row_updated_at(row: &SqliteRow) -> AppResult<DateTime<Utc>> {
    let updated_at: String = row.get("updated_at");
    parse_timestamp(&updated_at)
}
