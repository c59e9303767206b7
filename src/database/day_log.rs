// ABOUTME: Flat join queries behind the day log read-model
// ABOUTME: One row per (workout exercise, set) with left-joined logs and notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{NoteRef, SetLog, WorkoutDay};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::workout_days::row_to_day;
use super::parse_uuid;
use crate::errors::{AppError, AppResult};

/// One joined row of a day's exercises and sets
///
/// Set and log columns are `None` for exercises without sets and for sets
/// without a log.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLogRow {
    /// Workout exercise id
    pub workout_exercise_id: Uuid,
    /// Catalog exercise id
    pub exercise_id: Uuid,
    /// Catalog exercise name
    pub exercise_name: String,
    /// Muscle group name
    pub muscle_group: String,
    /// Position within the day
    pub order_index: i64,
    /// Exercise note, if any
    pub exercise_note: Option<NoteRef>,
    /// Set id and number, if the exercise has sets
    pub set: Option<(Uuid, i64)>,
    /// Log for the set, if any
    pub log: Option<SetLog>,
}

/// A completed log keyed by catalog exercise and set number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedSetLog {
    /// Catalog exercise id
    pub exercise_id: Uuid,
    /// Set number within its workout exercise
    pub set_number: i64,
    /// The logged values
    pub log: SetLog,
}

/// Fetch an owned day with its daily note
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_day_header(
    conn: &mut SqliteConnection,
    day_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<(WorkoutDay, Option<NoteRef>)>> {
    let row = sqlx::query(
        r"
        SELECT wd.id AS id, wd.program_id AS program_id, wd.week_number AS week_number,
               wd.day_of_week AS day_of_week, wd.is_completed AS is_completed,
               wd.is_active AS is_active, wd.created_at AS created_at,
               dn.id AS note_id, dn.note AS note
        FROM workout_days wd
        JOIN programs p ON p.id = wd.program_id
        LEFT JOIN daily_notes dn ON dn.workout_day_id = wd.id
        WHERE wd.id = $1 AND p.user_id = $2
        ",
    )
    .bind(day_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get day log header: {e}")))?;

    row.map(|r| Ok((row_to_day(&r)?, note_ref(&r, "note_id", "note")?)))
        .transpose()
}

/// Exercises and sets of a day, ordered by `order_index` then `set_number`
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_exercise_rows(
    conn: &mut SqliteConnection,
    day_id: Uuid,
) -> AppResult<Vec<DayLogRow>> {
    let rows = sqlx::query(
        r"
        SELECT we.id AS workout_exercise_id, we.exercise_id AS exercise_id,
               we.order_index AS order_index,
               e.name AS exercise_name, mg.name AS muscle_group,
               en.id AS note_id, en.note AS note,
               es.id AS set_id, es.set_number AS set_number,
               el.reps AS reps, el.weight AS weight, el.rpe AS rpe,
               el.is_completed AS is_completed
        FROM workout_exercises we
        JOIN exercises e ON e.id = we.exercise_id
        JOIN muscle_groups mg ON mg.id = e.muscle_group_id
        LEFT JOIN exercise_notes en ON en.workout_exercise_id = we.id
        LEFT JOIN exercise_sets es ON es.workout_exercise_id = we.id
        LEFT JOIN exercise_logs el ON el.exercise_set_id = es.id
        WHERE we.workout_day_id = $1
        ORDER BY we.order_index, we.rowid, es.set_number
        ",
    )
    .bind(day_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get day log exercises: {e}")))?;

    rows.iter().map(row_to_day_log_row).collect()
}

/// Completed logs of a day keyed by catalog exercise and set number
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_completed_logs(
    conn: &mut SqliteConnection,
    day_id: Uuid,
) -> AppResult<Vec<CompletedSetLog>> {
    let rows = sqlx::query(
        r"
        SELECT we.exercise_id AS exercise_id, es.set_number AS set_number,
               el.reps AS reps, el.weight AS weight, el.rpe AS rpe
        FROM workout_exercises we
        JOIN exercise_sets es ON es.workout_exercise_id = we.id
        JOIN exercise_logs el ON el.exercise_set_id = es.id
        WHERE we.workout_day_id = $1 AND el.is_completed = 1
        ORDER BY we.order_index, we.rowid, es.set_number
        ",
    )
    .bind(day_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get previous logs: {e}")))?;

    rows.iter()
        .map(|row| {
            let exercise_id: String = row.get("exercise_id");
            Ok(CompletedSetLog {
                exercise_id: parse_uuid(&exercise_id)?,
                set_number: row.get("set_number"),
                log: SetLog {
                    reps: row.get("reps"),
                    weight: row.get("weight"),
                    rpe: row.get("rpe"),
                    completed: true,
                },
            })
        })
        .collect()
}

fn row_to_day_log_row(row: &SqliteRow) -> AppResult<DayLogRow> {
    let workout_exercise_id: String = row.get("workout_exercise_id");
    let exercise_id: String = row.get("exercise_id");
    let set_id: Option<String> = row.get("set_id");
    let set_number: Option<i64> = row.get("set_number");

    let set = match (set_id, set_number) {
        (Some(id), Some(number)) => Some((parse_uuid(&id)?, number)),
        _ => None,
    };

    let reps: Option<i64> = row.get("reps");
    let weight: Option<f64> = row.get("weight");
    let is_completed: Option<i64> = row.get("is_completed");
    let log = match (reps, weight) {
        (Some(reps), Some(weight)) => Some(SetLog {
            reps,
            weight,
            rpe: row.get("rpe"),
            completed: is_completed == Some(1),
        }),
        _ => None,
    };

    Ok(DayLogRow {
        workout_exercise_id: parse_uuid(&workout_exercise_id)?,
        exercise_id: parse_uuid(&exercise_id)?,
        exercise_name: row.get("exercise_name"),
        muscle_group: row.get("muscle_group"),
        order_index: row.get("order_index"),
        exercise_note: note_ref(row, "note_id", "note")?,
        set,
        log,
    })
}

fn note_ref(row: &SqliteRow, id_column: &str, text_column: &str) -> AppResult<Option<NoteRef>> {
    let id: Option<String> = row.get(id_column);
    let note: Option<String> = row.get(text_column);
    match (id, note) {
        (Some(id), Some(note)) => Ok(Some(NoteRef {
            id: parse_uuid(&id)?,
            note,
        })),
        _ => Ok(None),
    }
}
