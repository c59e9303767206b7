// ABOUTME: Daily and exercise note operations with owner checks
// ABOUTME: Text is trimmed and must not be blank; edits are last-write-wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{DailyNote, ExerciseNote};
use liftlog_core::validation::normalize_note;
use uuid::Uuid;

use crate::database::{notes, workout_days, workout_exercises, Database};
use crate::errors::{AppError, AppResult};

/// Attach a note to an owned workout day
///
/// # Errors
///
/// Returns a validation error for blank text, not-found for a foreign day,
/// or a conflict if the day already has a note
pub async fn create_daily_note(
    database: &Database,
    user_id: Uuid,
    day_id: Uuid,
    text: &str,
) -> AppResult<DailyNote> {
    let text = normalize_note(text)?;
    let mut guard = database.begin().await?;

    workout_days::get_owned_day(guard.executor()?, day_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout day"))?;
    let note = notes::insert_daily_note(guard.executor()?, day_id, &text).await?;

    guard.commit().await?;
    Ok(note)
}

/// Replace the text of an owned daily note
///
/// # Errors
///
/// Returns a validation error for blank text or not-found for a foreign note
pub async fn edit_daily_note(
    database: &Database,
    user_id: Uuid,
    note_id: Uuid,
    text: &str,
) -> AppResult<DailyNote> {
    let text = normalize_note(text)?;
    let mut conn = database.acquire().await?;
    notes::update_daily_note(&mut conn, note_id, user_id, &text)
        .await?
        .ok_or_else(|| AppError::not_found("Daily note"))
}

/// Delete an owned daily note
///
/// # Errors
///
/// Returns not-found for a foreign or missing note
pub async fn delete_daily_note(database: &Database, user_id: Uuid, note_id: Uuid) -> AppResult<()> {
    let mut conn = database.acquire().await?;
    if notes::delete_daily_note(&mut conn, note_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Daily note"))
    }
}

/// Attach a note to an owned workout exercise
///
/// # Errors
///
/// Returns a validation error for blank text, not-found for a foreign
/// workout exercise, or a conflict if it already has a note
pub async fn create_exercise_note(
    database: &Database,
    user_id: Uuid,
    workout_exercise_id: Uuid,
    text: &str,
) -> AppResult<ExerciseNote> {
    let text = normalize_note(text)?;
    let mut guard = database.begin().await?;

    workout_exercises::get_owned_context(guard.executor()?, workout_exercise_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout exercise"))?;
    let note = notes::insert_exercise_note(guard.executor()?, workout_exercise_id, &text).await?;

    guard.commit().await?;
    Ok(note)
}

/// Replace the text of an owned exercise note
///
/// # Errors
///
/// Returns a validation error for blank text or not-found for a foreign note
pub async fn edit_exercise_note(
    database: &Database,
    user_id: Uuid,
    note_id: Uuid,
    text: &str,
) -> AppResult<ExerciseNote> {
    let text = normalize_note(text)?;
    let mut conn = database.acquire().await?;
    notes::update_exercise_note(&mut conn, note_id, user_id, &text)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise note"))
}

/// Delete an owned exercise note
///
/// # Errors
///
/// Returns not-found for a foreign or missing note
pub async fn delete_exercise_note(
    database: &Database,
    user_id: Uuid,
    note_id: Uuid,
) -> AppResult<()> {
    let mut conn = database.acquire().await?;
    if notes::delete_exercise_note(&mut conn, note_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Exercise note"))
    }
}
