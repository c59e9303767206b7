// ABOUTME: Set propagation engine: add or remove the last set, optionally in every later week
// ABOUTME: Targets share program, weekday and catalog exercise with a strictly greater week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Each target computes its own current maximum set number, so weeks whose
//! set counts have diverged stay internally dense. The origin and all targets
//! change in one transaction; a failure on any target rolls back the whole
//! operation.

use liftlog_core::models::ExerciseSet;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{exercise_sets, workout_exercises, Database};
use crate::errors::{AppError, AppResult};

/// Append one set to a workout exercise and, with `propagate`, to its future occurrences
///
/// Returns the inserted sets, origin first, then later weeks in week order.
///
/// # Errors
///
/// Returns not-found if the workout exercise is not owned by the user, or a
/// conflict if a concurrent request raced for the same set number
#[instrument(skip(database), fields(user.id = %user_id, workout_exercise.id = %workout_exercise_id))]
pub async fn add_set(
    database: &Database,
    user_id: Uuid,
    workout_exercise_id: Uuid,
    propagate: bool,
) -> AppResult<Vec<ExerciseSet>> {
    let mut guard = database.begin().await?;

    let origin =
        workout_exercises::get_owned_context(guard.executor()?, workout_exercise_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout exercise"))?;

    let origin_set = exercise_sets::append_set(guard.executor()?, workout_exercise_id).await?;
    let mut inserted = vec![origin_set];

    if propagate {
        let targets = workout_exercises::future_occurrences(guard.executor()?, &origin).await?;
        for target in targets {
            inserted.push(exercise_sets::append_set(guard.executor()?, target.id).await?);
        }
    }

    guard.commit().await?;

    info!(
        week = origin.week_number,
        propagate,
        inserted = inserted.len(),
        "Sets added"
    );
    Ok(inserted)
}

/// Remove the highest-numbered set and, with `propagate`, do the same in future occurrences
///
/// Exercises without sets are skipped. Returns the deleted sets, origin first.
///
/// # Errors
///
/// Returns not-found if the workout exercise is not owned by the user
#[instrument(skip(database), fields(user.id = %user_id, workout_exercise.id = %workout_exercise_id))]
pub async fn remove_last_set(
    database: &Database,
    user_id: Uuid,
    workout_exercise_id: Uuid,
    propagate: bool,
) -> AppResult<Vec<ExerciseSet>> {
    let mut guard = database.begin().await?;

    let origin =
        workout_exercises::get_owned_context(guard.executor()?, workout_exercise_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout exercise"))?;

    let origin_set = exercise_sets::delete_last_set(guard.executor()?, workout_exercise_id).await?;
    let mut removed: Vec<ExerciseSet> = origin_set.into_iter().collect();

    if propagate {
        let targets = workout_exercises::future_occurrences(guard.executor()?, &origin).await?;
        for target in targets {
            removed.extend(exercise_sets::delete_last_set(guard.executor()?, target.id).await?);
        }
    }

    guard.commit().await?;

    info!(
        week = origin.week_number,
        propagate,
        removed = removed.len(),
        "Sets removed"
    );
    Ok(removed)
}
