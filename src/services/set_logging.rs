// ABOUTME: Sequential set logging: a set can be logged only after all lower-numbered sets
// ABOUTME: The order check and the insert share one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{ExerciseLog, SetPerformance};
use liftlog_core::validation::validate_set_performance;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{exercise_logs, exercise_sets, Database};
use crate::errors::{AppError, AppResult};

/// Record reps, weight and optional RPE for an owned set
///
/// # Errors
///
/// Returns a validation error for bad values, not-found for a set the user
/// does not own, `SET_OUT_OF_SEQUENCE` naming the first earlier set without a
/// completed log, or a conflict if the set was already logged
#[instrument(skip(database, performance), fields(user.id = %user_id, exercise_set.id = %set_id))]
pub async fn log_set(
    database: &Database,
    user_id: Uuid,
    set_id: Uuid,
    performance: SetPerformance,
) -> AppResult<ExerciseLog> {
    validate_set_performance(&performance)?;

    let mut guard = database.begin().await?;

    let set = exercise_sets::get_owned_set(guard.executor()?, set_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise set"))?;

    let unmet = exercise_logs::first_unlogged_before(
        guard.executor()?,
        set.workout_exercise_id,
        set.set_number,
    )
    .await?;
    if let Some(unmet) = unmet {
        return Err(AppError::set_out_of_sequence(unmet, set.set_number));
    }

    let log = exercise_logs::insert_log(guard.executor()?, set.id, performance).await?;
    guard.commit().await?;

    info!(set_number = set.set_number, reps = log.reps, "Set logged");
    Ok(log)
}
