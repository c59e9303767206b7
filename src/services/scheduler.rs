// ABOUTME: Workout day scheduler: expands weekdays x weeks into days and moves the active pointer
// ABOUTME: Progression order is week ascending then weekday ascending; completed is terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Workout Day Scheduler
//!
//! Each workout day is `pending`, `active` or `completed`. At most one day per
//! program is active, and it is always the earliest day that is neither
//! active nor completed at the moment of activation:
//!
//! ```text
//! pending --(earliest pending, no active day)--> active --(complete)--> completed
//! ```
//!
//! When the last day is completed no day becomes active and the program's
//! cycle is finished.

use liftlog_core::models::{DayCompletion, DayState, WorkoutDay};
use liftlog_core::validation::{normalize_weekdays, validate_duration_weeks};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{programs, workout_days, Database};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Create every day of the program upfront and activate the first one
///
/// Weekdays are de-duplicated. `duration_weeks` must equal the program's own
/// duration, and a program can only be scheduled once.
///
/// # Errors
///
/// Returns a validation error for bad weekdays or duration, not-found for a
/// program the user does not own, or a conflict if days already exist
#[instrument(skip(database, weekdays), fields(user.id = %user_id, program.id = %program_id))]
pub async fn schedule_days(
    database: &Database,
    user_id: Uuid,
    program_id: Uuid,
    weekdays: &[i64],
    duration_weeks: i64,
) -> AppResult<Vec<WorkoutDay>> {
    let weekdays = normalize_weekdays(weekdays)?;
    let duration_weeks = validate_duration_weeks(duration_weeks)?;

    let mut guard = database.begin().await?;

    let program = programs::get_owned_program(guard.executor()?, program_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Program"))?;

    if program.duration_weeks != duration_weeks {
        return Err(AppError::invalid_input(format!(
            "durationWeeks must match the program duration of {} weeks",
            program.duration_weeks
        )));
    }

    if workout_days::count_days(guard.executor()?, program_id).await? > 0 {
        return Err(AppError::conflict(
            "Workout days already scheduled for this program",
        ));
    }

    let mut days = Vec::new();
    for week_number in 1..=duration_weeks {
        for &weekday in &weekdays {
            let day = workout_days::insert_day(guard.executor()?, program_id, week_number, weekday)
                .await?;
            days.push(day);
        }
    }

    let activated = workout_days::activate_earliest_pending(guard.executor()?, program_id).await?;
    guard.commit().await?;

    if let Some(active) = &activated {
        if let Some(day) = days.iter_mut().find(|day| day.id == active.id) {
            day.is_active = true;
        }
        AppLogger::log_day_transition(
            &program_id.to_string(),
            &active.id.to_string(),
            DayState::Pending.as_str(),
            DayState::Active.as_str(),
        );
    }

    info!(days = days.len(), "Workout days scheduled");
    Ok(days)
}

/// The active day of an owned program
///
/// `None` means every day is completed (or none was scheduled yet).
///
/// # Errors
///
/// Returns not-found if the program does not exist or belongs to someone else
#[instrument(skip(database), fields(user.id = %user_id, program.id = %program_id))]
pub async fn get_active_day(
    database: &Database,
    user_id: Uuid,
    program_id: Uuid,
) -> AppResult<Option<WorkoutDay>> {
    let mut conn = database.acquire().await?;

    programs::get_owned_program(&mut conn, program_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Program"))?;

    workout_days::get_active_day(&mut conn, program_id, user_id).await
}

/// Complete the active day and activate the next pending one
///
/// # Errors
///
/// Returns not-found for a day the user does not own, or an invalid-state
/// error when the day is pending or already completed
#[instrument(skip(database), fields(user.id = %user_id, workout_day.id = %day_id))]
pub async fn complete_active_day(
    database: &Database,
    user_id: Uuid,
    day_id: Uuid,
) -> AppResult<DayCompletion> {
    let mut guard = database.begin().await?;

    let day = workout_days::get_owned_day(guard.executor()?, day_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout day"))?;

    match day.state() {
        DayState::Active => {}
        DayState::Completed => {
            return Err(AppError::invalid_state("Workout day is already completed"));
        }
        DayState::Pending => {
            return Err(AppError::invalid_state(
                "Only the active workout day can be completed",
            ));
        }
    }

    let completed = workout_days::complete_active(guard.executor()?, day_id)
        .await?
        .ok_or_else(|| AppError::invalid_state("Workout day is no longer active"))?;
    let next_active =
        workout_days::activate_earliest_pending(guard.executor()?, day.program_id).await?;
    guard.commit().await?;

    let program_id = day.program_id.to_string();
    AppLogger::log_day_transition(
        &program_id,
        &completed.id.to_string(),
        DayState::Active.as_str(),
        DayState::Completed.as_str(),
    );
    match &next_active {
        Some(next) => AppLogger::log_day_transition(
            &program_id,
            &next.id.to_string(),
            DayState::Pending.as_str(),
            DayState::Active.as_str(),
        ),
        None => info!(program.id = %program_id, "Program cycle finished"),
    }

    Ok(DayCompletion {
        completed,
        next_active,
    })
}

/// All days of an owned program in progression order
///
/// # Errors
///
/// Returns not-found if the program does not exist or belongs to someone else
pub async fn list_workout_days(
    database: &Database,
    user_id: Uuid,
    program_id: Uuid,
) -> AppResult<Vec<WorkoutDay>> {
    let mut conn = database.acquire().await?;

    programs::get_owned_program(&mut conn, program_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Program"))?;

    workout_days::list_days(&mut conn, program_id).await
}
