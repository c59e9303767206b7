// ABOUTME: Template population: replicate a day's exercise list onto every day sharing its weekday
// ABOUTME: Covers all weeks of the program and seeds each new exercise with two sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::constants::sets::DEFAULT_SETS_PER_EXERCISE;
use liftlog_core::models::{PopulatedExercise, TemplateEntry, Weekday};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{exercise_sets, exercises, workout_days, workout_exercises, Database};
use crate::errors::{AppError, AppResult};

/// Add the listed exercises to every day on `day_of_week` in the day's program
///
/// Returns the created workout exercises with their sets, grouped by week.
///
/// # Errors
///
/// Returns a validation error for an empty list, a negative order index or a
/// weekday that does not match the day, and not-found for a day or exercise
/// the user cannot see
#[instrument(skip(database, entries), fields(user.id = %user_id, workout_day.id = %day_id, entries = entries.len()))]
pub async fn populate_day_template(
    database: &Database,
    user_id: Uuid,
    day_id: Uuid,
    day_of_week: i64,
    entries: &[TemplateEntry],
) -> AppResult<Vec<PopulatedExercise>> {
    let weekday = Weekday::try_from(day_of_week)?;
    if entries.is_empty() {
        return Err(AppError::missing_field("exercises"));
    }
    if let Some(entry) = entries.iter().find(|entry| entry.order_index < 0) {
        return Err(AppError::out_of_range(format!(
            "orderIndex must be 0 or greater, got {}",
            entry.order_index
        )));
    }

    let mut guard = database.begin().await?;

    let day = workout_days::get_owned_day(guard.executor()?, day_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout day"))?;

    if day.day_of_week != weekday {
        return Err(AppError::invalid_input(format!(
            "dayOfWeek {weekday} does not match the workout day ({})",
            day.day_of_week
        )));
    }

    for entry in entries {
        let visible = exercises::get_exercise(guard.executor()?, entry.exercise_id)
            .await?
            .is_some_and(|exercise| exercise.is_visible_to(user_id));
        if !visible {
            let exercise_id = entry.exercise_id.to_string();
            return Err(AppError::not_found("Exercise").with_resource_id(exercise_id));
        }
    }

    let targets =
        workout_days::days_on_weekday(guard.executor()?, day.program_id, weekday, None).await?;

    let mut populated = Vec::with_capacity(targets.len() * entries.len());
    for target in &targets {
        for entry in entries {
            let workout_exercise = workout_exercises::insert_workout_exercise(
                guard.executor()?,
                target.id,
                entry.exercise_id,
                entry.order_index,
            )
            .await?;

            let mut sets = Vec::new();
            for set_number in 1..=DEFAULT_SETS_PER_EXERCISE {
                sets.push(
                    exercise_sets::insert_set(guard.executor()?, workout_exercise.id, set_number)
                        .await?,
                );
            }

            populated.push(PopulatedExercise {
                workout_exercise,
                sets,
            });
        }
    }

    guard.commit().await?;

    info!(
        program.id = %day.program_id,
        weekday = %weekday,
        days = targets.len(),
        "Day template populated"
    );
    Ok(populated)
}
