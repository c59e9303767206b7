// ABOUTME: Day log assembler: groups flat join rows into day -> exercises -> sets
// ABOUTME: Attaches last week's completed logs by catalog exercise and set number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::collections::HashMap;

use liftlog_core::models::{DayLog, DayLogExercise, DayLogSet, SetLog};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::database::day_log::{self, CompletedSetLog, DayLogRow};
use crate::database::{workout_days, Database};
use crate::errors::{AppError, AppResult};

/// Build the full view of one owned workout day
///
/// Read-only; safe to call repeatedly while the day is in progress.
///
/// # Errors
///
/// Returns not-found if the day does not exist or belongs to someone else
#[instrument(skip(database), fields(user.id = %user_id, workout_day.id = %day_id))]
pub async fn get_day_log(database: &Database, user_id: Uuid, day_id: Uuid) -> AppResult<DayLog> {
    let mut conn = database.acquire().await?;

    let (day, daily_note) = day_log::fetch_day_header(&mut conn, day_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout day"))?;

    let rows = day_log::fetch_exercise_rows(&mut conn, day.id).await?;
    let mut exercises = group_day_rows(rows);

    if day.week_number > 1 {
        let previous_day = workout_days::find_day(
            &mut conn,
            day.program_id,
            day.week_number - 1,
            day.day_of_week,
        )
        .await?;

        if let Some(previous_day) = previous_day {
            let previous = day_log::fetch_completed_logs(&mut conn, previous_day.id).await?;
            debug!(
                previous_day.id = %previous_day.id,
                logs = previous.len(),
                "Attaching previous week logs"
            );
            attach_previous_logs(&mut exercises, &previous);
        }
    }

    Ok(DayLog {
        id: day.id,
        program_id: day.program_id,
        week_number: day.week_number,
        day_of_week: day.day_of_week,
        state: day.state(),
        daily_note,
        exercises,
    })
}

/// Group rows ordered by exercise then set number into nested exercises
///
/// Rows of one workout exercise are contiguous; an exercise without sets
/// arrives as a single row with no set.
pub(crate) fn group_day_rows(rows: Vec<DayLogRow>) -> Vec<DayLogExercise> {
    let mut exercises: Vec<DayLogExercise> = Vec::new();

    for row in rows {
        let starts_new = exercises
            .last()
            .is_none_or(|current| current.id != row.workout_exercise_id);

        if starts_new {
            exercises.push(DayLogExercise {
                id: row.workout_exercise_id,
                exercise_id: row.exercise_id,
                name: row.exercise_name,
                muscle_group: row.muscle_group,
                order_index: row.order_index,
                note: row.exercise_note,
                sets: Vec::new(),
            });
        }

        if let (Some(current), Some((set_id, set_number))) = (exercises.last_mut(), row.set) {
            current.sets.push(DayLogSet {
                id: set_id,
                set_number,
                log: row.log,
                previous_log: None,
            });
        }
    }

    exercises
}

/// Attach completed logs from the previous week to matching sets
///
/// Matching is by catalog exercise and set number because workout exercise
/// ids differ between weeks.
pub(crate) fn attach_previous_logs(exercises: &mut [DayLogExercise], previous: &[CompletedSetLog]) {
    let mut by_key: HashMap<(Uuid, i64), SetLog> = HashMap::with_capacity(previous.len());
    for entry in previous {
        by_key
            .entry((entry.exercise_id, entry.set_number))
            .or_insert(entry.log);
    }

    for exercise in exercises {
        for set in &mut exercise.sets {
            set.previous_log = by_key.get(&(exercise.exercise_id, set.set_number)).copied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(workout_exercise_id: Uuid, exercise_id: Uuid, set: Option<(Uuid, i64)>) -> DayLogRow {
        DayLogRow {
            workout_exercise_id,
            exercise_id,
            exercise_name: "Bench Press".to_owned(),
            muscle_group: "Chest".to_owned(),
            order_index: 0,
            exercise_note: None,
            set,
            log: None,
        }
    }

    fn log(reps: i64) -> SetLog {
        SetLog {
            reps,
            weight: 60.0,
            rpe: Some(8.0),
            completed: true,
        }
    }

    #[test]
    fn test_group_rows_keeps_exercise_and_set_order() {
        let (we_a, we_b) = (Uuid::new_v4(), Uuid::new_v4());
        let exercise = Uuid::new_v4();
        let rows = vec![
            row(we_a, exercise, Some((Uuid::new_v4(), 1))),
            row(we_a, exercise, Some((Uuid::new_v4(), 2))),
            row(we_b, Uuid::new_v4(), None),
        ];

        let grouped = group_day_rows(rows);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, we_a);
        let numbers: Vec<i64> = grouped[0].sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(grouped[1].id, we_b);
        assert!(grouped[1].sets.is_empty());
    }

    #[test]
    fn test_previous_logs_match_by_exercise_and_set_number() {
        let exercise = Uuid::new_v4();
        let other_exercise = Uuid::new_v4();
        let mut grouped = group_day_rows(vec![
            row(Uuid::new_v4(), exercise, Some((Uuid::new_v4(), 1))),
            row(Uuid::new_v4(), exercise, Some((Uuid::new_v4(), 3))),
        ]);
        // Two rows with different workout exercise ids form two exercises
        assert_eq!(grouped.len(), 2);

        attach_previous_logs(
            &mut grouped,
            &[
                CompletedSetLog {
                    exercise_id: exercise,
                    set_number: 3,
                    log: log(5),
                },
                CompletedSetLog {
                    exercise_id: other_exercise,
                    set_number: 1,
                    log: log(9),
                },
            ],
        );

        assert_eq!(grouped[0].sets[0].previous_log, None);
        assert_eq!(grouped[1].sets[0].previous_log, Some(log(5)));
    }
}
