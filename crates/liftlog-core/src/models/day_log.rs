// ABOUTME: Read-model for a workout day with exercises, sets, logs and notes
// ABOUTME: Each set also carries the matching log from the previous week, when one exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::workout::{DayState, Weekday};

/// Logged values for a set, as shown in a day log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
    /// Repetitions performed
    pub reps: i64,
    /// Load used
    pub weight: f64,
    /// Rate of perceived exertion
    pub rpe: Option<f64>,
    /// Whether the set counts as done
    pub completed: bool,
}

/// Note reference embedded in a day log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    /// Note id, used for edit and delete
    pub id: Uuid,
    /// Note text
    pub note: String,
}

/// One set row inside a day log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLogSet {
    /// Exercise set id
    pub id: Uuid,
    /// 1-based set number
    pub set_number: i64,
    /// This week's log, if any
    pub log: Option<SetLog>,
    /// Completed log for the same exercise and set number one week earlier
    pub previous_log: Option<SetLog>,
}

/// One exercise inside a day log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLogExercise {
    /// Workout exercise id
    pub id: Uuid,
    /// Catalog exercise id
    pub exercise_id: Uuid,
    /// Catalog exercise name
    pub name: String,
    /// Muscle group name
    pub muscle_group: String,
    /// Position within the day
    pub order_index: i64,
    /// Exercise note, if any
    pub note: Option<NoteRef>,
    /// Sets ordered by set number
    pub sets: Vec<DayLogSet>,
}

/// Full view of one workout day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    /// Workout day id
    pub id: Uuid,
    /// Owning program
    pub program_id: Uuid,
    /// 1-based week number
    pub week_number: i64,
    /// Weekday
    pub day_of_week: Weekday,
    /// Scheduling state
    pub state: DayState,
    /// Daily note, if any
    pub daily_note: Option<NoteRef>,
    /// Exercises ordered by `order_index`
    pub exercises: Vec<DayLogExercise>,
}
