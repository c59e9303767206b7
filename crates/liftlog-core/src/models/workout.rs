// ABOUTME: Workout day, exercise, set and log models for program progression
// ABOUTME: Encodes the pending/active/completed day state machine and progression order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::weekday;
use crate::errors::AppError;

/// Day of the week, Monday = 0 through Sunday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Weekday(u8);

impl Weekday {
    /// Monday
    pub const MONDAY: Self = Self(0);
    /// Tuesday
    pub const TUESDAY: Self = Self(1);
    /// Wednesday
    pub const WEDNESDAY: Self = Self(2);
    /// Thursday
    pub const THURSDAY: Self = Self(3);
    /// Friday
    pub const FRIDAY: Self = Self(4);
    /// Saturday
    pub const SATURDAY: Self = Self(5);
    /// Sunday
    pub const SUNDAY: Self = Self(6);

    /// Zero-based index (Monday = 0)
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// English day name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "Monday",
            1 => "Tuesday",
            2 => "Wednesday",
            3 => "Thursday",
            4 => "Friday",
            5 => "Saturday",
            _ => "Sunday",
        }
    }
}

impl TryFrom<i64> for Weekday {
    type Error = AppError;

    // Range is checked before the cast
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (weekday::MIN..=weekday::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AppError::out_of_range(format!(
                "day_of_week must be between {} and {}, got {value}",
                weekday::MIN,
                weekday::MAX
            )))
        }
    }
}

impl From<Weekday> for i64 {
    fn from(day: Weekday) -> Self {
        Self::from(day.0)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scheduling state of a workout day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// Not yet reached
    Pending,
    /// The single day currently being trained
    Active,
    /// Finished; terminal
    Completed,
}

impl DayState {
    /// Decode the stored `(is_active, is_completed)` flag pair
    ///
    /// Completion wins over activity so a half-written row never reads as active.
    #[must_use]
    pub const fn from_flags(is_active: bool, is_completed: bool) -> Self {
        if is_completed {
            Self::Completed
        } else if is_active {
            Self::Active
        } else {
            Self::Pending
        }
    }

    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// One concrete (week, weekday) training day inside a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Unique identifier
    pub id: Uuid,
    /// Owning program
    pub program_id: Uuid,
    /// 1-based week number within the program
    pub week_number: i64,
    /// Weekday this day falls on
    pub day_of_week: Weekday,
    /// Whether the day has been completed
    pub is_completed: bool,
    /// Whether this is the program's current day
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl WorkoutDay {
    /// Current scheduling state
    #[must_use]
    pub const fn state(&self) -> DayState {
        DayState::from_flags(self.is_active, self.is_completed)
    }

    /// Progression key: lowest week first, then lowest weekday
    #[must_use]
    pub fn progression_key(&self) -> (i64, Weekday) {
        (self.week_number, self.day_of_week)
    }

    /// Compare two days by program progression order
    #[must_use]
    pub fn cmp_progression(&self, other: &Self) -> Ordering {
        self.progression_key().cmp(&other.progression_key())
    }
}

/// Result of completing the active day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCompletion {
    /// The day that was just completed
    pub completed: WorkoutDay,
    /// The day activated next, or `None` once every day is completed
    pub next_active: Option<WorkoutDay>,
}

/// An exercise placed on a workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique identifier
    pub id: Uuid,
    /// Day this exercise belongs to
    pub workout_day_id: Uuid,
    /// Catalog exercise
    pub exercise_id: Uuid,
    /// Position within the day
    pub order_index: i64,
}

/// A numbered set of a workout exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Unique identifier
    pub id: Uuid,
    /// Parent workout exercise
    pub workout_exercise_id: Uuid,
    /// 1-based, dense set number
    pub set_number: i64,
}

/// Performance recorded for one set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Unique identifier
    pub id: Uuid,
    /// Set that was performed
    pub exercise_set_id: Uuid,
    /// Repetitions performed
    pub reps: i64,
    /// Load used
    pub weight: f64,
    /// Rate of perceived exertion, 0-10
    pub rpe: Option<f64>,
    /// Whether the set counts as done
    pub is_completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Values submitted when logging a set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetPerformance {
    /// Repetitions performed
    pub reps: i64,
    /// Load used
    pub weight: f64,
    /// Optional rate of perceived exertion
    pub rpe: Option<f64>,
}

/// One entry of a day template: which exercise, at which position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Catalog exercise
    pub exercise_id: Uuid,
    /// Position within the day
    pub order_index: i64,
}

/// A workout exercise created by template population, with its seeded sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedExercise {
    /// The new workout exercise row
    pub workout_exercise: WorkoutExercise,
    /// Its default sets
    pub sets: Vec<ExerciseSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(week_number: i64, day_of_week: Weekday) -> WorkoutDay {
        WorkoutDay {
            id: Uuid::new_v4(),
            program_id: Uuid::nil(),
            week_number,
            day_of_week,
            is_completed: false,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_weekday_bounds() {
        assert_eq!(Weekday::try_from(0).unwrap(), Weekday::MONDAY);
        assert_eq!(Weekday::try_from(6).unwrap(), Weekday::SUNDAY);
        assert!(Weekday::try_from(7).is_err());
        assert!(Weekday::try_from(-1).is_err());
    }

    #[test]
    fn test_weekday_serde_is_numeric() {
        let json = serde_json::to_string(&Weekday::WEDNESDAY).unwrap();
        assert_eq!(json, "2");
        let parsed: Weekday = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, Weekday::FRIDAY);
        assert!(serde_json::from_str::<Weekday>("9").is_err());
    }

    #[test]
    fn test_state_from_flags() {
        assert_eq!(DayState::from_flags(false, false), DayState::Pending);
        assert_eq!(DayState::from_flags(true, false), DayState::Active);
        assert_eq!(DayState::from_flags(false, true), DayState::Completed);
        assert_eq!(DayState::from_flags(true, true), DayState::Completed);
    }

    #[test]
    fn test_progression_orders_week_before_weekday() {
        let mut days = vec![
            day(2, Weekday::MONDAY),
            day(1, Weekday::FRIDAY),
            day(1, Weekday::MONDAY),
            day(2, Weekday::WEDNESDAY),
        ];
        days.sort_by(WorkoutDay::cmp_progression);

        let keys: Vec<_> = days.iter().map(WorkoutDay::progression_key).collect();
        assert_eq!(
            keys,
            vec![
                (1, Weekday::MONDAY),
                (1, Weekday::FRIDAY),
                (2, Weekday::MONDAY),
                (2, Weekday::WEDNESDAY),
            ]
        );
    }
}
