// ABOUTME: Domain models for programs, workout days, exercises, sets, logs and notes
// ABOUTME: Re-exports every model so callers import from liftlog_core::models directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Data Models
//!
//! A user owns programs. A program is expanded into workout days, one per
//! (week, weekday) pair. Days hold ordered workout exercises, which hold
//! numbered sets, which may carry one log each.

mod day_log;
mod exercise;
mod note;
mod program;
mod user;
mod workout;

// Program domain
pub use program::{CreateProgramRequest, Program};

// Scheduling and logging domain
pub use workout::{
    DayCompletion, DayState, ExerciseLog, ExerciseSet, PopulatedExercise, SetPerformance,
    TemplateEntry, Weekday, WorkoutDay, WorkoutExercise,
};

// Day log read-model
pub use day_log::{DayLog, DayLogExercise, DayLogSet, NoteRef, SetLog};

// Catalog domain
pub use exercise::{Exercise, MuscleGroup};

// Notes
pub use note::{DailyNote, ExerciseNote};

// Users
pub use user::User;
