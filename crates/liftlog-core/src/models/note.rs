// ABOUTME: Free-text notes attached to workout days and workout exercises
// ABOUTME: One note per parent row, edits are last-write-wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note for a whole workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    /// Unique identifier
    pub id: Uuid,
    /// Day the note belongs to
    pub workout_day_id: Uuid,
    /// Note text
    pub note: String,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Note for one exercise on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseNote {
    /// Unique identifier
    pub id: Uuid,
    /// Workout exercise the note belongs to
    pub workout_exercise_id: Uuid,
    /// Note text
    pub note: String,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}
