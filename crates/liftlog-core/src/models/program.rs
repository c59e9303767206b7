// ABOUTME: Training program model with owner, duration and active flag
// ABOUTME: At most one program per user carries is_active at any time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multi-week training program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Program length in weeks (4-16)
    pub duration_weeks: i64,
    /// Whether this is the user's current program
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProgramRequest {
    /// Optional name; blank names get a generated default
    pub name: Option<String>,
    /// Program length in weeks
    pub duration_weeks: i64,
}
