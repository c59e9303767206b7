// ABOUTME: Exercise catalog and muscle group models
// ABOUTME: Catalog entries are either global defaults or owned by a single user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A muscle group used to categorize exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroup {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
}

/// A catalog exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Muscle group this exercise trains
    pub muscle_group_id: Uuid,
    /// Muscle group name, when joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group_name: Option<String>,
    /// Owner for custom exercises; `None` for global defaults
    pub user_id: Option<Uuid>,
    /// Whether this is a global default exercise
    pub is_default: bool,
    /// Soft-delete flag
    pub is_deleted: bool,
}

impl Exercise {
    /// Whether `user_id` may use this exercise in a template
    #[must_use]
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        !self.is_deleted && (self.is_default || self.user_id == Some(user_id))
    }
}
