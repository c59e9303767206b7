// ABOUTME: Exercise catalog schema plus the global muscle groups and default exercises
// ABOUTME: Seeding is idempotent so it runs on every startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use tracing::info;
use uuid::Uuid;

use super::{now_rfc3339, Database};
use crate::errors::{AppError, AppResult};

/// Global muscle groups
pub const DEFAULT_MUSCLE_GROUPS: &[&str] = &[
    "Chest",
    "Back",
    "Shoulders",
    "Biceps",
    "Triceps",
    "Quadriceps",
    "Hamstrings",
    "Glutes",
    "Calves",
    "Core",
];

/// Global default exercises as (name, muscle group)
pub const DEFAULT_EXERCISES: &[(&str, &str)] = &[
    ("Bench Press", "Chest"),
    ("Incline Dumbbell Press", "Chest"),
    ("Push-Up", "Chest"),
    ("Deadlift", "Back"),
    ("Pull-Up", "Back"),
    ("Barbell Row", "Back"),
    ("Lat Pulldown", "Back"),
    ("Overhead Press", "Shoulders"),
    ("Lateral Raise", "Shoulders"),
    ("Barbell Curl", "Biceps"),
    ("Hammer Curl", "Biceps"),
    ("Tricep Pushdown", "Triceps"),
    ("Skull Crusher", "Triceps"),
    ("Back Squat", "Quadriceps"),
    ("Front Squat", "Quadriceps"),
    ("Leg Press", "Quadriceps"),
    ("Romanian Deadlift", "Hamstrings"),
    ("Leg Curl", "Hamstrings"),
    ("Hip Thrust", "Glutes"),
    ("Standing Calf Raise", "Calves"),
    ("Plank", "Core"),
    ("Hanging Leg Raise", "Core"),
];

impl Database {
    /// Create muscle group and exercise tables
    ///
    /// Name uniqueness is case-insensitive and ignores soft-deleted rows, so a
    /// deleted custom exercise can be recreated under the same name.
    pub(super) async fn migrate_catalog(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS muscle_groups (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                muscle_group_id TEXT NOT NULL REFERENCES muscle_groups(id),
                user_id TEXT REFERENCES users(id) ON DELETE CASCADE,
                is_default INTEGER NOT NULL DEFAULT 0 CHECK (is_default IN (0, 1)),
                is_deleted INTEGER NOT NULL DEFAULT 0 CHECK (is_deleted IN (0, 1)),
                created_at TEXT NOT NULL,
                CHECK ((is_default = 1 AND user_id IS NULL) OR (is_default = 0 AND user_id IS NOT NULL))
            )
            ",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_default_name
            ON exercises(name COLLATE NOCASE)
            WHERE is_default = 1 AND is_deleted = 0
            ",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_user_name
            ON exercises(user_id, name COLLATE NOCASE)
            WHERE user_id IS NOT NULL AND is_deleted = 0
            ",
            "CREATE INDEX IF NOT EXISTS idx_exercises_muscle_group ON exercises(muscle_group_id)",
        ])
        .await
    }

    /// Insert any missing global muscle groups and default exercises
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails
    pub async fn seed_default_catalog(&self) -> AppResult<()> {
        let mut guard = self.begin().await?;
        let mut inserted = 0_u64;

        for name in DEFAULT_MUSCLE_GROUPS {
            inserted += sqlx::query("INSERT OR IGNORE INTO muscle_groups (id, name) VALUES ($1, $2)")
                .bind(Uuid::new_v4().to_string())
                .bind(name)
                .execute(&mut *guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to seed muscle group: {e}")))?
                .rows_affected();
        }

        let now = now_rfc3339();
        for (name, group) in DEFAULT_EXERCISES {
            inserted += sqlx::query(
                r"
                INSERT INTO exercises (id, name, muscle_group_id, user_id, is_default, is_deleted, created_at)
                SELECT $1, $2, mg.id, NULL, 1, 0, $3
                FROM muscle_groups mg
                WHERE mg.name = $4
                  AND NOT EXISTS (
                      SELECT 1 FROM exercises e
                      WHERE e.is_default = 1 AND e.is_deleted = 0 AND e.name = $2 COLLATE NOCASE
                  )
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .bind(&now)
            .bind(group)
            .execute(&mut *guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed exercise: {e}")))?
            .rows_affected();
        }

        guard.commit().await?;
        if inserted > 0 {
            info!(rows = inserted, "Seeded default exercise catalog");
        }
        Ok(())
    }
}
