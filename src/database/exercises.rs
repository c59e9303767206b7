// ABOUTME: Exercise catalog and muscle group queries
// ABOUTME: Visibility is "global default or owned by the caller, and not soft-deleted"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{Exercise, MuscleGroup};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{map_unique_violation, now_rfc3339, parse_uuid};
use crate::errors::{AppError, AppResult};

const EXERCISE_COLUMNS: &str = r"
    e.id AS id, e.name AS name, e.muscle_group_id AS muscle_group_id,
    mg.name AS muscle_group_name, e.user_id AS user_id,
    e.is_default AS is_default, e.is_deleted AS is_deleted
";

/// List all muscle groups by name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_muscle_groups(conn: &mut SqliteConnection) -> AppResult<Vec<MuscleGroup>> {
    let rows = sqlx::query("SELECT id, name FROM muscle_groups ORDER BY name")
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to list muscle groups: {e}")))?;

    rows.iter()
        .map(|row| {
            let id: String = row.get("id");
            Ok(MuscleGroup {
                id: parse_uuid(&id)?,
                name: row.get("name"),
            })
        })
        .collect()
}

/// Whether a muscle group exists
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn muscle_group_exists(conn: &mut SqliteConnection, id: Uuid) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM muscle_groups WHERE id = $1")
        .bind(id.to_string())
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check muscle group: {e}")))?;
    Ok(count > 0)
}

/// Get an exercise by id regardless of owner or deletion state
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_exercise(conn: &mut SqliteConnection, id: Uuid) -> AppResult<Option<Exercise>> {
    let row = sqlx::query(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises e \
         JOIN muscle_groups mg ON mg.id = e.muscle_group_id WHERE e.id = $1"
    ))
    .bind(id.to_string())
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

    row.map(|r| row_to_exercise(&r)).transpose()
}

/// Defaults plus the user's own exercises, optionally filtered by muscle group
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_visible_exercises(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    muscle_group_id: Option<Uuid>,
) -> AppResult<Vec<Exercise>> {
    let rows = sqlx::query(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises e \
         JOIN muscle_groups mg ON mg.id = e.muscle_group_id \
         WHERE e.is_deleted = 0 AND (e.is_default = 1 OR e.user_id = $1) \
           AND ($2 IS NULL OR e.muscle_group_id = $2) \
         ORDER BY e.name COLLATE NOCASE"
    ))
    .bind(user_id.to_string())
    .bind(muscle_group_id.map(|id| id.to_string()))
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

    rows.iter().map(row_to_exercise).collect()
}

/// The user's own non-deleted custom exercises
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_custom_exercises(
    conn: &mut SqliteConnection,
    user_id: Uuid,
) -> AppResult<Vec<Exercise>> {
    let rows = sqlx::query(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises e \
         JOIN muscle_groups mg ON mg.id = e.muscle_group_id \
         WHERE e.is_deleted = 0 AND e.is_default = 0 AND e.user_id = $1 \
         ORDER BY e.name COLLATE NOCASE"
    ))
    .bind(user_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list custom exercises: {e}")))?;

    rows.iter().map(row_to_exercise).collect()
}

/// Whether `name` collides (case-insensitively) with a visible exercise
///
/// `exclude` skips the exercise being renamed.
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn visible_name_taken(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    name: &str,
    exclude: Option<Uuid>,
) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*) FROM exercises
        WHERE name = $1 COLLATE NOCASE
          AND is_deleted = 0
          AND (is_default = 1 OR user_id = $2)
          AND ($3 IS NULL OR id <> $3)
        ",
    )
    .bind(name)
    .bind(user_id.to_string())
    .bind(exclude.map(|id| id.to_string()))
    .fetch_one(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to check exercise name: {e}")))?;
    Ok(count > 0)
}

/// Insert a custom exercise
///
/// # Errors
///
/// Returns a conflict if the owner already has a live exercise with this name
pub async fn insert_exercise(conn: &mut SqliteConnection, exercise: &Exercise) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO exercises (id, name, muscle_group_id, user_id, is_default, is_deleted, created_at)
        VALUES ($1, $2, $3, $4, $5, 0, $6)
        ",
    )
    .bind(exercise.id.to_string())
    .bind(&exercise.name)
    .bind(exercise.muscle_group_id.to_string())
    .bind(exercise.user_id.map(|id| id.to_string()))
    .bind(exercise.is_default)
    .bind(now_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "An exercise with this name already exists"))?;
    Ok(())
}

/// Rename a live custom exercise owned by `user_id`; returns whether a row changed
///
/// # Errors
///
/// Returns a conflict if the new name is taken
pub async fn rename_exercise(
    conn: &mut SqliteConnection,
    id: Uuid,
    user_id: Uuid,
    name: &str,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE exercises SET name = $1
        WHERE id = $2 AND user_id = $3 AND is_default = 0 AND is_deleted = 0
        ",
    )
    .bind(name)
    .bind(id.to_string())
    .bind(user_id.to_string())
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "An exercise with this name already exists"))?;
    Ok(result.rows_affected() > 0)
}

/// Soft-delete a live custom exercise owned by `user_id`; returns whether a row changed
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn soft_delete_exercise(
    conn: &mut SqliteConnection,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE exercises SET is_deleted = 1
        WHERE id = $1 AND user_id = $2 AND is_default = 0 AND is_deleted = 0
        ",
    )
    .bind(id.to_string())
    .bind(user_id.to_string())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to delete exercise: {e}")))?;
    Ok(result.rows_affected() > 0)
}

/// Whether any workout exercise references this catalog exercise
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn exercise_in_use(conn: &mut SqliteConnection, id: Uuid) -> AppResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workout_exercises WHERE exercise_id = $1")
            .bind(id.to_string())
            .fetch_one(conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to check exercise usage: {e}")))?;
    Ok(count > 0)
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let id: String = row.get("id");
    let muscle_group_id: String = row.get("muscle_group_id");
    let user_id: Option<String> = row.get("user_id");
    let is_default: i64 = row.get("is_default");
    let is_deleted: i64 = row.get("is_deleted");

    Ok(Exercise {
        id: parse_uuid(&id)?,
        name: row.get("name"),
        muscle_group_id: parse_uuid(&muscle_group_id)?,
        muscle_group_name: row.get("muscle_group_name"),
        user_id: user_id.as_deref().map(parse_uuid).transpose()?,
        is_default: is_default == 1,
        is_deleted: is_deleted == 1,
    })
}
