// ABOUTME: Exercise catalog operations: list visible, create, rename and soft-delete custom exercises
// ABOUTME: Names are unique case-insensitively across the user's own and the default exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use liftlog_core::models::{Exercise, MuscleGroup};
use liftlog_core::validation::normalize_exercise_name;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{exercises, Database, SqliteTransactionGuard};
use crate::errors::{AppError, AppResult};

const NAME_TAKEN: &str = "An exercise with this name already exists";

/// All muscle groups by name
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_muscle_groups(database: &Database) -> AppResult<Vec<MuscleGroup>> {
    let mut conn = database.acquire().await?;
    exercises::list_muscle_groups(&mut conn).await
}

/// Default exercises plus the user's own, optionally limited to one muscle group
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_exercises(
    database: &Database,
    user_id: Uuid,
    muscle_group_id: Option<Uuid>,
) -> AppResult<Vec<Exercise>> {
    let mut conn = database.acquire().await?;
    exercises::list_visible_exercises(&mut conn, user_id, muscle_group_id).await
}

/// The user's own non-deleted exercises
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_custom_exercises(database: &Database, user_id: Uuid) -> AppResult<Vec<Exercise>> {
    let mut conn = database.acquire().await?;
    exercises::list_custom_exercises(&mut conn, user_id).await
}

/// Create a custom exercise owned by the user
///
/// # Errors
///
/// Returns a validation error for a blank name, not-found for an unknown
/// muscle group, or a conflict if the name is already visible to the user
#[instrument(skip(database), fields(user.id = %user_id))]
pub async fn create_custom_exercise(
    database: &Database,
    user_id: Uuid,
    name: &str,
    muscle_group_id: Uuid,
) -> AppResult<Exercise> {
    let name = normalize_exercise_name(name)?;

    let mut guard = database.begin().await?;

    if !exercises::muscle_group_exists(guard.executor()?, muscle_group_id).await? {
        return Err(AppError::not_found("Muscle group"));
    }
    if exercises::visible_name_taken(guard.executor()?, user_id, &name, None).await? {
        return Err(AppError::conflict(NAME_TAKEN));
    }

    let exercise = Exercise {
        id: Uuid::new_v4(),
        name,
        muscle_group_id,
        muscle_group_name: None,
        user_id: Some(user_id),
        is_default: false,
        is_deleted: false,
    };
    exercises::insert_exercise(guard.executor()?, &exercise).await?;
    let created = reload(&mut guard, exercise.id).await?;
    guard.commit().await?;

    info!(exercise.id = %created.id, "Custom exercise created");
    Ok(created)
}

/// Rename one of the user's custom exercises
///
/// # Errors
///
/// Returns not-found for default, deleted or foreign exercises, or a conflict
/// if the new name is already visible to the user
#[instrument(skip(database), fields(user.id = %user_id, exercise.id = %exercise_id))]
pub async fn rename_custom_exercise(
    database: &Database,
    user_id: Uuid,
    exercise_id: Uuid,
    name: &str,
) -> AppResult<Exercise> {
    let name = normalize_exercise_name(name)?;

    let mut guard = database.begin().await?;

    owned_custom_exercise(&mut guard, user_id, exercise_id).await?;
    if exercises::visible_name_taken(guard.executor()?, user_id, &name, Some(exercise_id)).await? {
        return Err(AppError::conflict(NAME_TAKEN));
    }
    exercises::rename_exercise(guard.executor()?, exercise_id, user_id, &name).await?;
    let renamed = reload(&mut guard, exercise_id).await?;
    guard.commit().await?;

    Ok(renamed)
}

/// Soft-delete one of the user's custom exercises
///
/// # Errors
///
/// Returns not-found for default, deleted or foreign exercises, or
/// `RESOURCE_LOCKED` while any workout still references the exercise
#[instrument(skip(database), fields(user.id = %user_id, exercise.id = %exercise_id))]
pub async fn delete_custom_exercise(
    database: &Database,
    user_id: Uuid,
    exercise_id: Uuid,
) -> AppResult<()> {
    let mut guard = database.begin().await?;

    owned_custom_exercise(&mut guard, user_id, exercise_id).await?;
    if exercises::exercise_in_use(guard.executor()?, exercise_id).await? {
        return Err(AppError::locked(
            "Exercise is used in a workout and cannot be deleted",
        ));
    }
    exercises::soft_delete_exercise(guard.executor()?, exercise_id, user_id).await?;
    guard.commit().await?;

    info!("Custom exercise deleted");
    Ok(())
}

async fn owned_custom_exercise(
    guard: &mut SqliteTransactionGuard<'_>,
    user_id: Uuid,
    exercise_id: Uuid,
) -> AppResult<Exercise> {
    exercises::get_exercise(guard.executor()?, exercise_id)
        .await?
        .filter(|e| !e.is_default && !e.is_deleted && e.user_id == Some(user_id))
        .ok_or_else(|| AppError::not_found("Exercise"))
}

async fn reload(guard: &mut SqliteTransactionGuard<'_>, exercise_id: Uuid) -> AppResult<Exercise> {
    exercises::get_exercise(guard.executor()?, exercise_id)
        .await?
        .ok_or_else(|| AppError::internal("Exercise disappeared inside its own transaction"))
}
