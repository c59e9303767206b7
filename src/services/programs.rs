// ABOUTME: Program lifecycle: creation with default naming, activation and listing
// ABOUTME: Every write keeps exactly one active program per user inside a single transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::Utc;
use liftlog_core::constants::program::DEFAULT_NAME_PREFIX;
use liftlog_core::models::{CreateProgramRequest, Program};
use liftlog_core::validation::{normalize_program_name, validate_duration_weeks};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::{programs, Database};
use crate::errors::{AppError, AppResult};

/// Generated name for a user's next program: "My Program {N+1}"
///
/// Not guaranteed unique if programs are deleted or created concurrently.
#[must_use]
pub fn default_program_name(existing_programs: i64) -> String {
    format!("{DEFAULT_NAME_PREFIX} {}", existing_programs + 1)
}

/// Create a program and make it the user's only active one
///
/// # Errors
///
/// Returns a validation error for an out-of-range duration or an over-long
/// name, or a database error if the insert fails
#[instrument(skip(database, request), fields(user.id = %user_id))]
pub async fn create_program(
    database: &Database,
    user_id: Uuid,
    request: &CreateProgramRequest,
) -> AppResult<Program> {
    let duration_weeks = validate_duration_weeks(request.duration_weeks)?;
    let name = normalize_program_name(request.name.as_deref())?;

    let mut guard = database.begin().await?;

    let name = match name {
        Some(name) => name,
        None => default_program_name(programs::count_programs(guard.executor()?, user_id).await?),
    };

    let deactivated = programs::deactivate_all(guard.executor()?, user_id).await?;

    let program = Program {
        id: Uuid::new_v4(),
        user_id,
        name,
        duration_weeks,
        is_active: true,
        created_at: Utc::now(),
    };
    programs::insert_program(guard.executor()?, &program).await?;
    guard.commit().await?;

    info!(
        program.id = %program.id,
        program.weeks = program.duration_weeks,
        deactivated,
        "Program created and activated"
    );
    Ok(program)
}

/// The user's active program
///
/// # Errors
///
/// Returns not-found when the user has no active program
#[instrument(skip(database), fields(user.id = %user_id))]
pub async fn get_active_program(database: &Database, user_id: Uuid) -> AppResult<Program> {
    let mut conn = database.acquire().await?;
    programs::get_active_program(&mut conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Active program"))
}

/// All of the user's programs, oldest first
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_programs(database: &Database, user_id: Uuid) -> AppResult<Vec<Program>> {
    let mut conn = database.acquire().await?;
    programs::list_programs(&mut conn, user_id).await
}

/// Make an owned program the active one, deactivating all others
///
/// # Errors
///
/// Returns not-found if the program does not exist or belongs to someone else
#[instrument(skip(database), fields(user.id = %user_id, program.id = %program_id))]
pub async fn activate_program(
    database: &Database,
    user_id: Uuid,
    program_id: Uuid,
) -> AppResult<Program> {
    let mut guard = database.begin().await?;

    let program = programs::get_owned_program(guard.executor()?, program_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Program"))?;

    if program.is_active {
        guard.commit().await?;
        return Ok(program);
    }

    programs::deactivate_all(guard.executor()?, user_id).await?;
    programs::activate(guard.executor()?, program_id, user_id).await?;
    guard.commit().await?;

    info!("Program activated");
    Ok(Program {
        is_active: true,
        ..program
    })
}
