// ABOUTME: Route handlers for the exercise catalog and muscle groups
// ABOUTME: Default exercises are read-only; custom exercises belong to their creator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::exercises;

/// Query for GET /api/exercises
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExercisesQuery {
    /// Restrict to one muscle group
    #[serde(default, alias = "muscle_group_id")]
    pub muscle_group_id: Option<Uuid>,
}

/// Body for POST /api/exercises
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseBody {
    /// Exercise name
    pub name: String,
    /// Muscle group the exercise trains
    #[serde(alias = "muscle_group_id")]
    pub muscle_group_id: Uuid,
}

/// Body for PATCH /api/exercises/:id
#[derive(Debug, Deserialize)]
pub struct RenameExerciseBody {
    /// New name
    pub name: String,
}

/// Exercise catalog routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/exercises",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/exercises/custom", get(Self::handle_list_custom))
            .route(
                "/api/exercises/:id",
                patch(Self::handle_rename).delete(Self::handle_delete),
            )
            .route("/api/muscle-groups", get(Self::handle_muscle_groups))
            .with_state(resources)
    }

    /// Handle GET /api/exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppQuery(query): AppQuery<ListExercisesQuery>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let list =
            exercises::list_exercises(&resources.database, user_id, query.muscle_group_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle POST /api/exercises
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(body): AppJson<CreateExerciseBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let exercise = exercises::create_custom_exercise(
            &resources.database,
            user_id,
            &body.name,
            body.muscle_group_id,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    /// Handle GET /api/exercises/custom
    async fn handle_list_custom(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let list = exercises::list_custom_exercises(&resources.database, user_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle PATCH /api/exercises/:id
    async fn handle_rename(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(exercise_id): AppPath<Uuid>,
        AppJson(body): AppJson<RenameExerciseBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let exercise =
            exercises::rename_custom_exercise(&resources.database, user_id, exercise_id, &body.name)
                .await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Handle DELETE /api/exercises/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(exercise_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        exercises::delete_custom_exercise(&resources.database, user_id, exercise_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/muscle-groups
    async fn handle_muscle_groups(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth_manager.authenticate(&headers)?;
        let groups = exercises::list_muscle_groups(&resources.database).await?;
        Ok((StatusCode::OK, Json(groups)).into_response())
    }
}
