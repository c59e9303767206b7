// ABOUTME: Route handlers for sets of a workout exercise and for logging a set
// ABOUTME: Add/remove accept a propagate flag that extends the change to later weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use liftlog_core::models::SetPerformance;
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{AppJson, AppPath, AppQuery};
use super::workout_days::NoteBody;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{notes, set_logging, set_propagation};

/// Propagation flag, as a JSON body or query parameter
#[derive(Debug, Default, Deserialize)]
pub struct PropagateParams {
    /// Apply the change to the same exercise on the same weekday in later weeks
    #[serde(default)]
    pub propagate: bool,
}

/// Body for POST /api/exercise-sets/:id/log
#[derive(Debug, Deserialize)]
pub struct LogSetBody {
    /// Repetitions performed
    pub reps: i64,
    /// Load used
    pub weight: f64,
    /// Optional rate of perceived exertion
    #[serde(default)]
    pub rpe: Option<f64>,
}

/// Workout exercise and set routes handler
pub struct WorkoutExerciseRoutes;

impl WorkoutExerciseRoutes {
    /// Create all set routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-exercises/:id/sets", post(Self::handle_add_set))
            .route(
                "/api/workout-exercises/:id/sets/last",
                delete(Self::handle_remove_last_set),
            )
            .route(
                "/api/workout-exercises/:id/note",
                post(Self::handle_create_note),
            )
            .route("/api/exercise-sets/:id/log", post(Self::handle_log_set))
            .with_state(resources)
    }

    /// Handle POST /api/workout-exercises/:id/sets
    async fn handle_add_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(workout_exercise_id): AppPath<Uuid>,
        AppJson(params): AppJson<PropagateParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let sets = set_propagation::add_set(
            &resources.database,
            user_id,
            workout_exercise_id,
            params.propagate,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(sets)).into_response())
    }

    /// Handle DELETE /api/workout-exercises/:id/sets/last
    async fn handle_remove_last_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(workout_exercise_id): AppPath<Uuid>,
        AppQuery(params): AppQuery<PropagateParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let sets = set_propagation::remove_last_set(
            &resources.database,
            user_id,
            workout_exercise_id,
            params.propagate,
        )
        .await?;
        Ok((StatusCode::OK, Json(sets)).into_response())
    }

    /// Handle POST /api/workout-exercises/:id/note
    async fn handle_create_note(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(workout_exercise_id): AppPath<Uuid>,
        AppJson(body): AppJson<NoteBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let note = notes::create_exercise_note(
            &resources.database,
            user_id,
            workout_exercise_id,
            &body.note,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(note)).into_response())
    }

    /// Handle POST /api/exercise-sets/:id/log
    async fn handle_log_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(set_id): AppPath<Uuid>,
        AppJson(body): AppJson<LogSetBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let performance = SetPerformance {
            reps: body.reps,
            weight: body.weight,
            rpe: body.rpe,
        };
        let log = set_logging::log_set(&resources.database, user_id, set_id, performance).await?;
        Ok((StatusCode::CREATED, Json(log)).into_response())
    }
}
