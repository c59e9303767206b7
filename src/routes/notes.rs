// ABOUTME: Route handlers for editing and deleting daily and exercise notes
// ABOUTME: Notes are created through their parent day or workout exercise routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::patch;
use axum::{Json, Router};
use uuid::Uuid;

use super::extract::{AppJson, AppPath};
use super::workout_days::NoteBody;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::notes;

/// Note routes handler
pub struct NoteRoutes;

impl NoteRoutes {
    /// Create all note routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/daily-notes/:id",
                patch(Self::handle_edit_daily).delete(Self::handle_delete_daily),
            )
            .route(
                "/api/exercise-notes/:id",
                patch(Self::handle_edit_exercise).delete(Self::handle_delete_exercise),
            )
            .with_state(resources)
    }

    async fn handle_edit_daily(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(note_id): AppPath<Uuid>,
        AppJson(body): AppJson<NoteBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let note = notes::edit_daily_note(&resources.database, user_id, note_id, &body.note).await?;
        Ok((StatusCode::OK, Json(note)).into_response())
    }

    async fn handle_delete_daily(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(note_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        notes::delete_daily_note(&resources.database, user_id, note_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    async fn handle_edit_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(note_id): AppPath<Uuid>,
        AppJson(body): AppJson<NoteBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let note =
            notes::edit_exercise_note(&resources.database, user_id, note_id, &body.note).await?;
        Ok((StatusCode::OK, Json(note)).into_response())
    }

    async fn handle_delete_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(note_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        notes::delete_exercise_note(&resources.database, user_id, note_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
