// ABOUTME: Route handlers for a single workout day
// ABOUTME: Day log, completion, template population and the daily note
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use liftlog_core::models::TemplateEntry;
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{AppJson, AppPath};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{day_log, notes, scheduler, templates};

/// One exercise in a template request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntryBody {
    /// Catalog exercise id
    #[serde(alias = "exercise_id")]
    pub exercise_id: Uuid,
    /// Position within the day
    #[serde(alias = "order_index")]
    pub order_index: i64,
}

/// Body for POST /api/workout-days/:id/exercises
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateTemplateBody {
    /// Weekday of the target day, Monday = 0
    #[serde(alias = "day_of_week")]
    pub day_of_week: i64,
    /// Exercises to add, in order
    pub exercises: Vec<TemplateEntryBody>,
}

/// Body for creating a note
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    /// Note text
    pub note: String,
}

/// Workout day routes handler
pub struct WorkoutDayRoutes;

impl WorkoutDayRoutes {
    /// Create all workout day routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-days/:id/log", get(Self::handle_day_log))
            .route("/api/workout-days/:id/complete", post(Self::handle_complete))
            .route("/api/workout-days/:id/exercises", post(Self::handle_populate))
            .route("/api/workout-days/:id/note", post(Self::handle_create_note))
            .with_state(resources)
    }

    /// Handle GET /api/workout-days/:id/log
    async fn handle_day_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(day_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let log = day_log::get_day_log(&resources.database, user_id, day_id).await?;
        Ok((StatusCode::OK, Json(log)).into_response())
    }

    /// Handle POST /api/workout-days/:id/complete
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(day_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let completion =
            scheduler::complete_active_day(&resources.database, user_id, day_id).await?;
        Ok((StatusCode::OK, Json(completion)).into_response())
    }

    /// Handle POST /api/workout-days/:id/exercises
    async fn handle_populate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(day_id): AppPath<Uuid>,
        AppJson(body): AppJson<PopulateTemplateBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let entries: Vec<TemplateEntry> = body
            .exercises
            .iter()
            .map(|entry| TemplateEntry {
                exercise_id: entry.exercise_id,
                order_index: entry.order_index,
            })
            .collect();

        let populated = templates::populate_day_template(
            &resources.database,
            user_id,
            day_id,
            body.day_of_week,
            &entries,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(populated)).into_response())
    }

    /// Handle POST /api/workout-days/:id/note
    async fn handle_create_note(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(day_id): AppPath<Uuid>,
        AppJson(body): AppJson<NoteBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let note =
            notes::create_daily_note(&resources.database, user_id, day_id, &body.note).await?;
        Ok((StatusCode::CREATED, Json(note)).into_response())
    }
}
