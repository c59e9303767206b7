// ABOUTME: Route handlers for programs and their workout day schedule
// ABOUTME: Create, list and activate programs; schedule days and read the active day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Program routes
//!
//! All endpoints require a bearer token; programs owned by other users are
//! reported as not found.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use liftlog_core::models::CreateProgramRequest;
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{AppJson, AppPath};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{programs, scheduler};

/// Body for POST /api/programs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramBody {
    /// Optional name; blank means generated
    #[serde(default)]
    pub name: Option<String>,
    /// Program length in weeks
    #[serde(alias = "duration_weeks")]
    pub duration_weeks: i64,
}

/// Body for POST /api/programs/:id/workout-days
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDaysBody {
    /// Weekdays to train on, Monday = 0
    pub weekdays: Vec<i64>,
    /// Must equal the program's duration
    #[serde(alias = "duration_weeks")]
    pub duration_weeks: i64,
}

/// Program routes handler
pub struct ProgramRoutes;

impl ProgramRoutes {
    /// Create all program routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/programs",
                post(Self::handle_create).get(Self::handle_list),
            )
            .route("/api/programs/active", get(Self::handle_get_active))
            .route("/api/programs/:id/activate", post(Self::handle_activate))
            .route(
                "/api/programs/:id/workout-days",
                post(Self::handle_schedule).get(Self::handle_list_days),
            )
            .route("/api/programs/:id/active-day", get(Self::handle_active_day))
            .with_state(resources)
    }

    /// Handle POST /api/programs
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(body): AppJson<CreateProgramBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let request = CreateProgramRequest {
            name: body.name,
            duration_weeks: body.duration_weeks,
        };
        let program = programs::create_program(&resources.database, user_id, &request).await?;
        Ok((StatusCode::CREATED, Json(program)).into_response())
    }

    /// Handle GET /api/programs
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let list = programs::list_programs(&resources.database, user_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/programs/active
    async fn handle_get_active(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let program = programs::get_active_program(&resources.database, user_id).await?;
        Ok((StatusCode::OK, Json(program)).into_response())
    }

    /// Handle POST /api/programs/:id/activate
    async fn handle_activate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(program_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let program = programs::activate_program(&resources.database, user_id, program_id).await?;
        Ok((StatusCode::OK, Json(program)).into_response())
    }

    /// Handle POST /api/programs/:id/workout-days
    async fn handle_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(program_id): AppPath<Uuid>,
        AppJson(body): AppJson<ScheduleDaysBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let days = scheduler::schedule_days(
            &resources.database,
            user_id,
            program_id,
            &body.weekdays,
            body.duration_weeks,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(days)).into_response())
    }

    /// Handle GET /api/programs/:id/workout-days
    async fn handle_list_days(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(program_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let days = scheduler::list_workout_days(&resources.database, user_id, program_id).await?;
        Ok((StatusCode::OK, Json(days)).into_response())
    }

    /// Handle GET /api/programs/:id/active-day
    async fn handle_active_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(program_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth_manager.authenticate(&headers)?;
        let day = scheduler::get_active_day(&resources.database, user_id, program_id)
            .await?
            .ok_or_else(|| AppError::not_found("Active workout day"))?;
        Ok((StatusCode::OK, Json(day)).into_response())
    }
}
