// ABOUTME: Route handlers for account registration and login
// ABOUTME: Both return a bearer token used by every other API route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::extract::AppJson;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Credentials for register and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Account email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let response = resources
            .auth_manager
            .register(&resources.database, &body.email, &body.password)
            .await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let response = resources
            .auth_manager
            .login(&resources.database, &body.email, &body.password)
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
