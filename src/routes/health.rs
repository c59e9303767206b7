// ABOUTME: Health check route handlers for liveness and readiness checks
// ABOUTME: Readiness also confirms the database answers a trivial query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Liveness route, needs no shared state
    pub fn routes() -> Router {
        async fn health_handler() -> Json<Value> {
            Json(json!({
                "status": "healthy",
                "service": "liftlog-server",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": Utc::now().to_rfc3339()
            }))
        }

        Router::new().route("/health", get(health_handler))
    }

    /// Readiness route that pings the database
    pub fn ready_routes(resources: Arc<ServerResources>) -> Router {
        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> AppResult<Json<Value>> {
            sqlx::query("SELECT 1")
                .execute(resources.database.pool())
                .await
                .map_err(|e| AppError::database(format!("Readiness check failed: {e}")))?;

            Ok(Json(json!({
                "status": "ready",
                "timestamp": Utc::now().to_rfc3339()
            })))
        }

        Router::new()
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
