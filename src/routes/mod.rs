// ABOUTME: Route module organization for the liftlog HTTP API
// ABOUTME: Assembles domain routers and the shared tracing, request-id, CORS and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Route module for the liftlog server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that authenticate the caller and delegate to the service layer.

/// Account registration and login
pub mod auth;
/// Exercise catalog and muscle groups
pub mod exercises;
/// Extractors that reject with the JSON error envelope
pub mod extract;
/// Health check routes
pub mod health;
/// Note edit and delete routes
pub mod notes;
/// Program and schedule routes
pub mod programs;
/// Workout day routes: day log, completion, template and daily note
pub mod workout_days;
/// Set add/remove, set logging and exercise note routes
pub mod workout_exercises;

pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use notes::NoteRoutes;
pub use programs::ProgramRoutes;
pub use workout_days::WorkoutDayRoutes;
pub use workout_exercises::WorkoutExerciseRoutes;

use std::sync::Arc;

use axum::body::Body;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{attach_request_id, make_request_span, setup_cors, RequestIdGenerator};
use crate::resources::ServerResources;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(HealthRoutes::ready_routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ProgramRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutDayRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutExerciseRoutes::routes(Arc::clone(&resources)))
        .merge(NoteRoutes::routes(Arc::clone(&resources)))
        .merge(ExerciseRoutes::routes(resources))
        .layer(from_fn(attach_request_id))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
}
