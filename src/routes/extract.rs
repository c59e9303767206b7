// ABOUTME: Request extractors whose rejections use the standard JSON error envelope
// ABOUTME: Malformed bodies, query strings and path ids become INVALID_INPUT errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::Json;

use crate::errors::AppError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Typed query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
