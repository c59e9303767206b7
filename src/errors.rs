// ABOUTME: Unified error handling re-exported from liftlog-core
// ABOUTME: Server modules import AppError and AppResult from here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Unified Error Handling System
//!
//! The error taxonomy lives in `liftlog_core::errors` so the core crate and the
//! server share one `AppError`. With the `http-response` feature enabled the
//! error converts straight into an axum response.

pub use liftlog_core::errors::*;
