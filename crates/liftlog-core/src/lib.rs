// ABOUTME: Core types and constants for the liftlog workout tracker
// ABOUTME: Foundation crate with error handling, domain models, validation and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Shared types for the liftlog server. This crate has no database or HTTP
//! dependency unless the matching feature is enabled.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the JSON error envelope
//! - **constants**: Program, weekday, set and text limits
//! - **models**: Programs, workout days, exercises, sets, logs, notes
//! - **validation**: Range checks and text normalization

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Input validation shared by services and routes
pub mod validation;
