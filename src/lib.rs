// ABOUTME: Main library entry point for the Liftlog workout tracking backend
// ABOUTME: Program scheduling, template propagation, set logging and the HTTP API over them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![deny(unsafe_code)]

//! # Liftlog Server
//!
//! A backend for multi-week strength training programs. A user creates a
//! program, schedules training weekdays across its weeks, fills one day with
//! exercises and sees the same template copied to every matching weekday,
//! then logs sets in order while the server tracks which day is active.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` schema and typed query functions
//! - **Services**: the scheduling, propagation and logging engine
//! - **Routes**: axum handlers that authenticate and delegate to services
//! - **Auth**: bcrypt password hashing and `JWT` bearer tokens
//! - **Config**: environment-driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog_server::config::environment::ServerConfig;
//! use liftlog_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Liftlog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management
pub mod config;

/// `SQLite` persistence and migrations
pub mod database;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request tracing and CORS
pub mod middleware;

/// Shared state handed to every route
pub mod resources;

/// `HTTP` routes for the public `API`
pub mod routes;

/// Scheduling, propagation and logging engine
pub mod services;

pub use liftlog_core::{constants, models, validation};
