// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for HTTP, database, auth and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Configuration module for the liftlog server
//!
//! All settings come from environment variables; the binary lets `--http-port`
//! and `--database-url` override the two most common ones.

/// Database URL parsing
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::DatabaseUrl;
pub use environment::{AuthConfig, CorsConfig, Environment, ServerConfig};
