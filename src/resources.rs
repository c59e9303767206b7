// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Built once at startup so handlers never re-create pools or signing keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;

/// Resources shared across all request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Connection pool and query layer
    pub database: Database,
    /// Token issuing and validation
    pub auth_manager: AuthManager,
    /// Effective server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the long-lived server components
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database,
            auth_manager,
            config: Arc::new(config),
        }
    }
}
