// ABOUTME: User account model
// ABOUTME: The credential hash never leaves the server in serialized form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique, lowercase email
    pub email: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
