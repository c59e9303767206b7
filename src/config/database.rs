// ABOUTME: Database URL configuration for file-backed and in-memory SQLite
// ABOUTME: Parses DATABASE_URL values into a typed connection target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/liftlog.db";

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns a config error for non-SQLite schemes or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.contains("://") && !trimmed.starts_with("sqlite://") {
            return Err(AppError::config(format!(
                "Unsupported database URL (only sqlite is supported): {trimmed}"
            )));
        }

        let path_str = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        // Query parameters are set programmatically
        let path_str = path_str.split('?').next().unwrap_or_default();

        match path_str {
            ":memory:" => Ok(Self::Memory),
            "" => Err(AppError::config("Database path must not be empty")),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/liftlog.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_and_file() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/x.db?mode=rwc").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/x.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("plain.db").unwrap().to_connection_string(),
            "sqlite:plain.db"
        );
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }
}
