// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HTTP port, database URL, JWT and CORS settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Environment-based configuration management

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::database::{DatabaseUrl, DEFAULT_DATABASE_URL};
use crate::errors::{AppError, AppResult};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default JWT lifetime
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// Longest accepted JWT lifetime (one week)
pub const MAX_JWT_EXPIRY_HOURS: i64 = 168;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: verbose errors, permissive CORS
    #[default]
    Development,
    /// Production: secrets required, generic 5xx bodies
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// JWT settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret; `None` means generate an ephemeral one at startup
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether any origin is allowed
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database: DatabaseUrl,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Server version (from Cargo.toml)
    pub server_version: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when a variable cannot be parsed, or when
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let http_port = match lookup("HTTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid HTTP_PORT '{raw}': {e}")))?,
            None => DEFAULT_HTTP_PORT,
        };

        let database = DatabaseUrl::parse_url(
            &lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
        )?;

        let jwt_secret = lookup("JWT_SECRET").filter(|secret| !secret.trim().is_empty());
        if jwt_secret.is_none() {
            if environment.is_production() {
                return Err(AppError::config(
                    "JWT_SECRET must be set when ENVIRONMENT=production",
                ));
            }
            warn!("JWT_SECRET not set; tokens will not survive a restart");
        }

        let jwt_expiry_hours = match lookup("JWT_EXPIRY_HOURS") {
            Some(raw) => parse_expiry_hours(&raw)?,
            None => DEFAULT_JWT_EXPIRY_HOURS,
        };

        let default_origins = if environment.is_production() { "" } else { "*" };
        let allowed_origins = parse_origins(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| default_origins.to_owned()),
        );

        Ok(Self {
            http_port,
            database,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            cors: CorsConfig { allowed_origins },
            environment,
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        })
    }

    /// Whether 5xx error bodies may carry internal messages
    #[must_use]
    pub const fn exposes_error_details(&self) -> bool {
        self.environment.is_development()
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Liftlog Server Configuration:\n\
             - Version: {}\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - JWT Expiry: {}h\n\
             - CORS Origins: {}",
            self.server_version,
            self.environment,
            self.http_port,
            self.database,
            if self.auth.jwt_secret.is_some() {
                "Configured"
            } else {
                "Ephemeral"
            },
            self.auth.jwt_expiry_hours,
            if self.cors.allowed_origins.is_empty() {
                "(none)".to_owned()
            } else {
                self.cors.allowed_origins.join(", ")
            },
        )
    }
}

fn parse_expiry_hours(raw: &str) -> AppResult<i64> {
    let hours = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| AppError::config(format!("Invalid JWT_EXPIRY_HOURS '{raw}': {e}")))?;
    if (1..=MAX_JWT_EXPIRY_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(AppError::config(format!(
            "JWT_EXPIRY_HOURS must be between 1 and {MAX_JWT_EXPIRY_HOURS}, got {hours}"
        )))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.auth.jwt_expiry_hours, DEFAULT_JWT_EXPIRY_HOURS);
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.cors.allows_any());
        assert!(config.exposes_error_details());
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(config_from(&[("ENVIRONMENT", "production")]).is_err());

        let config = config_from(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "s3cret")])
            .unwrap();
        assert!(config.environment.is_production());
        assert!(!config.exposes_error_details());
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("HTTP_PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("JWT_EXPIRY_HOURS", "0")]).is_err());
        assert!(config_from(&[("JWT_EXPIRY_HOURS", "169")]).is_err());
        assert!(config_from(&[("DATABASE_URL", "mysql://db")]).is_err());
    }

    #[test]
    fn test_origin_list() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:5173, https://app.example.com,",
        )])
        .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:5173", "https://app.example.com"]
        );
        assert!(!config.cors.allows_any());
    }
}
