// ABOUTME: Unified error handling with standard error codes and HTTP status mapping
// ABOUTME: Defines AppError, ErrorCode and the JSON error envelope returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Unified Error Handling System
//!
//! Every fallible operation in liftlog returns [`AppResult`]. The [`ErrorCode`]
//! carried by an [`AppError`] decides the HTTP status and the stable code string
//! clients match on, so services never deal with transport details.

#[cfg(feature = "http-response")]
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
#[cfg(feature = "http-response")]
use axum::response::{IntoResponse, Response};
#[cfg(feature = "http-response")]
use axum::Json;
#[cfg(feature = "http-response")]
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// When false, 5xx responses carry only the generic code description
static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose messages for server-side failures
///
/// Called once at startup; development mode turns this on.
pub fn set_expose_internal_details(enabled: bool) {
    EXPOSE_INTERNAL_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Whether verbose messages are returned for server-side failures
#[must_use]
pub fn exposes_internal_details() -> bool {
    EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed)
}

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// No credential was supplied
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Credential was supplied but could not be verified
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    /// Caller is authenticated but may not touch the resource
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    /// Malformed input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field is absent or blank
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Numeric input outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    /// A set was logged before all of its predecessors
    #[serde(rename = "SET_OUT_OF_SEQUENCE")]
    SetOutOfSequence = 3010,

    // Resource Management (4000-4999)
    /// Entity does not exist or is not visible to the caller
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Unique key collision
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    /// Entity is referenced elsewhere and cannot be modified
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,
    /// Requested transition is not valid from the current state
    #[serde(rename = "INVALID_STATE")]
    InvalidState = 4010,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Relational store failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// JSON encoding or decoding failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ValueOutOfRange
            | Self::SetOutOfSequence => 400,

            Self::AuthRequired | Self::AuthInvalid => 401,

            Self::PermissionDenied => 403,

            Self::ResourceNotFound => 404,

            Self::ResourceAlreadyExists | Self::ResourceLocked | Self::InvalidState => 409,

            Self::ConfigError
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::SetOutOfSequence => "Sets must be logged in order",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ResourceLocked => "The resource is in use and cannot be modified",
            Self::InvalidState => "The operation is not allowed in the current state",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code signals a server-side fault
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        self.http_status() >= 500
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            resource_id: None,
            details: serde_json::Value::Null,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
///
/// The request id is filled in by the request-id middleware, which finds this
/// value in the response extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of [`ErrorResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Message safe to show the caller
    pub message: String,
    /// Request ID, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured details
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let message = if error.code.is_server_fault() && !exposes_internal_details() {
            error.code.description().to_owned()
        } else {
            error.message
        };
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message,
                request_id: None,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing or blank
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{field} is required"),
        )
    }

    /// Numeric value outside its accepted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Set logged while an earlier set is still open
    #[must_use]
    pub fn set_out_of_sequence(unmet_set_number: i64, requested_set_number: i64) -> Self {
        Self::new(
            ErrorCode::SetOutOfSequence,
            format!(
                "Set {unmet_set_number} must be logged before set {requested_set_number}"
            ),
        )
        .with_details(serde_json::json!({
            "unmet_set_number": unmet_set_number,
            "requested_set_number": requested_set_number,
        }))
    }

    /// Unique key collision
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Resource in use
    pub fn locked(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceLocked, message)
    }

    /// State machine rejected the transition
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
        .with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let mapped = match &error {
            sqlx::Error::RowNotFound => Self::not_found("Record"),
            sqlx::Error::Database(db_error) => match db_error.kind() {
                ErrorKind::UniqueViolation => {
                    Self::conflict(format!("Duplicate value: {}", db_error.message()))
                }
                ErrorKind::ForeignKeyViolation => Self::invalid_input(format!(
                    "Referenced record does not exist: {}",
                    db_error.message()
                )),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    Self::invalid_input(format!("Constraint violated: {}", db_error.message()))
                }
                _ if is_lock_contention(db_error.code().as_deref()) => {
                    Self::conflict("Resource is being modified concurrently, retry the request")
                }
                _ => Self::database(format!("Database error: {}", db_error.message())),
            },
            other => Self::database(format!("Database error: {other}")),
        };
        mapped.with_source(error)
    }
}

/// `SQLITE_BUSY` or `SQLITE_LOCKED`, including their extended result codes
#[cfg(feature = "database-errors")]
fn is_lock_contention(code: Option<&str>) -> bool {
    const SQLITE_BUSY: i32 = 5;
    const SQLITE_LOCKED: i32 = 6;

    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

#[cfg(feature = "http-response")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.code.is_server_fault() {
            tracing::error!(code = ?self.code, error = %self, "Request failed with server error");
        } else {
            tracing::debug!(code = ?self.code, error = %self, "Request rejected");
        }

        let body = ErrorResponse::from(self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(feature = "http-response")]
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        Self::invalid_input(format!("Invalid request body: {detail}"))
    }
}

#[cfg(feature = "http-response")]
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        let detail = rejection.body_text();
        Self::invalid_input(format!("Invalid path parameter: {detail}"))
    }
}

#[cfg(feature = "http-response")]
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        let detail = rejection.body_text();
        Self::invalid_input(format!("Invalid query string: {detail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), 403);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::SetOutOfSequence.http_status(), 400);
        assert_eq!(ErrorCode::ResourceLocked.http_status(), 409);
        assert_eq!(ErrorCode::InvalidState.http_status(), 409);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_app_error_creation() {
        let error = AppError::not_found("Exercise").with_resource_id("ex-42");

        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "Exercise not found");
        assert_eq!(error.context.resource_id.as_deref(), Some("ex-42"));
    }

    #[test]
    fn test_out_of_sequence_names_unmet_set() {
        let error = AppError::set_out_of_sequence(2, 4);
        assert_eq!(error.code, ErrorCode::SetOutOfSequence);
        assert!(error.message.contains("Set 2"));
        assert_eq!(error.context.details["unmet_set_number"], 2);
    }

    #[test]
    fn test_server_fault_message_is_generic_by_default() {
        let response = ErrorResponse::from(AppError::database("disk I/O error at page 42"));
        assert_eq!(response.error.message, ErrorCode::DatabaseError.description());

        let response = ErrorResponse::from(AppError::invalid_input("reps must be positive"));
        assert_eq!(response.error.message, "reps must be positive");
    }

    #[cfg(feature = "database-errors")]
    #[test]
    fn test_lock_contention_codes() {
        assert!(is_lock_contention(Some("5")));
        assert!(is_lock_contention(Some("6")));
        // SQLITE_BUSY_SNAPSHOT
        assert!(is_lock_contention(Some("517")));
        // SQLITE_CONSTRAINT_UNIQUE
        assert!(!is_lock_contention(Some("2067")));
        assert!(!is_lock_contention(None));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::from(AppError::conflict("Exercise already exists"));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("RESOURCE_ALREADY_EXISTS"));
        assert!(!json.contains("details"));
    }
}
