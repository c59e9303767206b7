// ABOUTME: JWT-based authentication: account registration, login and bearer token validation
// ABOUTME: Route handlers only ever receive the resolved user id from this module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Authentication
//!
//! Tokens are HS256 JWTs carrying the user id in `sub` and the service name in
//! `aud`. Password hashing runs on the blocking thread pool so a bcrypt round
//! never stalls the async runtime.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use liftlog_core::constants::service_names::LIFTLOG_SERVER;
use liftlog_core::models::User;
use liftlog_core::validation::{normalize_email, validate_password};
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::database::{users, Database};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Message for every failed login, so callers cannot tell which emails exist
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired,
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not a well-formed `JWT`
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired => write!(f, "JWT token has expired"),
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        Self::auth_invalid(error.to_string())
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Token returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token
    pub token: String,
    /// Token expiry
    pub expires_at: DateTime<Utc>,
    /// The authenticated user
    pub user: User,
}

/// Issues and validates session tokens and manages account credentials
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Create a manager from an HMAC secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a manager from configuration
    ///
    /// Without a configured secret a random one is generated, which
    /// invalidates all tokens on restart.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        match &config.jwt_secret {
            Some(secret) => Self::new(secret.as_bytes(), config.jwt_expiry_hours),
            None => {
                warn!("JWT_SECRET not set, using an ephemeral signing secret");
                let secret: [u8; 32] = rand::random();
                Self::new(&secret, config.jwt_expiry_hours)
            }
        }
    }

    /// Override the bcrypt work factor
    #[must_use]
    pub const fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Generate a token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: LIFTLOG_SERVER.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;
        Ok((token, expires_at))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a `JwtValidationError` for expired, tampered or malformed tokens
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[LIFTLOG_SERVER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => JwtValidationError::TokenMalformed {
                    details: e.to_string(),
                },
                _ => JwtValidationError::TokenInvalid {
                    reason: e.to_string(),
                },
            })
    }

    /// Resolve the caller's user id from an `Authorization: Bearer` header
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the header is missing or not a bearer
    /// token, and `AUTH_INVALID` when the token fails validation
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::auth_required)?;

        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a user id"))
    }

    /// Create an account and return a session token
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email or weak password, or
    /// a conflict if the email is already registered
    pub async fn register(
        &self,
        database: &Database,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        let email = normalize_email(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password.to_owned(), self.bcrypt_cost).await?;
        let user = User::new(email, password_hash);

        let mut conn = database.acquire().await?;
        let result = users::insert_user(&mut conn, &user).await;
        AppLogger::log_auth_event(&user.email, "register", result.is_ok());
        result?;

        self.respond(user)
    }

    /// Check credentials and return a session token
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` with a generic message for an unknown email or
    /// a wrong password
    pub async fn login(
        &self,
        database: &Database,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        let email =
            normalize_email(email).map_err(|_| AppError::auth_invalid(INVALID_CREDENTIALS))?;

        let mut conn = database.acquire().await?;
        let Some(user) = users::get_user_by_email(&mut conn, &email).await? else {
            AppLogger::log_auth_event(&email, "login", false);
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };
        drop(conn);

        let verified = verify_password(password.to_owned(), user.password_hash.clone()).await?;
        AppLogger::log_auth_event(&email, "login", verified);
        if !verified {
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        debug!(user.id = %user.id, "Login succeeded");
        self.respond(user)
    }

    fn respond(&self, user: User) -> AppResult<AuthResponse> {
        let (token, expires_at) = self.generate_token(&user)?;
        Ok(AuthResponse {
            token,
            expires_at,
            user,
        })
    }
}

async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use http::HeaderValue;

    fn manager() -> AuthManager {
        AuthManager::new(b"unit-test-secret", 24)
    }

    #[test]
    fn test_token_round_trip_resolves_user() {
        let auth = manager();
        let user = User::new("lifter@example.com".to_owned(), String::new());
        let (token, _) = auth.generate_token(&user).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        assert_eq!(auth.authenticate(&headers).unwrap(), user.id);
    }

    #[test]
    fn test_missing_header_requires_auth() {
        let err = manager().authenticate(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let user = User::new("lifter@example.com".to_owned(), String::new());
        let (token, _) = AuthManager::new(b"other-secret", 24)
            .generate_token(&user)
            .unwrap();

        assert!(matches!(
            manager().validate_token(&token),
            Err(JwtValidationError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let user = User::new("lifter@example.com".to_owned(), String::new());
        let (token, _) = AuthManager::new(b"unit-test-secret", -2)
            .generate_token(&user)
            .unwrap();

        assert!(matches!(
            manager().validate_token(&token),
            Err(JwtValidationError::TokenExpired)
        ));
    }
}
