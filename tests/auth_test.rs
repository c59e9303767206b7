// ABOUTME: Integration tests for registration, login and bearer token resolution
// ABOUTME: Validates credential rules, duplicate emails and generic login failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Utc;
use liftlog_server::errors::ErrorCode;

const PASSWORD: &str = "Squat2025x";

#[tokio::test]
async fn test_register_then_login() {
    let database = common::create_test_database().await.unwrap();
    let auth = common::create_test_auth_manager();

    let registered = auth
        .register(&database, "  Lifter@Example.com ", PASSWORD)
        .await
        .unwrap();
    assert_eq!(registered.user.email, "lifter@example.com");
    assert!(registered.expires_at > Utc::now());

    let claims = auth.validate_token(&registered.token).unwrap();
    assert_eq!(claims.sub, registered.user.id.to_string());
    assert_eq!(claims.email, "lifter@example.com");

    let logged_in = auth
        .login(&database, "LIFTER@example.com", PASSWORD)
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", logged_in.token)).unwrap(),
    );
    assert_eq!(auth.authenticate(&headers).unwrap(), registered.user.id);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let database = common::create_test_database().await.unwrap();
    let auth = common::create_test_auth_manager();

    auth.register(&database, "lifter@example.com", PASSWORD)
        .await
        .unwrap();
    let err = auth
        .register(&database, "LIFTER@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_register_validates_credentials() {
    let database = common::create_test_database().await.unwrap();
    let auth = common::create_test_auth_manager();

    for email in ["", "no-at-sign", "@example.com", "lifter@localhost"] {
        let err = auth.register(&database, email, PASSWORD).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "email {email:?}");
    }

    for password in ["short1A", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
        let err = auth
            .register(&database, "lifter@example.com", password)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "password {password:?}");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let database = common::create_test_database().await.unwrap();
    let auth = common::create_test_auth_manager();
    auth.register(&database, "lifter@example.com", PASSWORD)
        .await
        .unwrap();

    let wrong_password = auth
        .login(&database, "lifter@example.com", "Wrong2025x")
        .await
        .unwrap_err();
    let unknown_email = auth
        .login(&database, "nobody@example.com", PASSWORD)
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code, ErrorCode::AuthInvalid);
    assert_eq!(unknown_email.code, ErrorCode::AuthInvalid);
    assert_eq!(wrong_password.message, unknown_email.message);
}

#[tokio::test]
async fn test_malformed_bearer_is_rejected() {
    let auth = common::create_test_auth_manager();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer not-a-jwt"),
    );
    let err = auth.authenticate(&headers).unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert!(auth.authenticate(&headers).is_err());
}
