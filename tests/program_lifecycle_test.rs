// ABOUTME: Integration tests for program creation, listing and activation
// ABOUTME: Verifies the one-active-program-per-user rule and generated names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog_server::errors::ErrorCode;
use liftlog_server::models::CreateProgramRequest;
use liftlog_server::services::programs;
use uuid::Uuid;

fn request(name: Option<&str>, duration_weeks: i64) -> CreateProgramRequest {
    CreateProgramRequest {
        name: name.map(str::to_owned),
        duration_weeks,
    }
}

#[tokio::test]
async fn test_create_program_is_active() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let program = programs::create_program(&database, user_id, &request(Some("  Strength  "), 8))
        .await
        .unwrap();

    assert_eq!(program.name, "Strength");
    assert_eq!(program.duration_weeks, 8);
    assert_eq!(program.user_id, user_id);
    assert!(program.is_active);
}

#[tokio::test]
async fn test_blank_name_is_generated_from_count() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let first = programs::create_program(&database, user_id, &request(None, 4))
        .await
        .unwrap();
    let second = programs::create_program(&database, user_id, &request(Some("   "), 4))
        .await
        .unwrap();

    assert_eq!(first.name, "My Program 1");
    assert_eq!(second.name, "My Program 2");
}

#[tokio::test]
async fn test_only_latest_program_is_active() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let mut latest = None;
    for weeks in [4, 6, 12] {
        latest = Some(
            programs::create_program(&database, user_id, &request(None, weeks))
                .await
                .unwrap(),
        );
    }
    let latest = latest.unwrap();

    let all = programs::list_programs(&database, user_id).await.unwrap();
    assert_eq!(all.len(), 3);
    let active: Vec<_> = all.iter().filter(|p| p.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, latest.id);

    let fetched = programs::get_active_program(&database, user_id).await.unwrap();
    assert_eq!(fetched.id, latest.id);
}

#[tokio::test]
async fn test_duration_out_of_range_is_rejected() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    for weeks in [0, 3, 17] {
        let err = programs::create_program(&database, user_id, &request(None, weeks))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    assert!(programs::list_programs(&database, user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_no_active_program_is_not_found() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let err = programs::get_active_program(&database, user_id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_activate_switches_active_program() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let first = programs::create_program(&database, user_id, &request(None, 4))
        .await
        .unwrap();
    programs::create_program(&database, user_id, &request(None, 4))
        .await
        .unwrap();

    let activated = programs::activate_program(&database, user_id, first.id)
        .await
        .unwrap();
    assert!(activated.is_active);

    let active = programs::get_active_program(&database, user_id).await.unwrap();
    assert_eq!(active.id, first.id);
    let active_count = programs::list_programs(&database, user_id)
        .await
        .unwrap()
        .iter()
        .filter(|p| p.is_active)
        .count();
    assert_eq!(active_count, 1);
}

#[tokio::test]
async fn test_programs_are_isolated_per_user() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database, "alice@example.com")
        .await
        .unwrap();
    let bob = common::create_test_user(&database, "bob@example.com")
        .await
        .unwrap();

    let alice_program = programs::create_program(&database, alice, &request(None, 4))
        .await
        .unwrap();
    let bob_program = programs::create_program(&database, bob, &request(None, 4))
        .await
        .unwrap();

    // Bob's create must not deactivate Alice's program
    let alice_active = programs::get_active_program(&database, alice).await.unwrap();
    assert_eq!(alice_active.id, alice_program.id);
    assert_eq!(bob_program.name, "My Program 1");

    let err = programs::activate_program(&database, bob, alice_program.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = programs::activate_program(&database, bob, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
