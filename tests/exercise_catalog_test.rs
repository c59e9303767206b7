// ABOUTME: Integration tests for the exercise catalog and custom exercises
// ABOUTME: Covers visibility, case-insensitive uniqueness, rename and locked deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog_server::errors::ErrorCode;
use liftlog_server::models::TemplateEntry;
use liftlog_server::services::{exercises, templates};
use uuid::Uuid;

#[tokio::test]
async fn test_seeded_catalog_is_listed() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();

    let groups = exercises::list_muscle_groups(&database).await.unwrap();
    assert_eq!(groups.len(), 10);

    let all = exercises::list_exercises(&database, user_id, None)
        .await
        .unwrap();
    assert!(all.iter().all(|e| e.is_default && !e.is_deleted));
    assert!(all.iter().any(|e| e.name == "Deadlift"));

    let back = common::muscle_group_id(&database, "Back").await.unwrap();
    let back_only = exercises::list_exercises(&database, user_id, Some(back))
        .await
        .unwrap();
    assert_eq!(back_only.len(), 4);
    assert!(back_only.iter().all(|e| e.muscle_group_id == back));
}

#[tokio::test]
async fn test_custom_exercises_are_private() {
    let database = common::create_test_database().await.unwrap();
    let alice = common::create_test_user(&database, "alice@example.com")
        .await
        .unwrap();
    let bob = common::create_test_user(&database, "bob@example.com")
        .await
        .unwrap();
    let chest = common::muscle_group_id(&database, "Chest").await.unwrap();

    let fly = exercises::create_custom_exercise(&database, alice, "  Cable Fly ", chest)
        .await
        .unwrap();
    assert_eq!(fly.name, "Cable Fly");
    assert_eq!(fly.user_id, Some(alice));
    assert!(!fly.is_default);

    let alice_custom = exercises::list_custom_exercises(&database, alice)
        .await
        .unwrap();
    assert_eq!(alice_custom.len(), 1);
    assert!(exercises::list_custom_exercises(&database, bob)
        .await
        .unwrap()
        .is_empty());
    assert!(!exercises::list_exercises(&database, bob, None)
        .await
        .unwrap()
        .iter()
        .any(|e| e.id == fly.id));

    // Same name is free for another user
    exercises::create_custom_exercise(&database, bob, "cable fly", chest)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_name_collisions_are_conflicts() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let chest = common::muscle_group_id(&database, "Chest").await.unwrap();

    let err = exercises::create_custom_exercise(&database, user_id, "bench press", chest)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    exercises::create_custom_exercise(&database, user_id, "Cable Fly", chest)
        .await
        .unwrap();
    let err = exercises::create_custom_exercise(&database, user_id, "CABLE FLY", chest)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = exercises::create_custom_exercise(&database, user_id, "   ", chest)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let err = exercises::create_custom_exercise(&database, user_id, "Band Pull", Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_rename_rules() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let other = common::create_test_user(&database, "other@example.com")
        .await
        .unwrap();
    let chest = common::muscle_group_id(&database, "Chest").await.unwrap();
    let fly = exercises::create_custom_exercise(&database, user_id, "Cable Fly", chest)
        .await
        .unwrap();

    // Case-only rename of itself is allowed
    let renamed = exercises::rename_custom_exercise(&database, user_id, fly.id, "cable fly")
        .await
        .unwrap();
    assert_eq!(renamed.name, "cable fly");

    let err = exercises::rename_custom_exercise(&database, user_id, fly.id, "Push-Up")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = exercises::rename_custom_exercise(&database, other, fly.id, "Mine Now")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let bench = common::default_exercise_id(&database, user_id, "Bench Press")
        .await
        .unwrap();
    let err = exercises::rename_custom_exercise(&database, user_id, bench, "My Bench")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_is_soft_and_blocked_while_in_use() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let chest = common::muscle_group_id(&database, "Chest").await.unwrap();
    let (_, days) = common::create_scheduled_program(&database, user_id, 4, &[0])
        .await
        .unwrap();

    let used = exercises::create_custom_exercise(&database, user_id, "Cable Fly", chest)
        .await
        .unwrap();
    templates::populate_day_template(
        &database,
        user_id,
        days[0].id,
        0,
        &[TemplateEntry {
            exercise_id: used.id,
            order_index: 0,
        }],
    )
    .await
    .unwrap();

    let err = exercises::delete_custom_exercise(&database, user_id, used.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);

    let unused = exercises::create_custom_exercise(&database, user_id, "Pec Deck", chest)
        .await
        .unwrap();
    exercises::delete_custom_exercise(&database, user_id, unused.id)
        .await
        .unwrap();
    assert!(!exercises::list_exercises(&database, user_id, None)
        .await
        .unwrap()
        .iter()
        .any(|e| e.id == unused.id));

    // Deleted again, or a default exercise: not found
    let err = exercises::delete_custom_exercise(&database, user_id, unused.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    let bench = common::default_exercise_id(&database, user_id, "Bench Press")
        .await
        .unwrap();
    let err = exercises::delete_custom_exercise(&database, user_id, bench)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // The soft-deleted name can be reused
    exercises::create_custom_exercise(&database, user_id, "Pec Deck", chest)
        .await
        .unwrap();
}
