// ABOUTME: Integration tests for daily and exercise notes
// ABOUTME: Covers trimming, one note per parent, edits, deletes and ownership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog_server::errors::ErrorCode;
use liftlog_server::models::TemplateEntry;
use liftlog_server::services::{notes, templates};

#[tokio::test]
async fn test_daily_note_lifecycle() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let (_, days) = common::create_scheduled_program(&database, user_id, 4, &[0])
        .await
        .unwrap();

    let note = notes::create_daily_note(&database, user_id, days[0].id, " slept badly ")
        .await
        .unwrap();
    assert_eq!(note.note, "slept badly");
    assert_eq!(note.workout_day_id, days[0].id);

    let err = notes::create_daily_note(&database, user_id, days[0].id, "second")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let edited = notes::edit_daily_note(&database, user_id, note.id, "slept fine")
        .await
        .unwrap();
    assert_eq!(edited.id, note.id);
    assert_eq!(edited.note, "slept fine");

    let err = notes::edit_daily_note(&database, user_id, note.id, "  ")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    notes::delete_daily_note(&database, user_id, note.id)
        .await
        .unwrap();
    let err = notes::delete_daily_note(&database, user_id, note.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // Parent is free again after delete
    notes::create_daily_note(&database, user_id, days[0].id, "again")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_exercise_note_lifecycle_and_ownership() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let intruder = common::create_test_user(&database, "intruder@example.com")
        .await
        .unwrap();
    let (_, days) = common::create_scheduled_program(&database, user_id, 4, &[0])
        .await
        .unwrap();
    let squat = common::default_exercise_id(&database, user_id, "Back Squat")
        .await
        .unwrap();
    let populated = templates::populate_day_template(
        &database,
        user_id,
        days[0].id,
        0,
        &[TemplateEntry {
            exercise_id: squat,
            order_index: 0,
        }],
    )
    .await
    .unwrap();
    let we_id = populated[0].workout_exercise.id;

    let err = notes::create_exercise_note(&database, intruder, we_id, "hi")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let note = notes::create_exercise_note(&database, user_id, we_id, "belt on top set")
        .await
        .unwrap();
    assert_eq!(note.workout_exercise_id, we_id);

    let err = notes::edit_exercise_note(&database, intruder, note.id, "mine")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    let err = notes::delete_exercise_note(&database, intruder, note.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let edited = notes::edit_exercise_note(&database, user_id, note.id, "no belt")
        .await
        .unwrap();
    assert_eq!(edited.note, "no belt");

    notes::delete_exercise_note(&database, user_id, note.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_overlong_note_is_rejected() {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
        .await
        .unwrap();
    let (_, days) = common::create_scheduled_program(&database, user_id, 4, &[0])
        .await
        .unwrap();

    let text = "x".repeat(2001);
    let err = notes::create_daily_note(&database, user_id, days[0].id, &text)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
