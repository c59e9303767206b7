// ABOUTME: Integration tests for in-order set logging
// ABOUTME: Covers the sequence rule, value validation and duplicate logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog_server::database::Database;
use liftlog_server::errors::ErrorCode;
use liftlog_server::models::{ExerciseSet, SetPerformance, TemplateEntry};
use liftlog_server::services::{set_logging, set_propagation, templates};
use serde_json::json;
use uuid::Uuid;

const GOOD: SetPerformance = SetPerformance {
    reps: 5,
    weight: 100.0,
    rpe: Some(8.0),
};

/// A week-1 exercise with four sets
async fn four_sets() -> (Database, Uuid, Vec<ExerciseSet>) {
    let database = common::create_test_database().await.unwrap();
    let user_id = common::create_test_user(&database, "lifter@example.com")
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

    let first = &populated[0];
    let mut sets = first.sets.clone();
    for _ in 0..2 {
        sets.extend(
            set_propagation::add_set(&database, user_id, first.workout_exercise.id, false)
                .await
                .unwrap(),
        );
    }
    (database, user_id, sets)
}

#[tokio::test]
async fn test_sets_log_in_order() {
    let (database, user_id, sets) = four_sets().await;

    for set in &sets {
        let log = set_logging::log_set(&database, user_id, set.id, GOOD)
            .await
            .unwrap();
        assert_eq!(log.exercise_set_id, set.id);
        assert_eq!(log.reps, 5);
        assert!(log.is_completed);
    }
}

#[tokio::test]
async fn test_skipping_ahead_names_first_unmet_set() {
    let (database, user_id, sets) = four_sets().await;

    let err = set_logging::log_set(&database, user_id, sets[2].id, GOOD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SetOutOfSequence);
    assert_eq!(
        err.context.details,
        json!({"unmet_set_number": 1, "requested_set_number": 3})
    );

    set_logging::log_set(&database, user_id, sets[0].id, GOOD)
        .await
        .unwrap();
    let err = set_logging::log_set(&database, user_id, sets[3].id, GOOD)
        .await
        .unwrap_err();
    assert_eq!(err.context.details["unmet_set_number"], 2);

    set_logging::log_set(&database, user_id, sets[1].id, GOOD)
        .await
        .unwrap();
    set_logging::log_set(&database, user_id, sets[2].id, GOOD)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_relogging_a_set_is_a_conflict() {
    let (database, user_id, sets) = four_sets().await;

    set_logging::log_set(&database, user_id, sets[0].id, GOOD)
        .await
        .unwrap();
    let err = set_logging::log_set(&database, user_id, sets[0].id, GOOD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_invalid_values_are_rejected() {
    let (database, user_id, sets) = four_sets().await;

    let bad = [
        SetPerformance { reps: 0, ..GOOD },
        SetPerformance { reps: -3, ..GOOD },
        SetPerformance {
            weight: -1.0,
            ..GOOD
        },
        SetPerformance {
            weight: f64::NAN,
            ..GOOD
        },
        SetPerformance {
            rpe: Some(10.5),
            ..GOOD
        },
        SetPerformance {
            rpe: Some(-0.5),
            ..GOOD
        },
    ];
    for performance in bad {
        let err = set_logging::log_set(&database, user_id, sets[0].id, performance)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    let edge = SetPerformance {
        reps: 1,
        weight: 0.0,
        rpe: None,
    };
    let log = set_logging::log_set(&database, user_id, sets[0].id, edge)
        .await
        .unwrap();
    assert!(log.rpe.is_none());
}

#[tokio::test]
async fn test_foreign_or_missing_set_is_not_found() {
    let (database, _, sets) = four_sets().await;
    let intruder = common::create_test_user(&database, "intruder@example.com")
        .await
        .unwrap();

    let err = set_logging::log_set(&database, intruder, sets[0].id, GOOD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = set_logging::log_set(&database, intruder, Uuid::new_v4(), GOOD)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
