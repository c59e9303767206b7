// ABOUTME: Domain service layer holding the workout engine's business rules
// ABOUTME: Route handlers resolve the caller's user id and delegate here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Domain service layer
//!
//! Services validate input before touching the store, check ownership by
//! joining through the program's owner, and run every multi-row mutation in
//! a single transaction. They take the authenticated user id as a plain
//! `Uuid`, so they are reusable from the HTTP routes, the CLI tools and tests.

/// Day log assembly with previous-week enrichment
pub mod day_log;

/// Exercise catalog and muscle groups
pub mod exercises;

/// Daily and exercise notes
pub mod notes;

/// Program creation, activation and listing
pub mod programs;

/// Workout day scheduling and the active-day pointer
pub mod scheduler;

/// In-order set logging
pub mod set_logging;

/// Add/remove set with optional propagation to later weeks
pub mod set_propagation;

/// Replicating a day's exercises across all weeks
pub mod templates;
