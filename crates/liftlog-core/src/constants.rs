// ABOUTME: Application constants for program scheduling and set logging limits
// ABOUTME: Single source of truth for ranges shared by validation, schema and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

/// Program duration limits
pub mod program {
    /// Shortest allowed program, in weeks
    pub const MIN_DURATION_WEEKS: i64 = 4;
    /// Longest allowed program, in weeks
    pub const MAX_DURATION_WEEKS: i64 = 16;
    /// Prefix of generated program names ("My Program 3")
    pub const DEFAULT_NAME_PREFIX: &str = "My Program";
    /// Maximum program name length after trimming
    pub const MAX_NAME_LENGTH: usize = 100;
}

/// Weekday numbering (Monday = 0)
pub mod weekday {
    /// First weekday index (Monday)
    pub const MIN: i64 = 0;
    /// Last weekday index (Sunday)
    pub const MAX: i64 = 6;
}

/// Set and log limits
pub mod sets {
    /// Sets seeded for every exercise added through template population
    pub const DEFAULT_SETS_PER_EXERCISE: i64 = 2;
    /// Lowest accepted RPE
    pub const MIN_RPE: f64 = 0.0;
    /// Highest accepted RPE
    pub const MAX_RPE: f64 = 10.0;
}

/// Free-text limits
pub mod text {
    /// Maximum exercise name length after trimming
    pub const MAX_EXERCISE_NAME_LENGTH: usize = 100;
    /// Maximum note length after trimming
    pub const MAX_NOTE_LENGTH: usize = 2000;
}

/// Service identification
pub mod service_names {
    /// Service name used in logs and JWT audience
    pub const LIFTLOG_SERVER: &str = "liftlog-server";
}
