// ABOUTME: Input validation shared by services and route handlers
// ABOUTME: Range checks for durations, weekdays and set logs plus text normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Input validation
//!
//! Every function returns the normalized value or an `AppError` carrying the
//! matching `ErrorCode`, so callers can use `?` directly.

use std::collections::BTreeSet;

use crate::constants::{program, sets, text};
use crate::errors::{AppError, AppResult};
use crate::models::{SetPerformance, Weekday};

/// Validate a program duration in weeks
///
/// # Errors
/// Returns `ValueOutOfRange` outside 4..=16
///
/// ```
/// # use liftlog_core::validation::validate_duration_weeks;
/// assert!(validate_duration_weeks(4).is_ok());
/// assert!(validate_duration_weeks(17).is_err());
/// ```
pub fn validate_duration_weeks(weeks: i64) -> AppResult<i64> {
    if (program::MIN_DURATION_WEEKS..=program::MAX_DURATION_WEEKS).contains(&weeks) {
        Ok(weeks)
    } else {
        Err(AppError::out_of_range(format!(
            "duration_weeks must be between {} and {}, got {weeks}",
            program::MIN_DURATION_WEEKS,
            program::MAX_DURATION_WEEKS
        )))
    }
}

/// Validate and deduplicate a weekday list, returning it sorted Monday first
///
/// # Errors
/// Returns `MissingRequiredField` for an empty list and `ValueOutOfRange`
/// for any index outside 0..=6
pub fn normalize_weekdays(raw: &[i64]) -> AppResult<Vec<Weekday>> {
    if raw.is_empty() {
        return Err(AppError::missing_field("weekdays"));
    }
    let unique: BTreeSet<Weekday> = raw
        .iter()
        .map(|&day| Weekday::try_from(day))
        .collect::<AppResult<_>>()?;
    Ok(unique.into_iter().collect())
}

/// Validate a set performance before it is written
///
/// # Errors
/// Returns `ValueOutOfRange` for non-positive reps, negative or non-finite
/// weight, or an RPE outside 0..=10
pub fn validate_set_performance(performance: &SetPerformance) -> AppResult<()> {
    if performance.reps <= 0 {
        return Err(AppError::out_of_range(format!(
            "reps must be greater than 0, got {}",
            performance.reps
        )));
    }
    if !performance.weight.is_finite() || performance.weight < 0.0 {
        return Err(AppError::out_of_range(format!(
            "weight must be a non-negative number, got {}",
            performance.weight
        )));
    }
    if let Some(rpe) = performance.rpe {
        if !rpe.is_finite() || !(sets::MIN_RPE..=sets::MAX_RPE).contains(&rpe) {
            return Err(AppError::out_of_range(format!(
                "rpe must be between {} and {}, got {rpe}",
                sets::MIN_RPE,
                sets::MAX_RPE
            )));
        }
    }
    Ok(())
}

/// Trim a required display name and check its length
///
/// # Errors
/// Returns `MissingRequiredField` when blank, `InvalidInput` when too long
pub fn normalize_name(raw: &str, field: &str, max_len: usize) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional program name; `None` means "generate one"
///
/// # Errors
/// Returns `InvalidInput` when the trimmed name is too long
pub fn normalize_program_name(raw: Option<&str>) -> AppResult<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => normalize_name(name, "name", program::MAX_NAME_LENGTH).map(Some),
    }
}

/// Trim an exercise name
///
/// # Errors
/// See [`normalize_name`]
pub fn normalize_exercise_name(raw: &str) -> AppResult<String> {
    normalize_name(raw, "name", text::MAX_EXERCISE_NAME_LENGTH)
}

/// Trim note text
///
/// # Errors
/// See [`normalize_name`]
pub fn normalize_note(raw: &str) -> AppResult<String> {
    normalize_name(raw, "note", text::MAX_NOTE_LENGTH)
}

/// Validate and lowercase an email address
///
/// # Errors
/// Returns `InvalidInput` when the address has no local part, no `@`, or a
/// domain without a dot
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(AppError::invalid_input("Invalid email format"))
    }
}

/// Check password strength: 8+ characters with lowercase, uppercase and a digit
///
/// # Errors
/// Returns `InvalidInput` describing the requirement
pub fn validate_password(password: &str) -> AppResult<()> {
    let strong = password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit());
    if strong {
        Ok(())
    } else {
        Err(AppError::invalid_input(
            "Password must be at least 8 characters and contain a lowercase letter, an uppercase letter and a number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_duration_bounds() {
        assert_eq!(validate_duration_weeks(4).unwrap(), 4);
        assert_eq!(validate_duration_weeks(16).unwrap(), 16);
        assert_eq!(
            validate_duration_weeks(3).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(validate_duration_weeks(17).is_err());
    }

    #[test]
    fn test_weekdays_dedupe_and_sort() {
        let days = normalize_weekdays(&[4, 0, 2, 0]).unwrap();
        assert_eq!(days, vec![Weekday::MONDAY, Weekday::WEDNESDAY, Weekday::FRIDAY]);
        assert_eq!(
            normalize_weekdays(&[]).unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
        assert!(normalize_weekdays(&[1, 7]).is_err());
    }

    #[test]
    fn test_set_performance_ranges() {
        let ok = SetPerformance { reps: 5, weight: 0.0, rpe: None };
        assert!(validate_set_performance(&ok).is_ok());

        let zero_reps = SetPerformance { reps: 0, ..ok };
        assert!(validate_set_performance(&zero_reps).is_err());

        let negative = SetPerformance { weight: -2.5, ..ok };
        assert!(validate_set_performance(&negative).is_err());

        let nan = SetPerformance { weight: f64::NAN, ..ok };
        assert!(validate_set_performance(&nan).is_err());

        let high_rpe = SetPerformance { rpe: Some(10.5), ..ok };
        assert!(validate_set_performance(&high_rpe).is_err());

        let max_rpe = SetPerformance { rpe: Some(10.0), ..ok };
        assert!(validate_set_performance(&max_rpe).is_ok());
    }

    #[test]
    fn test_program_name_blank_means_default() {
        assert_eq!(normalize_program_name(None).unwrap(), None);
        assert_eq!(normalize_program_name(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_program_name(Some("  Strength  ")).unwrap(),
            Some("Strength".to_owned())
        );
    }

    #[test]
    fn test_email_and_password() {
        assert_eq!(normalize_email(" A@Example.com ").unwrap(), "a@example.com");
        assert!(normalize_email("nope").is_err());
        assert!(normalize_email("a@b").is_err());
        assert!(normalize_email("@example.com").is_err());

        assert!(validate_password("Passw0rd").is_ok());
        assert!(validate_password("password1").is_err());
        assert!(validate_password("PASSWORD1").is_err());
        assert!(validate_password("Short1").is_err());
    }
}
