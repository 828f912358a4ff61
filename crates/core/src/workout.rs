//! Workout and workout-entry validation rules.
//!
//! Every entry measures effort by exactly one of repetitions or duration.
//! `order_index` positions an entry within its workout; values must be
//! unique per workout but need not be contiguous.

use std::collections::HashSet;

use crate::error::CoreError;

/// Maximum workout title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum exercise name length in characters.
pub const MAX_EXERCISE_NAME_LENGTH: usize = 255;

/// The primary measure of effort for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffortMeasure {
    Reps(i32),
    DurationSeconds(i32),
}

/// Borrowed view of an entry, independent of how it is stored.
#[derive(Debug, Clone, Copy)]
pub struct EntryDraft<'a> {
    pub exercise_name: &'a str,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub order_index: i32,
}

/// Resolve the effort measure of an entry.
///
/// Fails when both or neither of `reps` / `duration_seconds` are set.
pub fn effort_measure(
    reps: Option<i32>,
    duration_seconds: Option<i32>,
) -> Result<EffortMeasure, CoreError> {
    match (reps, duration_seconds) {
        (Some(r), None) => Ok(EffortMeasure::Reps(r)),
        (None, Some(d)) => Ok(EffortMeasure::DurationSeconds(d)),
        (Some(_), Some(_)) => Err(CoreError::Validation(
            "entry must specify either reps or duration_seconds, not both".into(),
        )),
        (None, None) => Err(CoreError::Validation(
            "entry must specify either reps or duration_seconds".into(),
        )),
    }
}

/// Validate a single entry.
pub fn validate_entry(entry: &EntryDraft<'_>) -> Result<(), CoreError> {
    if entry.exercise_name.trim().is_empty() {
        return Err(CoreError::Validation("exercise_name is required".into()));
    }
    // Stored as submitted, so the limit applies to the untrimmed value.
    if entry.exercise_name.chars().count() > MAX_EXERCISE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "exercise_name must be at most {MAX_EXERCISE_NAME_LENGTH} characters"
        )));
    }
    if entry.sets < 1 {
        return Err(CoreError::Validation("sets must be at least 1".into()));
    }

    match effort_measure(entry.reps, entry.duration_seconds)? {
        EffortMeasure::Reps(r) if r < 1 => {
            return Err(CoreError::Validation("reps must be at least 1".into()));
        }
        EffortMeasure::DurationSeconds(d) if d < 1 => {
            return Err(CoreError::Validation(
                "duration_seconds must be at least 1".into(),
            ));
        }
        _ => {}
    }

    if let Some(w) = entry.weight {
        if !w.is_finite() || w < 0.0 {
            return Err(CoreError::Validation(
                "weight must be a non-negative number".into(),
            ));
        }
    }

    Ok(())
}

/// Validate an entry set as a whole.
///
/// Stops at the first invalid entry; the error message names its position in
/// the submitted list. Duplicate `order_index` values are rejected.
pub fn validate_entries<'a, I>(entries: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = EntryDraft<'a>>,
{
    let mut seen = HashSet::new();
    for (position, entry) in entries.into_iter().enumerate() {
        validate_entry(&entry).map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("entries[{position}]: {msg}"))
            }
            other => other,
        })?;
        if !seen.insert(entry.order_index) {
            return Err(CoreError::Validation(format!(
                "entries[{position}]: duplicate order_index {}",
                entry.order_index
            )));
        }
    }
    Ok(())
}

/// Validate the scalar workout fields present on a create or update.
pub fn validate_workout_fields(
    title: Option<&str>,
    duration_minutes: Option<i32>,
    calories_burned: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(CoreError::Validation("title is required".into()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation(format!(
                "title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }
    }
    if duration_minutes.is_some_and(|d| d < 0) {
        return Err(CoreError::Validation(
            "duration_minutes must not be negative".into(),
        ));
    }
    if calories_burned.is_some_and(|c| c < 0) {
        return Err(CoreError::Validation(
            "calories_burned must not be negative".into(),
        ));
    }
    Ok(())
}
