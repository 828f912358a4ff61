//! Workout and workout-entry models and DTOs.
//!
//! A workout owns an ordered list of entries. Entries are only ever written
//! together with their workout, and are returned sorted by `order_index`.

use ironlog_core::types::{DbId, Timestamp};
use ironlog_core::workout::EntryDraft;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workouts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Workout {
    pub id: DbId,
    /// Owner. Set at creation and never changed.
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `workout_entries` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkoutEntry {
    pub id: DbId,
    pub workout_id: DbId,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub notes: String,
    pub order_index: i32,
}

/// A workout together with its entries, ordered by `order_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutWithEntries {
    #[serde(flatten)]
    pub workout: Workout,
    pub entries: Vec<WorkoutEntry>,
}

/// DTO for one entry in a create or replace request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutEntry {
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    pub order_index: i32,
}

impl CreateWorkoutEntry {
    /// Borrowed view used by the validation rules in `ironlog_core::workout`.
    pub fn draft(&self) -> EntryDraft<'_> {
        EntryDraft {
            exercise_name: &self.exercise_name,
            sets: self.sets,
            reps: self.reps,
            duration_seconds: self.duration_seconds,
            weight: self.weight,
            order_index: self.order_index,
        }
    }
}

/// DTO for creating a workout. The owner comes from the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkout {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: i32,
    #[serde(default)]
    pub calories_burned: i32,
    #[serde(default)]
    pub entries: Vec<CreateWorkoutEntry>,
}

/// DTO for updating a workout. Only present fields are applied.
///
/// `entries: Some(_)` replaces the whole entry set; `None` leaves the stored
/// entries untouched. There is no per-entry merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkout {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub entries: Option<Vec<CreateWorkoutEntry>>,
}
