//! Repository for the `workouts` and `workout_entries` tables.
//!
//! Entries never exist on their own: they are inserted in the same
//! transaction as their workout and replaced wholesale on update. All reads
//! return entries sorted by `order_index` ascending.

use std::collections::HashMap;

use ironlog_core::error::CoreError;
use ironlog_core::types::DbId;
use ironlog_core::workout::{validate_entries, validate_workout_fields};
use sqlx::{PgExecutor, PgPool};

use crate::error::RepoResult;
use crate::models::workout::{
    CreateWorkout, CreateWorkoutEntry, UpdateWorkout, Workout, WorkoutEntry, WorkoutWithEntries,
};

/// Column list for the `workouts` table.
const COLUMNS: &str = "id, user_id, title, description, duration_minutes, calories_burned, \
    created_at, updated_at";

/// Column list for the `workout_entries` table.
const ENTRY_COLUMNS: &str = "id, workout_id, exercise_name, sets, reps, duration_seconds, \
    weight, notes, order_index";

/// Provides CRUD operations for workouts and their entries.
pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Insert a workout owned by `user_id` together with all of its entries.
    ///
    /// Every entry is validated before anything is written; the first invalid
    /// entry aborts with `CoreError::Validation`. The workout and entry
    /// inserts share one transaction, so a failure leaves no partial rows.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWorkout,
    ) -> RepoResult<WorkoutWithEntries> {
        validate_workout_fields(
            Some(input.title.as_str()),
            Some(input.duration_minutes),
            Some(input.calories_burned),
        )?;
        validate_entries(input.entries.iter().map(CreateWorkoutEntry::draft))?;

        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO workouts (user_id, title, description, duration_minutes, calories_burned) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let workout = sqlx::query_as::<_, Workout>(&insert_query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.calories_burned)
            .fetch_one(&mut *tx)
            .await?;

        let entries = Self::insert_entries_inner(&mut tx, workout.id, &input.entries).await?;

        tx.commit().await?;

        Ok(WorkoutWithEntries { workout, entries })
    }

    /// Find a workout by ID, with its entries ordered by `order_index`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutWithEntries>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE id = $1");
        let workout = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match workout {
            Some(workout) => {
                let entries = Self::entries_for_workout(pool, workout.id).await?;
                Ok(Some(WorkoutWithEntries { workout, entries }))
            }
            None => Ok(None),
        }
    }

    /// Return only the owning user id of a workout.
    ///
    /// Used to authorize mutations without loading the entry set. Fails with
    /// `CoreError::NotFound` when the workout does not exist.
    pub async fn get_owner(pool: &PgPool, id: DbId) -> RepoResult<DbId> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM workouts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Workout", id }.into())
    }

    /// List a user's workouts, newest first, each with its entries.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkoutWithEntries>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workouts \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let workouts = sqlx::query_as::<_, Workout>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        if workouts.is_empty() {
            return Ok(Vec::new());
        }

        // One round trip for all entries, then group by workout.
        let ids: Vec<DbId> = workouts.iter().map(|w| w.id).collect();
        let entry_query = format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries \
             WHERE workout_id = ANY($1) \
             ORDER BY workout_id, order_index ASC"
        );
        let all_entries = sqlx::query_as::<_, WorkoutEntry>(&entry_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<WorkoutEntry>> = HashMap::new();
        for entry in all_entries {
            grouped.entry(entry.workout_id).or_default().push(entry);
        }

        Ok(workouts
            .into_iter()
            .map(|workout| {
                let entries = grouped.remove(&workout.id).unwrap_or_default();
                WorkoutWithEntries { workout, entries }
            })
            .collect())
    }

    /// Update a workout. Only non-`None` scalar fields are applied.
    ///
    /// If `entries` is `Some`, the stored entries are deleted and the new set
    /// inserted in the same transaction; new entries are validated first.
    /// The owner is never changed. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkout,
    ) -> RepoResult<Option<WorkoutWithEntries>> {
        validate_workout_fields(
            input.title.as_deref(),
            input.duration_minutes,
            input.calories_burned,
        )?;
        if let Some(ref entries) = input.entries {
            validate_entries(entries.iter().map(CreateWorkoutEntry::draft))?;
        }

        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE workouts SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                duration_minutes = COALESCE($4, duration_minutes), \
                calories_burned = COALESCE($5, calories_burned) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let workout = sqlx::query_as::<_, Workout>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.calories_burned)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(workout) = workout else {
            tx.rollback().await?;
            return Ok(None);
        };

        let entries = match input.entries {
            Some(ref new_entries) => {
                sqlx::query("DELETE FROM workout_entries WHERE workout_id = $1")
                    .bind(workout.id)
                    .execute(&mut *tx)
                    .await?;
                Self::insert_entries_inner(&mut tx, workout.id, new_entries).await?
            }
            None => Self::entries_for_workout(&mut *tx, workout.id).await?,
        };

        tx.commit().await?;

        Ok(Some(WorkoutWithEntries { workout, entries }))
    }

    /// Delete a workout and (by cascade) its entries.
    ///
    /// Fails with `CoreError::NotFound` if no row was removed, so deleting
    /// the same id twice never succeeds twice.
    pub async fn delete(pool: &PgPool, id: DbId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound { entity: "Workout", id }.into());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Entry helpers
    // -----------------------------------------------------------------------

    /// Get all entries of a workout ordered by `order_index`.
    ///
    /// Runs on either the pool or an open transaction.
    pub async fn entries_for_workout<'e, E>(
        executor: E,
        workout_id: DbId,
    ) -> Result<Vec<WorkoutEntry>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries \
             WHERE workout_id = $1 \
             ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, WorkoutEntry>(&query)
            .bind(workout_id)
            .fetch_all(executor)
            .await
    }

    /// Insert entries within an existing transaction, returning the stored
    /// rows sorted by `order_index`.
    async fn insert_entries_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        workout_id: DbId,
        entries: &[CreateWorkoutEntry],
    ) -> Result<Vec<WorkoutEntry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_entries \
                (workout_id, exercise_name, sets, reps, duration_seconds, weight, notes, order_index) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ENTRY_COLUMNS}"
        );

        let mut stored = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, WorkoutEntry>(&query)
                .bind(workout_id)
                .bind(&entry.exercise_name)
                .bind(entry.sets)
                .bind(entry.reps)
                .bind(entry.duration_seconds)
                .bind(entry.weight)
                .bind(&entry.notes)
                .bind(entry.order_index)
                .fetch_one(&mut **tx)
                .await?;
            stored.push(row);
        }

        stored.sort_by_key(|e| e.order_index);
        Ok(stored)
    }
}
