//! Integration tests for the workouts repository.
//!
//! Covers entry validation and atomicity, entry ordering, owner lookup,
//! whole-set entry replacement, and delete semantics.

use assert_matches::assert_matches;
use ironlog_core::error::CoreError;
use ironlog_db::error::RepoError;
use ironlog_db::models::user::CreateUser;
use ironlog_db::models::workout::{CreateWorkout, CreateWorkoutEntry, UpdateWorkout};
use ironlog_db::repositories::{UserRepo, WorkoutRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "hash".to_string(),
        bio: String::new(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn reps_entry(name: &str, reps: i32, order_index: i32) -> CreateWorkoutEntry {
    CreateWorkoutEntry {
        exercise_name: name.to_string(),
        sets: 3,
        reps: Some(reps),
        duration_seconds: None,
        weight: Some(85.5),
        notes: "warm up properly".to_string(),
        order_index,
    }
}

fn timed_entry(name: &str, seconds: i32, order_index: i32) -> CreateWorkoutEntry {
    CreateWorkoutEntry {
        exercise_name: name.to_string(),
        sets: 3,
        reps: None,
        duration_seconds: Some(seconds),
        weight: None,
        notes: String::new(),
        order_index,
    }
}

fn new_workout(title: &str, entries: Vec<CreateWorkoutEntry>) -> CreateWorkout {
    CreateWorkout {
        title: title.to_string(),
        description: "upper body day".to_string(),
        duration_minutes: 60,
        calories_burned: 200,
        entries,
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_valid_workout(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let input = new_workout("push day", vec![reps_entry("Bench Press", 10, 1)]);

    let created = WorkoutRepo::create(&pool, user_id, &input).await.unwrap();

    assert!(created.workout.id > 0);
    assert_eq!(created.workout.user_id, user_id);
    assert_eq!(created.workout.title, "push day");
    assert_eq!(created.workout.description, "upper body day");
    assert_eq!(created.workout.duration_minutes, 60);
    assert_eq!(created.workout.calories_burned, 200);
    assert_eq!(created.entries.len(), 1);
    assert!(created.entries[0].id > 0);
    assert_eq!(created.entries[0].workout_id, created.workout.id);
    assert_eq!(created.entries[0].reps, Some(10));
    assert_eq!(created.entries[0].duration_seconds, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_both_measures_rejected_without_trace(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let mut squats = reps_entry("Squats", 12, 2);
    squats.duration_seconds = Some(60);
    let input = new_workout("full body", vec![timed_entry("Plank", 60, 1), squats]);

    let err = WorkoutRepo::create(&pool, user_id, &input).await.unwrap_err();

    assert_matches!(err, RepoError::Core(CoreError::Validation(msg)) if msg.contains("entries[1]"));
    assert_eq!(count(&pool, "workouts").await, 0);
    assert_eq!(count(&pool, "workout_entries").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_no_measure_rejected(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let mut entry = reps_entry("Curl", 10, 1);
    entry.reps = None;

    let err = WorkoutRepo::create(&pool, user_id, &new_workout("arms", vec![entry]))
        .await
        .unwrap_err();

    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
    assert_eq!(count(&pool, "workouts").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storage_failure_rolls_back_workout(pool: PgPool) {
    // A foreign key failure on the workout insert must not leave entries behind.
    let input = new_workout("orphan", vec![reps_entry("Row", 8, 1)]);

    let err = WorkoutRepo::create(&pool, 424_242, &input).await.unwrap_err();

    assert_matches!(err, RepoError::Database(_));
    assert_eq!(count(&pool, "workouts").await, 0);
    assert_eq!(count(&pool, "workout_entries").await, 0);
}

/// Make any `workout_entries` insert with `exercise_name = 'FAIL_ON_INSERT'`
/// raise, so a failure can be forced after earlier rows of the same
/// transaction were written.
async fn install_failing_entry_trigger(pool: &PgPool) {
    sqlx::query(
        "CREATE FUNCTION reject_marked_entry() RETURNS TRIGGER AS $$
         BEGIN
             IF NEW.exercise_name = 'FAIL_ON_INSERT' THEN
                 RAISE EXCEPTION 'entry rejected by test trigger';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_reject_marked_entry
             BEFORE INSERT ON workout_entries
             FOR EACH ROW EXECUTE FUNCTION reject_marked_entry()",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failure_on_later_entry_rolls_back_everything(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    install_failing_entry_trigger(&pool).await;

    // The workout row and the first entry are written before the second
    // entry insert fails.
    let input = new_workout(
        "half written",
        vec![reps_entry("Row", 8, 1), reps_entry("FAIL_ON_INSERT", 5, 2)],
    );

    let err = WorkoutRepo::create(&pool, user_id, &input).await.unwrap_err();

    assert_matches!(err, RepoError::Database(_));
    assert_eq!(count(&pool, "workouts").await, 0);
    assert_eq!(count(&pool, "workout_entries").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_entry_replacement_keeps_previous_state(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let input = new_workout(
        "legs",
        vec![reps_entry("Squat", 5, 1), timed_entry("Wall Sit", 60, 2)],
    );
    let created = WorkoutRepo::create(&pool, user_id, &input).await.unwrap();
    install_failing_entry_trigger(&pool).await;

    let patch = UpdateWorkout {
        title: Some("legs v2".to_string()),
        entries: Some(vec![
            reps_entry("Lunge", 10, 1),
            reps_entry("FAIL_ON_INSERT", 5, 2),
        ]),
        ..Default::default()
    };
    let err = WorkoutRepo::update(&pool, created.workout.id, &patch)
        .await
        .unwrap_err();

    assert_matches!(err, RepoError::Database(_));
    let reloaded = WorkoutRepo::find_by_id(&pool, created.workout.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_padded_names_over_limit_are_validation_errors(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;

    let padded_name = format!(" {}", "a".repeat(255));
    let input = new_workout("push", vec![reps_entry(&padded_name, 10, 1)]);
    let err = WorkoutRepo::create(&pool, user_id, &input).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(msg)) if msg.contains("exercise_name"));

    let padded_title = format!(" {}", "t".repeat(255));
    let input = new_workout(&padded_title, vec![reps_entry("Bench Press", 10, 1)]);
    let err = WorkoutRepo::create(&pool, user_id, &input).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(msg)) if msg.contains("title"));

    assert_eq!(count(&pool, "workouts").await, 0);
    assert_eq!(count(&pool, "workout_entries").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_names_at_limit_are_stored(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let name = "a".repeat(255);
    let title = "t".repeat(255);

    let input = new_workout(&title, vec![reps_entry(&name, 10, 1)]);
    let created = WorkoutRepo::create(&pool, user_id, &input).await.unwrap();

    assert_eq!(created.workout.title, title);
    assert_eq!(created.entries[0].exercise_name, name);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_round_trip_orders_entries_by_order_index(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let input = new_workout(
        "mixed",
        vec![
            reps_entry("Deadlift", 5, 30),
            timed_entry("Plank", 45, 10),
            reps_entry("Pull Up", 8, 20),
        ],
    );

    let created = WorkoutRepo::create(&pool, user_id, &input).await.unwrap();
    let order: Vec<i32> = created.entries.iter().map(|e| e.order_index).collect();
    assert_eq!(order, vec![10, 20, 30]);

    let saved = WorkoutRepo::find_by_id(&pool, created.workout.id)
        .await
        .unwrap()
        .expect("workout should exist");

    assert_eq!(saved, created);
    let names: Vec<&str> = saved
        .entries
        .iter()
        .map(|e| e.exercise_name.as_str())
        .collect();
    assert_eq!(names, vec!["Plank", "Pull Up", "Deadlift"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_workout_is_none(pool: PgPool) {
    let found = WorkoutRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_owner(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let created = WorkoutRepo::create(&pool, user_id, &new_workout("legs", vec![]))
        .await
        .unwrap();

    let owner = WorkoutRepo::get_owner(&pool, created.workout.id)
        .await
        .unwrap();
    assert_eq!(owner, user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_owner_missing_is_not_found(pool: PgPool) {
    let err = WorkoutRepo::get_owner(&pool, 999_999).await.unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Workout", id: 999_999 })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_user_only_returns_own_workouts(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    WorkoutRepo::create(&pool, alice, &new_workout("a1", vec![reps_entry("Squat", 5, 1)]))
        .await
        .unwrap();
    WorkoutRepo::create(&pool, alice, &new_workout("a2", vec![]))
        .await
        .unwrap();
    WorkoutRepo::create(&pool, bob, &new_workout("b1", vec![]))
        .await
        .unwrap();

    let list = WorkoutRepo::list_by_user(&pool, alice, 20, 0).await.unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|w| w.workout.user_id == alice));
    assert_eq!(list[0].workout.title, "a2");
    assert_eq!(list[1].entries.len(), 1);

    let page = WorkoutRepo::list_by_user(&pool, alice, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].workout.title, "a1");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_scalars_keeps_entries_when_omitted(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let created = WorkoutRepo::create(
        &pool,
        user_id,
        &new_workout("push day", vec![reps_entry("Bench Press", 10, 1)]),
    )
    .await
    .unwrap();

    let patch = UpdateWorkout {
        title: Some("heavy push day".to_string()),
        calories_burned: Some(350),
        ..Default::default()
    };
    let updated = WorkoutRepo::update(&pool, created.workout.id, &patch)
        .await
        .unwrap()
        .expect("workout should exist");

    assert_eq!(updated.workout.title, "heavy push day");
    assert_eq!(updated.workout.calories_burned, 350);
    assert_eq!(updated.workout.description, "upper body day");
    assert_eq!(updated.workout.duration_minutes, 60);
    assert_eq!(updated.workout.user_id, user_id);
    assert_eq!(updated.entries, created.entries);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_entire_entry_set(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let created = WorkoutRepo::create(
        &pool,
        user_id,
        &new_workout(
            "push day",
            vec![reps_entry("Bench Press", 10, 1), reps_entry("Dips", 12, 2)],
        ),
    )
    .await
    .unwrap();

    let patch = UpdateWorkout {
        entries: Some(vec![timed_entry("Wall Sit", 90, 5)]),
        ..Default::default()
    };
    let updated = WorkoutRepo::update(&pool, created.workout.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.entries.len(), 1);
    assert_eq!(updated.entries[0].exercise_name, "Wall Sit");
    assert_eq!(count(&pool, "workout_entries").await, 1);

    let reloaded = WorkoutRepo::find_by_id(&pool, created.workout.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.entries, updated.entries);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_invalid_entries_changes_nothing(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let created = WorkoutRepo::create(
        &pool,
        user_id,
        &new_workout("push day", vec![reps_entry("Bench Press", 10, 1)]),
    )
    .await
    .unwrap();

    let mut bad = reps_entry("Squats", 12, 1);
    bad.duration_seconds = Some(60);
    let patch = UpdateWorkout {
        title: Some("renamed".to_string()),
        entries: Some(vec![bad]),
        ..Default::default()
    };
    let err = WorkoutRepo::update(&pool, created.workout.id, &patch)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));

    let reloaded = WorkoutRepo::find_by_id(&pool, created.workout.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_workout_is_none(pool: PgPool) {
    let patch = UpdateWorkout {
        title: Some("ghost".to_string()),
        ..Default::default()
    };
    let result = WorkoutRepo::update(&pool, 999_999, &patch).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_twice_is_not_found_second_time(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let created = WorkoutRepo::create(
        &pool,
        user_id,
        &new_workout("legs", vec![reps_entry("Squat", 5, 1)]),
    )
    .await
    .unwrap();
    let id = created.workout.id;

    WorkoutRepo::delete(&pool, id).await.unwrap();
    assert_eq!(count(&pool, "workout_entries").await, 0);

    let err = WorkoutRepo::delete(&pool, id).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { .. }));
    let err = WorkoutRepo::delete(&pool, id).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { .. }));
}
