// ABOUTME: Integration tests for the workout session lifecycle
// ABOUTME: Covers start/end rules, exercise management, and frozen metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use uuid::Uuid;

use chronofit::catalog::{ExerciseCatalog, StaticCatalog};
use chronofit::database_plugins::{factory::Database, SessionRepository};
use chronofit::errors::SessionError;
use chronofit::models::{ExerciseUpdate, LocationSample, SessionState};
use chronofit::sampler::NullLocationSource;
use chronofit::session::SessionTracker;

use common::create_test_tracker;

#[tokio::test]
async fn test_start_creates_active_session() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();

    let session = tracker.start(user_id, None, &NullLocationSource).await?;
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.state(), SessionState::Active);
    assert!(session.exercises.is_empty());
    assert!(session.location_track.is_empty());

    let snapshot = tracker.active_session(user_id).await;
    assert_eq!(snapshot.map(|s| s.id), Some(session.id));
    Ok(())
}

#[tokio::test]
async fn test_second_start_for_same_user_is_rejected() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();

    tracker.start(user_id, None, &NullLocationSource).await?;
    let err = tracker
        .start(user_id, None, &NullLocationSource)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::AlreadyActiveSession { user_id: u } if u == user_id
    ));

    // A different user is unaffected
    let other = Uuid::new_v4();
    tracker.start(other, None, &NullLocationSource).await?;
    Ok(())
}

#[tokio::test]
async fn test_exercise_add_update_remove() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;

    let exercise = tracker.add_exercise(user_id, "push-ups").await?;
    assert_eq!(exercise.exercise_id, "push-ups");
    assert_eq!(exercise.rest_seconds, 60);
    assert!(!exercise.completed);

    // Ids missing from the catalog, and duplicates, are rejected
    assert!(matches!(
        tracker.add_exercise(user_id, "underwater-basket-weaving").await,
        Err(SessionError::ExerciseNotFound { .. })
    ));
    assert!(matches!(
        tracker.add_exercise(user_id, "push-ups").await,
        Err(SessionError::DuplicateExercise { .. })
    ));

    let update = ExerciseUpdate {
        sets: Some(3),
        reps: Some(15),
        completed: Some(true),
        ..ExerciseUpdate::default()
    };
    let updated = tracker.update_exercise(user_id, "push-ups", &update).await?;
    assert_eq!(updated.sets, 3);
    assert_eq!(updated.reps, 15);
    assert!(updated.completed);

    // Updating an exercise never added to the session is rejected; an
    // update never creates an entry implicitly
    assert!(matches!(
        tracker
            .update_exercise(user_id, "squats", &ExerciseUpdate::default())
            .await,
        Err(SessionError::UnknownExercise { .. })
    ));

    tracker.remove_exercise(user_id, "push-ups").await?;
    // Removing again is a no-op
    tracker.remove_exercise(user_id, "push-ups").await?;
    let snapshot = tracker.active_session(user_id).await.unwrap();
    assert!(snapshot.exercises.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_invalid_weight_update_is_rejected() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;
    tracker.add_exercise(user_id, "squats").await?;

    let update = ExerciseUpdate {
        weight_kg: Some(-20.0),
        ..ExerciseUpdate::default()
    };
    assert!(matches!(
        tracker.update_exercise(user_id, "squats", &update).await,
        Err(SessionError::InvalidValue { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_end_freezes_calories_from_completed_exercises() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;

    tracker.add_exercise(user_id, "push-ups").await?;
    let update = ExerciseUpdate {
        sets: Some(3),
        completed: Some(true),
        ..ExerciseUpdate::default()
    };
    tracker.update_exercise(user_id, "push-ups", &update).await?;

    // Squats stay incomplete and must not contribute
    tracker.add_exercise(user_id, "squats").await?;
    let squat_update = ExerciseUpdate {
        sets: Some(10),
        ..ExerciseUpdate::default()
    };
    tracker.update_exercise(user_id, "squats", &squat_update).await?;

    let ended = tracker.end(user_id).await?;
    assert_eq!(ended.state(), SessionState::Ended);
    assert!(ended.end_time.is_some());
    // 3 sets * 2 min/set * 8 cal/min
    assert!((ended.calories_burned - 48.0).abs() < f64::EPSILON);
    assert_eq!(ended.completed_exercises(), 1);
    Ok(())
}

#[tokio::test]
async fn test_end_freezes_distance_from_recorded_track() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;

    let t0 = Utc::now();
    // One degree of longitude along the equator
    assert!(
        tracker
            .record_sample(user_id, LocationSample::new(0.0, 0.0, t0))
            .await?
    );
    assert!(
        tracker
            .record_sample(
                user_id,
                LocationSample::new(0.0, 1.0, t0 + Duration::seconds(120))
            )
            .await?
    );

    let ended = tracker.end(user_id).await?;
    assert!((ended.distance_meters - 111_194.93).abs() < 1.0);
    assert_eq!(ended.location_track.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_out_of_order_sample_is_dropped() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;

    let t0 = Utc::now();
    assert!(
        tracker
            .record_sample(user_id, LocationSample::new(45.0, -73.0, t0))
            .await?
    );
    // Earlier than the last accepted sample, dropped
    assert!(
        !tracker
            .record_sample(
                user_id,
                LocationSample::new(45.1, -73.1, t0 - Duration::seconds(30))
            )
            .await?
    );
    // Equal timestamps are allowed
    assert!(
        tracker
            .record_sample(user_id, LocationSample::new(45.2, -73.2, t0))
            .await?
    );

    let snapshot = tracker.active_session(user_id).await.unwrap();
    assert_eq!(snapshot.location_track.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_ended_session_rejects_further_operations() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();
    tracker.start(user_id, None, &NullLocationSource).await?;
    tracker.end(user_id).await?;

    assert!(matches!(
        tracker.end(user_id).await,
        Err(SessionError::SessionNotActive { .. })
    ));
    assert!(matches!(
        tracker.add_exercise(user_id, "plank").await,
        Err(SessionError::SessionNotActive { .. })
    ));
    assert!(matches!(
        tracker
            .record_sample(user_id, LocationSample::new(0.0, 0.0, Utc::now()))
            .await,
        Err(SessionError::SessionNotActive { .. })
    ));
    assert!(tracker.active_session(user_id).await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_resume_reattaches_persisted_session() -> Result<()> {
    let database = common::create_test_database().await?;
    let catalog: Arc<dyn ExerciseCatalog> = Arc::new(StaticCatalog::default());
    let user_id = Uuid::new_v4();

    let first = SessionTracker::new(Arc::clone(&database), Arc::clone(&catalog));
    let started = first.start(user_id, None, &NullLocationSource).await?;
    first.persist(user_id).await?;

    // A fresh tracker over the same database picks the session back up
    let second = SessionTracker::new(database, catalog);
    let resumed = second.resume(user_id, &NullLocationSource).await?;
    assert_eq!(resumed.map(|s| s.id), Some(started.id));
    assert!(second.active_session(user_id).await.is_some());

    // No active session means nothing to resume
    let nobody = Uuid::new_v4();
    assert!(second.resume(nobody, &NullLocationSource).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_failed_save_on_end_retains_record_for_retry() -> Result<()> {
    let database = common::create_test_database().await?;
    let catalog: Arc<dyn ExerciseCatalog> = Arc::new(StaticCatalog::default());
    let tracker = SessionTracker::new(Arc::clone(&database), catalog);
    let user_id = Uuid::new_v4();

    tracker.start(user_id, None, &NullLocationSource).await?;

    // Break the storage layer out from under the tracker
    let Database::SQLite(db) = database.as_ref();
    sqlx::query("DROP TABLE workout_sessions")
        .execute(db.inner().pool())
        .await?;

    assert!(matches!(
        tracker.end(user_id).await,
        Err(SessionError::Persistence { .. })
    ));

    // The finalized record survives in memory with its metrics frozen
    let retained = tracker.active_session(user_id).await.unwrap();
    assert!(retained.end_time.is_some());

    // Restore the schema; the retry saves and releases the entry
    db.inner().migrate().await?;
    let persisted = tracker.persist(user_id).await?;
    assert_eq!(persisted.id, retained.id);
    assert!(tracker.active_session(user_id).await.is_none());

    let stored = database.get_session(retained.id).await?.unwrap();
    assert!(stored.end_time.is_some());
    Ok(())
}

#[tokio::test]
async fn test_start_after_end_begins_a_new_session() -> Result<()> {
    let tracker = create_test_tracker().await?;
    let user_id = Uuid::new_v4();

    let first = tracker.start(user_id, None, &NullLocationSource).await?;
    tracker.end(user_id).await?;

    let second = tracker.start(user_id, None, &NullLocationSource).await?;
    assert_ne!(first.id, second.id);
    assert_eq!(second.state(), SessionState::Active);
    Ok(())
}
