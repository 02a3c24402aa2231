// ABOUTME: Derived metric computation for workout sessions
// ABOUTME: Duration, GPS track distance, and calorie estimates as pure functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Derived metric computation.
//!
//! All three computations are pure with respect to their inputs and are
//! recomputed on every call rather than cached, so a reading is always
//! consistent with the latest session mutations. The lifecycle freezes
//! their results into the session record exactly once, at `end`.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::catalog::ExerciseCatalog;
use chronofit_core::constants::session::FALLBACK_MINUTES_PER_SET;
use chronofit_core::geo;
use chronofit_core::models::{LocationSample, WorkoutSession};

/// Seconds elapsed between the session start and its end (or `now`
/// while the session is still Active).
///
/// Clamped to zero if clock skew would produce a negative duration.
#[must_use]
pub fn compute_duration(session: &WorkoutSession, now: DateTime<Utc>) -> u64 {
    let end = session.end_time.unwrap_or(now);
    let seconds = (end - session.start_time).num_seconds();
    u64::try_from(seconds).unwrap_or(0)
}

/// Total track distance in meters: the Haversine distance summed over
/// consecutive sample pairs in track order.
///
/// An empty or single-point track yields 0.
#[must_use]
pub fn compute_distance(track: &[LocationSample]) -> f64 {
    track
        .windows(2)
        .map(|pair| geo::distance_meters(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

/// Estimated calories burned across all completed exercises.
///
/// Per completed exercise: minutes are `duration_seconds / 60` when an
/// explicit duration was recorded, otherwise two minutes per set;
/// multiplied by the catalog's calories-per-minute rate. Exercises not
/// marked complete contribute zero regardless of the sets and reps
/// entered.
#[must_use]
pub fn compute_calories(session: &WorkoutSession, catalog: &dyn ExerciseCatalog) -> f64 {
    session
        .exercises
        .iter()
        .filter(|exercise| exercise.completed)
        .map(|exercise| {
            let Some(definition) = catalog.lookup(&exercise.exercise_id) else {
                // Entries are validated against the catalog on add, so a
                // miss here means the catalog changed underneath us.
                warn!(
                    exercise_id = %exercise.exercise_id,
                    "exercise missing from catalog, contributing zero calories"
                );
                return 0.0;
            };
            let minutes = if exercise.duration_seconds > 0 {
                exercise.duration_seconds as f64 / 60.0
            } else {
                f64::from(exercise.sets) * FALLBACK_MINUTES_PER_SET
            };
            minutes * definition.calories_per_minute
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use chrono::Duration;
    use chronofit_core::models::SessionExercise;
    use uuid::Uuid;

    fn session_starting(start: DateTime<Utc>) -> WorkoutSession {
        WorkoutSession::new(Uuid::new_v4(), None, start)
    }

    #[test]
    fn test_duration_uses_now_while_active() {
        let start = Utc::now();
        let session = session_starting(start);
        assert_eq!(
            compute_duration(&session, start + Duration::seconds(90)),
            90
        );
    }

    #[test]
    fn test_duration_prefers_end_time_and_clamps_negative() {
        let start = Utc::now();
        let mut session = session_starting(start);
        session.end_time = Some(start + Duration::seconds(120));

        // `now` is ignored once the session has ended
        assert_eq!(
            compute_duration(&session, start + Duration::seconds(999)),
            120
        );

        // Clock skew: end before start clamps to zero
        session.end_time = Some(start - Duration::seconds(5));
        assert_eq!(compute_duration(&session, start), 0);
    }

    #[test]
    fn test_distance_of_trivial_tracks_is_zero() {
        assert!(compute_distance(&[]).abs() < f64::EPSILON);
        let single = [LocationSample::new(45.5, -73.5, Utc::now())];
        assert!(compute_distance(&single).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_is_symmetric_under_track_reversal() {
        let t = Utc::now();
        let mut track = vec![
            LocationSample::new(45.5017, -73.5673, t),
            LocationSample::new(45.5088, -73.5540, t),
            LocationSample::new(45.5200, -73.5400, t),
            LocationSample::new(45.5310, -73.5210, t),
        ];
        let forward = compute_distance(&track);
        track.reverse();
        let backward = compute_distance(&track);
        assert!((forward - backward).abs() < 1e-9);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_calories_only_credit_completed_exercises() {
        let catalog = StaticCatalog::default();
        let mut session = session_starting(Utc::now());

        let mut push_ups = SessionExercise::new("push-ups");
        push_ups.sets = 3;
        push_ups.completed = true;
        session.exercises.push(push_ups);

        let mut squats = SessionExercise::new("squats");
        squats.sets = 10;
        squats.reps = 20;
        session.exercises.push(squats); // not completed

        // 3 sets * 2 min/set * 8 cal/min = 48
        assert!((compute_calories(&session, &catalog) - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calories_prefer_explicit_duration_over_set_estimate() {
        let catalog = StaticCatalog::default();
        let mut session = session_starting(Utc::now());

        let mut running = SessionExercise::new("running");
        running.sets = 1;
        running.duration_seconds = 1800; // 30 minutes
        running.completed = true;
        session.exercises.push(running);

        // 30 min * 12 cal/min = 360
        assert!((compute_calories(&session, &catalog) - 360.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calories_for_unknown_exercise_are_zero() {
        let catalog = StaticCatalog::with_exercises(Vec::new());
        let mut session = session_starting(Utc::now());
        let mut mystery = SessionExercise::new("push-ups");
        mystery.sets = 5;
        mystery.completed = true;
        session.exercises.push(mystery);

        assert!(compute_calories(&session, &catalog).abs() < f64::EPSILON);
    }
}
