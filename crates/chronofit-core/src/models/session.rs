// ABOUTME: Workout session and session exercise models
// ABOUTME: Session state is derived from end_time; location tracks are append-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LocationSample;
use crate::constants::session::DEFAULT_REST_SECONDS;
use crate::errors::{SessionError, SessionResult};

/// Lifecycle state of a workout session.
///
/// There is no Paused state: pausing is a UI concept and does not stop
/// duration or location accrual in the core model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The session is running and accepting mutations
    Active,
    /// The session has ended; its metrics are frozen
    Ended,
}

/// One exercise's progress within a session.
///
/// All numeric fields are non-negative. Field mutation is idempotent:
/// re-setting a field to its current value is observably a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExercise {
    /// Catalog id this exercise refers to (unique within the session)
    pub exercise_id: String,
    /// Completed set count
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Working weight in kilograms
    pub weight_kg: f64,
    /// Explicit exercise duration in seconds, 0 when untimed
    pub duration_seconds: u64,
    /// Rest between sets in seconds
    pub rest_seconds: u64,
    /// Whether the user marked the exercise as done. Calories are only
    /// credited for completed exercises.
    pub completed: bool,
}

impl SessionExercise {
    /// Create a fresh exercise entry with default rest time
    #[must_use]
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            sets: 0,
            reps: 0,
            weight_kg: 0.0,
            duration_seconds: 0,
            rest_seconds: DEFAULT_REST_SECONDS,
            completed: false,
        }
    }
}

/// A partial update to a session exercise.
///
/// Absent fields are left untouched; present fields replace the current
/// value after non-negative validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseUpdate {
    /// New set count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// New repetition count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// New working weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// New explicit duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    /// New rest time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u64>,
    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ExerciseUpdate {
    /// Validate the update without applying it.
    ///
    /// Integer fields are non-negative by construction; the weight is
    /// the only field that can carry an invalid value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidValue`] for a negative or
    /// non-finite weight.
    pub fn validate(&self) -> SessionResult<()> {
        if let Some(weight) = self.weight_kg {
            if !weight.is_finite() {
                return Err(SessionError::InvalidValue {
                    field: "weight_kg",
                    reason: "must be a finite number",
                });
            }
            if weight < 0.0 {
                return Err(SessionError::InvalidValue {
                    field: "weight_kg",
                    reason: "must be non-negative",
                });
            }
        }
        Ok(())
    }

    /// Merge the update into an exercise entry. Call [`Self::validate`]
    /// first; this method assumes the update is valid.
    pub fn apply(&self, exercise: &mut SessionExercise) {
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(weight) = self.weight_kg {
            exercise.weight_kg = weight;
        }
        if let Some(duration) = self.duration_seconds {
            exercise.duration_seconds = duration;
        }
        if let Some(rest) = self.rest_seconds {
            exercise.rest_seconds = rest;
        }
        if let Some(completed) = self.completed {
            exercise.completed = completed;
        }
    }
}

/// One tracked workout instance from start to end.
///
/// Created in Active state, mutated in place while Active, and
/// transitioned exactly once to Ended, at which point the derived
/// metrics (`duration_seconds`, `calories_burned`, `distance_meters`)
/// are computed a final time and frozen. The state is derived from the
/// presence of `end_time` and is never stored redundantly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique session identifier, assigned at creation
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Optional planned workout this session executes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Uuid>,
    /// When the session started (UTC), set exactly once at creation
    pub start_time: DateTime<Utc>,
    /// When the session ended (UTC); absent while Active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Exercises tracked in this session, keyed by `exercise_id`
    pub exercises: Vec<SessionExercise>,
    /// Append-only GPS track in insertion order
    pub location_track: Vec<LocationSample>,
    /// Frozen total duration in seconds; 0 until the session ends
    pub duration_seconds: u64,
    /// Frozen calorie estimate; 0.0 until the session ends
    pub calories_burned: f64,
    /// Frozen track distance in meters; 0.0 until the session ends
    pub distance_meters: f64,
}

impl WorkoutSession {
    /// Create a new Active session starting now
    #[must_use]
    pub fn new(user_id: Uuid, workout_id: Option<Uuid>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            start_time,
            end_time: None,
            exercises: Vec::new(),
            location_track: Vec::new(),
            duration_seconds: 0,
            calories_burned: 0.0,
            distance_meters: 0.0,
        }
    }

    /// The session's lifecycle state, derived from `end_time`
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.end_time.is_some() {
            SessionState::Ended
        } else {
            SessionState::Active
        }
    }

    /// Whether the session is still accepting mutations
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Look up an exercise entry by catalog id
    #[must_use]
    pub fn exercise(&self, exercise_id: &str) -> Option<&SessionExercise> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }

    /// Mutable lookup of an exercise entry by catalog id
    pub fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut SessionExercise> {
        self.exercises
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id)
    }

    /// Number of exercises the user has marked complete
    #[must_use]
    pub fn completed_exercises(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }

    /// Timestamp of the most recent sample on the track
    #[must_use]
    pub fn last_sample_time(&self) -> Option<DateTime<Utc>> {
        self.location_track.last().map(|s| s.timestamp)
    }

    /// Append a location sample if it keeps the track's timestamps
    /// monotonically non-decreasing.
    ///
    /// Returns `false` when the sample arrived out of order and was
    /// dropped. Callers log the drop; it is not an error.
    pub fn record_sample(&mut self, sample: LocationSample) -> bool {
        if let Some(last) = self.last_sample_time() {
            if sample.timestamp < last {
                return false;
            }
        }
        self.location_track.push(sample);
        true
    }
}
