// ABOUTME: Workout session lifecycle management keyed by user
// ABOUTME: Enforces single-active-session, drives sampling, and freezes metrics on end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Session lifecycle.
//!
//! [`SessionTracker`] is the single entry point for mutating workout
//! sessions. It owns an in-process registry of active sessions (at most
//! one per user), spawns a location sampler per session, and on `end`
//! stops sampling before computing final metrics so the frozen distance
//! reflects every sample that will ever arrive.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::database_plugins::{factory::Database, SessionRepository};
use crate::metrics;
use crate::sampler::{self, LocationSource, SamplerHandle};
use chronofit_core::errors::{SessionError, SessionResult};
use chronofit_core::models::{ExerciseUpdate, LocationSample, SessionExercise, WorkoutSession};

struct ActiveEntry {
    session: Arc<RwLock<WorkoutSession>>,
    sampler: Option<SamplerHandle>,
}

/// Tracks workout sessions for all users of this process.
pub struct SessionTracker {
    repository: Arc<Database>,
    catalog: Arc<dyn ExerciseCatalog>,
    active: DashMap<Uuid, ActiveEntry>,
    max_fix_age: Duration,
}

impl SessionTracker {
    /// Create a tracker with the default stale-fix threshold.
    #[must_use]
    pub fn new(repository: Arc<Database>, catalog: Arc<dyn ExerciseCatalog>) -> Self {
        Self::with_max_fix_age(repository, catalog, sampler::default_max_fix_age())
    }

    /// Create a tracker with an explicit stale-fix threshold.
    #[must_use]
    pub fn with_max_fix_age(
        repository: Arc<Database>,
        catalog: Arc<dyn ExerciseCatalog>,
        max_fix_age: Duration,
    ) -> Self {
        Self {
            repository,
            catalog,
            active: DashMap::new(),
            max_fix_age,
        }
    }

    /// Start a new session for `user_id`.
    ///
    /// Fails with [`SessionError::AlreadyActiveSession`] if the user
    /// already has one, whether in this process or persisted by another.
    /// The new session is saved immediately so a crash cannot lose the
    /// fact that it started, then a sampler task is attached.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActiveSession` or `Persistence`.
    pub async fn start(
        &self,
        user_id: Uuid,
        workout_id: Option<Uuid>,
        source: &dyn LocationSource,
    ) -> SessionResult<WorkoutSession> {
        if let Some(existing) = self.entry_arc(user_id) {
            if existing.read().await.is_active() {
                return Err(SessionError::AlreadyActiveSession { user_id });
            }
            // A previous end is still awaiting persistence; flush it
            // before a new session may begin.
            self.persist(user_id).await?;
        }

        let persisted_active = self
            .repository
            .find_active(user_id)
            .await
            .map_err(|source| SessionError::Persistence { source })?;
        if persisted_active.is_some() {
            return Err(SessionError::AlreadyActiveSession { user_id });
        }

        let session = WorkoutSession::new(user_id, workout_id, Utc::now());
        self.repository
            .save(&session)
            .await
            .map_err(|source| SessionError::Persistence { source })?;

        info!(user_id = %user_id, session_id = %session.id, "workout session started");

        let shared = Arc::new(RwLock::new(session.clone()));
        let handle = sampler::spawn(Arc::clone(&shared), source, self.max_fix_age);
        self.active.insert(
            user_id,
            ActiveEntry {
                session: shared,
                sampler: Some(handle),
            },
        );

        Ok(session)
    }

    /// Add a catalog exercise to the user's active session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`, `ExerciseNotFound`, or
    /// `DuplicateExercise`.
    pub async fn add_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
    ) -> SessionResult<SessionExercise> {
        if self.catalog.lookup(exercise_id).is_none() {
            return Err(SessionError::ExerciseNotFound {
                exercise_id: exercise_id.to_string(),
            });
        }

        let session = self.active_arc(user_id)?;
        let mut guard = session.write().await;
        if !guard.is_active() {
            return Err(SessionError::SessionNotActive { user_id });
        }
        if guard.exercise(exercise_id).is_some() {
            return Err(SessionError::DuplicateExercise {
                exercise_id: exercise_id.to_string(),
            });
        }

        let exercise = SessionExercise::new(exercise_id);
        guard.exercises.push(exercise.clone());
        debug!(user_id = %user_id, exercise_id = %exercise_id, "exercise added to session");
        Ok(exercise)
    }

    /// Apply a partial update to one exercise in the active session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`, `UnknownExercise`, or
    /// `InvalidValue` if the update carries a non-finite or negative
    /// weight.
    pub async fn update_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        update: &ExerciseUpdate,
    ) -> SessionResult<SessionExercise> {
        update.validate()?;

        let session = self.active_arc(user_id)?;
        let mut guard = session.write().await;
        if !guard.is_active() {
            return Err(SessionError::SessionNotActive { user_id });
        }
        let Some(exercise) = guard.exercise_mut(exercise_id) else {
            return Err(SessionError::UnknownExercise {
                exercise_id: exercise_id.to_string(),
            });
        };
        update.apply(exercise);
        Ok(exercise.clone())
    }

    /// Remove an exercise from the active session.
    ///
    /// Removing an exercise that is not present is a no-op, so retries
    /// are harmless.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`.
    pub async fn remove_exercise(&self, user_id: Uuid, exercise_id: &str) -> SessionResult<()> {
        let session = self.active_arc(user_id)?;
        let mut guard = session.write().await;
        if !guard.is_active() {
            return Err(SessionError::SessionNotActive { user_id });
        }
        guard.exercises.retain(|e| e.exercise_id != exercise_id);
        Ok(())
    }

    /// Append a location sample to the active session's track.
    ///
    /// This is the manual-injection path; the sampler task normally
    /// feeds the track. Returns `false` when the sample arrives out of
    /// order and is dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`.
    pub async fn record_sample(
        &self,
        user_id: Uuid,
        sample: LocationSample,
    ) -> SessionResult<bool> {
        let session = self.active_arc(user_id)?;
        let mut guard = session.write().await;
        if !guard.is_active() {
            return Err(SessionError::SessionNotActive { user_id });
        }
        let accepted = guard.record_sample(sample);
        if !accepted {
            warn!(
                user_id = %user_id,
                session_id = %guard.id,
                "dropping out-of-order location sample"
            );
        }
        Ok(accepted)
    }

    /// End the user's active session.
    ///
    /// Sampling is stopped and awaited first, so no sample can land
    /// after the metrics are frozen. Duration, distance, and calories
    /// are computed once and stored on the record, which is then saved.
    /// If saving fails the finalized record is retained in memory and
    /// [`persist`](Self::persist) may be called to retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive` or `Persistence`.
    pub async fn end(&self, user_id: Uuid) -> SessionResult<WorkoutSession> {
        let Some((_, mut entry)) = self.active.remove(&user_id) else {
            return Err(SessionError::SessionNotActive { user_id });
        };

        if let Some(handle) = entry.sampler.take() {
            handle.stop().await;
        }

        let snapshot = {
            let mut guard = entry.session.write().await;
            if guard.is_active() {
                let now = Utc::now();
                guard.end_time = Some(now);
                guard.duration_seconds = metrics::compute_duration(&guard, now);
                guard.distance_meters = metrics::compute_distance(&guard.location_track);
                guard.calories_burned = metrics::compute_calories(&guard, self.catalog.as_ref());
            }
            guard.clone()
        };

        if let Err(source) = self.repository.save(&snapshot).await {
            warn!(
                user_id = %user_id,
                session_id = %snapshot.id,
                error = %source,
                "failed to persist ended session, retaining for retry"
            );
            self.active.insert(user_id, entry);
            return Err(SessionError::Persistence { source });
        }

        info!(
            user_id = %user_id,
            session_id = %snapshot.id,
            duration_seconds = snapshot.duration_seconds,
            distance_meters = snapshot.distance_meters,
            calories_burned = snapshot.calories_burned,
            "workout session ended"
        );
        Ok(snapshot)
    }

    /// Save the user's tracked session as it stands.
    ///
    /// Used both for mid-session checkpoints and to retry after a
    /// failed `end`. If the session has already ended, a successful
    /// save releases it from the registry.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive` or `Persistence`.
    pub async fn persist(&self, user_id: Uuid) -> SessionResult<WorkoutSession> {
        let session = self.active_arc(user_id)?;
        let snapshot = session.read().await.clone();

        self.repository
            .save(&snapshot)
            .await
            .map_err(|source| SessionError::Persistence { source })?;

        if snapshot.end_time.is_some() {
            self.active.remove(&user_id);
            debug!(user_id = %user_id, session_id = %snapshot.id, "ended session persisted on retry");
        }
        Ok(snapshot)
    }

    /// Reattach to a persisted active session, e.g. after a restart.
    ///
    /// Returns `Ok(None)` when the user has no active session anywhere.
    /// If one is already tracked in this process its snapshot is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Persistence`.
    pub async fn resume(
        &self,
        user_id: Uuid,
        source: &dyn LocationSource,
    ) -> SessionResult<Option<WorkoutSession>> {
        if let Some(existing) = self.entry_arc(user_id) {
            let snapshot = existing.read().await.clone();
            return Ok(Some(snapshot));
        }

        let Some(session) = self
            .repository
            .find_active(user_id)
            .await
            .map_err(|source| SessionError::Persistence { source })?
        else {
            return Ok(None);
        };

        info!(user_id = %user_id, session_id = %session.id, "resuming persisted session");

        let shared = Arc::new(RwLock::new(session.clone()));
        let handle = sampler::spawn(Arc::clone(&shared), source, self.max_fix_age);
        self.active.insert(
            user_id,
            ActiveEntry {
                session: shared,
                sampler: Some(handle),
            },
        );
        Ok(Some(session))
    }

    /// Snapshot of the user's tracked session, if any.
    pub async fn active_session(&self, user_id: Uuid) -> Option<WorkoutSession> {
        let session = self.entry_arc(user_id)?;
        let snapshot = session.read().await.clone();
        Some(snapshot)
    }

    /// Check whether location sampling is still healthy for the user's
    /// tracked session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive` when no session is tracked, or
    /// [`SessionError::LocationUnavailable`] when the session's
    /// location source failed and sampling stopped early.
    pub fn location_status(&self, user_id: Uuid) -> SessionResult<()> {
        let Some(entry) = self.active.get(&user_id) else {
            return Err(SessionError::SessionNotActive { user_id });
        };
        if let Some(err) = entry.sampler.as_ref().and_then(SamplerHandle::failure) {
            return Err(err.into());
        }
        Ok(())
    }

    /// Stop location sampling without ending the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`.
    pub async fn stop_sampling(&self, user_id: Uuid) -> SessionResult<()> {
        let handle = {
            let Some(mut entry) = self.active.get_mut(&user_id) else {
                return Err(SessionError::SessionNotActive { user_id });
            };
            entry.sampler.take()
        };
        if let Some(handle) = handle {
            handle.stop().await;
        }
        Ok(())
    }

    /// Replace the session's location source, stopping any running
    /// sampler first.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotActive`.
    pub async fn restart_sampling(
        &self,
        user_id: Uuid,
        source: &dyn LocationSource,
    ) -> SessionResult<()> {
        self.stop_sampling(user_id).await?;

        let session = self.active_arc(user_id)?;
        let handle = sampler::spawn(session, source, self.max_fix_age);
        if let Some(mut entry) = self.active.get_mut(&user_id) {
            entry.sampler = Some(handle);
            Ok(())
        } else {
            // Session ended between stop and respawn.
            handle.stop().await;
            Err(SessionError::SessionNotActive { user_id })
        }
    }

    fn entry_arc(&self, user_id: Uuid) -> Option<Arc<RwLock<WorkoutSession>>> {
        self.active
            .get(&user_id)
            .map(|entry| Arc::clone(&entry.session))
    }

    fn active_arc(&self, user_id: Uuid) -> SessionResult<Arc<RwLock<WorkoutSession>>> {
        self.entry_arc(user_id)
            .ok_or(SessionError::SessionNotActive { user_id })
    }
}
