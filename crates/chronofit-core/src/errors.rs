// ABOUTME: Domain error taxonomy for session tracking operations
// ABOUTME: Defines SessionError and LocationError with structured context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Domain errors for the session tracking engine.
//!
//! Every failure in the engine is reported synchronously to the caller
//! through one of these types; nothing here represents a crash. The only
//! silently handled condition in the whole engine is an out-of-order
//! location sample, which is dropped with a log line rather than an error.

use uuid::Uuid;

/// Errors surfaced by the session lifecycle state machine
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The user already has an Active session; at most one is allowed
    #[error("user {user_id} already has an active session")]
    AlreadyActiveSession {
        /// User who attempted to start a second session
        user_id: Uuid,
    },

    /// The operation requires an Active session but none exists (or it
    /// has already ended)
    #[error("no active session for user {user_id}")]
    SessionNotActive {
        /// User the operation was attempted for
        user_id: Uuid,
    },

    /// The exercise is not part of the session; exercises are only
    /// created through an explicit add, never implicitly on update
    #[error("exercise '{exercise_id}' is not part of the session")]
    UnknownExercise {
        /// Catalog id of the missing exercise
        exercise_id: String,
    },

    /// The exercise was already added to the session
    #[error("exercise '{exercise_id}' is already part of the session")]
    DuplicateExercise {
        /// Catalog id of the duplicated exercise
        exercise_id: String,
    },

    /// The exercise catalog has no entry for this id
    #[error("exercise '{exercise_id}' does not exist in the catalog")]
    ExerciseNotFound {
        /// Catalog id that failed the lookup
        exercise_id: String,
    },

    /// A field update failed non-negative-value validation
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the rejected field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// The location source is unavailable or denied permission
    #[error("location source unavailable: {reason}")]
    LocationUnavailable {
        /// Platform-reported reason
        reason: String,
    },

    /// The repository failed. A failed save on `end` retains the
    /// finalized in-memory record so the save can be retried.
    #[error("session persistence failed")]
    Persistence {
        /// Underlying storage error
        #[source]
        source: anyhow::Error,
    },
}

/// Result type alias for session lifecycle operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors produced by a platform location source
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    /// The source cannot provide fixes (no hardware, no signal)
    #[error("location source unavailable: {reason}")]
    Unavailable {
        /// Platform-reported reason
        reason: String,
    },

    /// The user or platform denied location permission
    #[error("location permission denied")]
    PermissionDenied,
}

impl From<LocationError> for SessionError {
    fn from(err: LocationError) -> Self {
        Self::LocationUnavailable {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let user_id = Uuid::new_v4();
        let err = SessionError::AlreadyActiveSession { user_id };
        assert!(err.to_string().contains(&user_id.to_string()));

        let err = SessionError::UnknownExercise {
            exercise_id: "push-ups".into(),
        };
        assert!(err.to_string().contains("push-ups"));
    }

    #[test]
    fn test_location_error_converts_to_session_error() {
        let err: SessionError = LocationError::PermissionDenied.into();
        assert!(matches!(err, SessionError::LocationUnavailable { .. }));
    }
}
