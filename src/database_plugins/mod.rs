// ABOUTME: Database abstraction layer for ChronoFit session storage
// ABOUTME: Plugin architecture with a SQLite backend behind a provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use chronofit_core::models::WorkoutSession;

pub mod factory;
pub mod sqlite;

/// Core session storage trait
///
/// All storage backends implement this trait to provide a consistent
/// interface to the session lifecycle layer.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Run database migrations to set up schema
    async fn migrate(&self) -> Result<()>;

    /// Insert or update a session record
    async fn save(&self, session: &WorkoutSession) -> Result<()>;

    /// Get a session by ID
    async fn get_session(&self, session_id: Uuid) -> Result<Option<WorkoutSession>>;

    /// Get the user's active session, if any
    async fn find_active(&self, user_id: Uuid) -> Result<Option<WorkoutSession>>;

    /// List all sessions for a user, most recent first
    async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<WorkoutSession>>;
}
