// ABOUTME: SQLite backend for the SessionRepository trait
// ABOUTME: Thin delegation wrapper around the database module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! SQLite repository implementation
//!
//! Wraps the SQLite database functionality to implement the
//! [`SessionRepository`] trait.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::SessionRepository;
use chronofit_core::models::WorkoutSession;

/// SQLite repository implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    inner: crate::database::Database,
}

impl SqliteDatabase {
    /// Connect and migrate.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let inner = crate::database::Database::new(database_url).await?;
        Ok(Self { inner })
    }

    /// Get a reference to the inner database for advanced operations
    pub const fn inner(&self) -> &crate::database::Database {
        &self.inner
    }
}

#[async_trait]
impl SessionRepository for SqliteDatabase {
    async fn migrate(&self) -> Result<()> {
        self.inner.migrate().await
    }

    async fn save(&self, session: &WorkoutSession) -> Result<()> {
        self.inner.save_session(session).await
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<WorkoutSession>> {
        self.inner.get_session(session_id).await
    }

    async fn find_active(&self, user_id: Uuid) -> Result<Option<WorkoutSession>> {
        self.inner.find_active_session(user_id).await
    }

    async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<WorkoutSession>> {
        self.inner.sessions_for_user(user_id).await
    }
}
