// ABOUTME: Database factory and repository abstraction for backend selection
// ABOUTME: Detects the backend from the connection string at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Database factory for creating session repositories
//!
//! This module provides automatic database type detection and creation
//! based on connection strings.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::sqlite::SqliteDatabase;
use super::SessionRepository;
use chronofit_core::models::WorkoutSession;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    SQLite(SqliteDatabase),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (Embedded)",
        }
    }

    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Create a new database instance based on the connection string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL format is unsupported or invalid
    /// - Database connection fails
    /// - Database initialization or migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        debug!("Detecting database type from URL: {}", database_url);
        let db_type = detect_database_type(database_url)?;
        info!("Detected database type: {:?}", db_type);

        match db_type {
            DatabaseType::SQLite => {
                let db = SqliteDatabase::new(database_url).await?;
                info!("SQLite database initialized successfully");
                Ok(Self::SQLite(db))
            }
        }
    }
}

/// Automatically detect database type from connection string
///
/// # Errors
///
/// Returns an error if the URL format is not recognized (must start
/// with `sqlite:`).
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else {
        Err(anyhow!(
            "Unsupported database URL format: {}. \
             Supported formats: sqlite:path/to/db.sqlite, sqlite::memory:",
            database_url
        ))
    }
}

#[async_trait]
impl SessionRepository for Database {
    async fn migrate(&self) -> Result<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
        }
    }

    async fn save(&self, session: &WorkoutSession) -> Result<()> {
        match self {
            Self::SQLite(db) => db.save(session).await,
        }
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<WorkoutSession>> {
        match self {
            Self::SQLite(db) => db.get_session(session_id).await,
        }
    }

    async fn find_active(&self, user_id: Uuid) -> Result<Option<WorkoutSession>> {
        match self {
            Self::SQLite(db) => db.find_active(user_id).await,
        }
    }

    async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<WorkoutSession>> {
        match self {
            Self::SQLite(db) => db.sessions_for_user(user_id).await,
        }
    }
}
