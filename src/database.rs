// ABOUTME: SQLite storage for workout session records
// ABOUTME: Schema migration, upsert persistence, and row decoding via sqlx
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! # Session Storage
//!
//! SQLite-backed persistence for workout sessions. Exercises and the
//! location track are stored as JSON text columns; timestamps are
//! RFC 3339 text. A partial unique index on `user_id` over rows with a
//! NULL `end_time` enforces at most one active session per user at the
//! storage layer, independent of any in-process checks.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use chronofit_core::models::WorkoutSession;

/// SQLite session store.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains('?')
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                workout_id TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT,
                exercises TEXT NOT NULL DEFAULT '[]',
                location_track TEXT NOT NULL DEFAULT '[]',
                duration_seconds INTEGER NOT NULL DEFAULT 0,
                calories_burned REAL NOT NULL DEFAULT 0,
                distance_meters REAL NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_user ON workout_sessions(user_id)",
        )
        .execute(&self.pool)
        .await?;

        // One active session per user, enforced by the schema itself
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_active \
             ON workout_sessions(user_id) WHERE end_time IS NULL",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or update a session record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the SQL upsert fails,
    /// including a violation of the single-active-session index.
    pub async fn save_session(&self, session: &WorkoutSession) -> Result<()> {
        let exercises = serde_json::to_string(&session.exercises)
            .context("Failed to serialize session exercises")?;
        let location_track = serde_json::to_string(&session.location_track)
            .context("Failed to serialize location track")?;

        sqlx::query(
            r"
            INSERT INTO workout_sessions (
                id, user_id, workout_id, start_time, end_time,
                exercises, location_track,
                duration_seconds, calories_burned, distance_meters
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                end_time = excluded.end_time,
                exercises = excluded.exercises,
                location_track = excluded.location_track,
                duration_seconds = excluded.duration_seconds,
                calories_burned = excluded.calories_burned,
                distance_meters = excluded.distance_meters
            ",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.workout_id.map(|id| id.to_string()))
        .bind(session.start_time.to_rfc3339())
        .bind(session.end_time.map(|t| t.to_rfc3339()))
        .bind(exercises)
        .bind(location_track)
        .bind(i64::try_from(session.duration_seconds).unwrap_or(i64::MAX))
        .bind(session.calories_burned)
        .bind(session.distance_meters)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a session by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub async fn get_session(&self, session_id: Uuid) -> Result<Option<WorkoutSession>> {
        let row = sqlx::query("SELECT * FROM workout_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    /// Fetch the user's active session, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub async fn find_active_session(&self, user_id: Uuid) -> Result<Option<WorkoutSession>> {
        let row = sqlx::query(
            "SELECT * FROM workout_sessions WHERE user_id = ? AND end_time IS NULL",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    /// List all of the user's sessions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            "SELECT * FROM workout_sessions WHERE user_id = ? ORDER BY start_time DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_session).collect()
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutSession> {
    let id_str: String = row.try_get("id")?;
    let user_id_str: String = row.try_get("user_id")?;
    let workout_id_str: Option<String> = row.try_get("workout_id")?;
    let start_time_str: String = row.try_get("start_time")?;
    let end_time_str: Option<String> = row.try_get("end_time")?;
    let exercises_json: String = row.try_get("exercises")?;
    let track_json: String = row.try_get("location_track")?;
    let duration_seconds: i64 = row.try_get("duration_seconds")?;
    let calories_burned: f64 = row.try_get("calories_burned")?;
    let distance_meters: f64 = row.try_get("distance_meters")?;

    Ok(WorkoutSession {
        id: Uuid::parse_str(&id_str).map_err(|e| anyhow!("Invalid session ID: {e}"))?,
        user_id: Uuid::parse_str(&user_id_str).map_err(|e| anyhow!("Invalid user ID: {e}"))?,
        workout_id: workout_id_str
            .map(|s| Uuid::parse_str(&s).map_err(|e| anyhow!("Invalid workout ID: {e}")))
            .transpose()?,
        start_time: parse_timestamp(&start_time_str)?,
        end_time: end_time_str.as_deref().map(parse_timestamp).transpose()?,
        exercises: serde_json::from_str(&exercises_json)
            .context("Failed to parse session exercises")?,
        location_track: serde_json::from_str(&track_json)
            .context("Failed to parse location track")?,
        duration_seconds: u64::try_from(duration_seconds).unwrap_or(0),
        calories_burned,
        distance_meters,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| anyhow!("Invalid timestamp '{value}': {e}"))
}
