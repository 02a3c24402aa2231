// ABOUTME: Demo data seeder for ChronoFit session history testing
// ABOUTME: Generates completed workout sessions for a demo user over recent days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Demo data seeder for ChronoFit.
//!
//! This binary populates the database with completed workout sessions
//! so the history and metrics views have realistic data to show.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Seed against a specific database
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/chronofit.db
//!
//! # More history
//! cargo run --bin seed-demo-data -- --days 60
//! ```

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use tracing::info;
use uuid::Uuid;

use chronofit::catalog::{ExerciseCatalog, StaticCatalog};
use chronofit::config::ServerConfig;
use chronofit::database_plugins::{factory::Database, SessionRepository};
use chronofit::logging::LoggingConfig;
use chronofit::metrics;
use chronofit::models::{SessionExercise, WorkoutSession};

/// Deterministic UUID for the demo account (demo@chronofit.com).
const DEMO_USER_ID: &str = "7f0b2a46-1f5e-4c3a-9d6b-8e2a41c90d11";

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "ChronoFit Demo Data Seeder",
    long_about = "Populate the database with completed workout sessions for testing"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of days of historical sessions to generate
    #[arg(long, default_value = "14")]
    days: u32,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = ServerConfig::from_env()?;
    let database_url = args.database_url.unwrap_or(config.database_url);

    let database = Arc::new(Database::new(&database_url).await?);
    let catalog = StaticCatalog::default();
    let user_id = Uuid::parse_str(DEMO_USER_ID)?;

    let count = seed_sessions(&database, &catalog, user_id, args.days).await?;
    info!(user_id = %user_id, sessions = count, "demo data seeded");
    Ok(())
}

/// Rotate through the built-in exercises, one completed session per day.
async fn seed_sessions(
    database: &Arc<Database>,
    catalog: &StaticCatalog,
    user_id: Uuid,
    days: u32,
) -> Result<usize> {
    let exercises = catalog.all();
    let mut seeded = 0;

    for day in 1..=i64::from(days) {
        let start = Utc::now() - Duration::days(day) - Duration::minutes(45);
        let mut session = WorkoutSession::new(user_id, None, start);

        // Two exercises per session, rotating through the catalog
        for slot in 0..2usize {
            let definition = &exercises[(seeded + slot) % exercises.len()];
            let mut exercise = SessionExercise::new(&definition.id);
            exercise.sets = 3;
            exercise.reps = 12;
            exercise.completed = true;
            session.exercises.push(exercise);
        }

        let end = start + Duration::minutes(45);
        session.end_time = Some(end);
        session.duration_seconds = metrics::compute_duration(&session, end);
        session.calories_burned = metrics::compute_calories(&session, catalog);
        session.distance_meters = 0.0;

        database.save(&session).await?;
        seeded += 1;
    }

    Ok(seeded)
}
