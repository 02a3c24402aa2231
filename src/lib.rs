// ABOUTME: Main library entry point for the ChronoFit session tracking engine
// ABOUTME: Provides session lifecycle, metrics, location sampling, and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

#![deny(unsafe_code)]

//! # ChronoFit Session Engine
//!
//! The workout-session tracking core of the ChronoFit fitness platform:
//! session lifecycle (start/end), exercise progress mutation, GPS
//! location sampling, and derived metric computation (duration,
//! distance, calories).
//!
//! ## Architecture
//!
//! The engine follows a modular architecture:
//! - **session**: The lifecycle state machine ([`session::SessionTracker`])
//! - **sampler**: Background location sampling from a [`sampler::LocationSource`]
//! - **metrics**: Pure derived-metric computation, recomputed on every call
//! - **catalog**: Read-only exercise reference data with calorie rates
//! - **`database_plugins`**: Repository abstraction over durable storage
//!
//! The engine is invoked in-process by an application layer (REST
//! handlers, CLI tools); no wire protocol is defined here.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chronofit::catalog::StaticCatalog;
//! use chronofit::database_plugins::factory::Database;
//! use chronofit::sampler::NullLocationSource;
//! use chronofit::session::SessionTracker;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let database = Arc::new(Database::new("sqlite::memory:").await?);
//!     let tracker = SessionTracker::new(database, Arc::new(StaticCatalog::default()));
//!
//!     let session = tracker.start(Uuid::new_v4(), None, &NullLocationSource).await?;
//!     println!("session {} started", session.id);
//!     Ok(())
//! }
//! ```

/// Exercise catalog collaborator with built-in reference data
pub mod catalog;

/// Configuration management (environment-driven)
pub mod config;

/// `SQLite` session storage implementation
pub mod database;

/// Repository abstraction with pluggable storage backends
pub mod database_plugins;

/// Structured logging configuration
pub mod logging;

/// Derived metric computation (duration, distance, calories)
pub mod metrics;

/// Location sampling stream and background task
pub mod sampler;

/// Session lifecycle state machine
pub mod session;

// Foundation types from the core crate, re-exported for convenience
pub use chronofit_core::{constants, errors, geo, models};
