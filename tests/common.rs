// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, tracker, and scripted location source helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `chronofit`
//!
//! Common setup functions to reduce duplication across integration
//! tests.

use anyhow::Result;
use futures_util::stream::{BoxStream, StreamExt};
use std::sync::{Arc, Once};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use chronofit::catalog::StaticCatalog;
use chronofit::database_plugins::factory::Database;
use chronofit::errors::LocationError;
use chronofit::models::LocationSample;
use chronofit::sampler::LocationSource;
use chronofit::session::SessionTracker;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Tracker over an in-memory database with the built-in catalog
pub async fn create_test_tracker() -> Result<SessionTracker> {
    let database = create_test_database().await?;
    Ok(SessionTracker::new(
        database,
        Arc::new(StaticCatalog::default()),
    ))
}

/// A location source fed by one test-controlled channel.
///
/// Each call to `watch` drains the same channel, so create one source
/// per session. Dropping the sender ends the stream.
pub struct ScriptedLocationSource {
    rx: std::sync::Mutex<Option<mpsc::Receiver<Result<LocationSample, LocationError>>>>,
}

impl ScriptedLocationSource {
    pub fn channel() -> (
        mpsc::Sender<Result<LocationSample, LocationError>>,
        Self,
    ) {
        let (tx, rx) = mpsc::channel(16);
        (
            tx,
            Self {
                rx: std::sync::Mutex::new(Some(rx)),
            },
        )
    }
}

impl LocationSource for ScriptedLocationSource {
    fn watch(&self) -> BoxStream<'static, Result<LocationSample, LocationError>> {
        let rx = self
            .rx
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());
        match rx {
            Some(rx) => ReceiverStream::new(rx).boxed(),
            None => futures_util::stream::empty().boxed(),
        }
    }
}
