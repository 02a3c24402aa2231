// ABOUTME: Environment-based configuration for the session engine
// ABOUTME: Reads database URL and sampling settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Environment configuration
//!
//! All settings have working defaults so a bare process starts against
//! a local SQLite file with standard sampling behavior.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use chronofit_core::constants::sampling::MAX_FIX_AGE_SECONDS;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection string
    pub database_url: String,
    /// Maximum age a location fix may have before it is discarded
    pub max_fix_age: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/chronofit.db".into(),
            max_fix_age: Duration::from_secs(MAX_FIX_AGE_SECONDS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `DATABASE_URL`, `MAX_FIX_AGE_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAX_FIX_AGE_SECONDS` is set but not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_fix_age = match env::var("MAX_FIX_AGE_SECONDS") {
            Ok(raw) => {
                let seconds: u64 = raw
                    .parse()
                    .with_context(|| format!("Invalid MAX_FIX_AGE_SECONDS value: {raw}"))?;
                Duration::from_secs(seconds)
            }
            Err(_) => defaults.max_fix_age,
        };

        Ok(Self {
            database_url,
            max_fix_age,
        })
    }
}
