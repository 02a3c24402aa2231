// ABOUTME: Core types and constants for the ChronoFit session tracking engine
// ABOUTME: Foundation crate with models, error types, geo math, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

#![deny(unsafe_code)]

//! # ChronoFit Core
//!
//! Foundation crate providing shared types for the ChronoFit workout
//! tracking engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Domain error taxonomy (`SessionError`, `LocationError`)
//! - **constants**: Application-wide constants organized by domain
//! - **geo**: Great-circle distance math for GPS tracks
//! - **models**: Core data models (`WorkoutSession`, `SessionExercise`, `LocationSample`)

/// Domain error taxonomy for session tracking operations
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Great-circle distance math for GPS coordinates
pub mod geo;

/// Core data models (sessions, exercises, location samples)
pub mod models;
