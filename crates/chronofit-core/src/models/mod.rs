// ABOUTME: Core data models for the ChronoFit session tracking engine
// ABOUTME: Re-exports WorkoutSession, SessionExercise, LocationSample and catalog types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! # Data Models
//!
//! Core data structures for workout session tracking.
//!
//! ## Design Principles
//!
//! - **Derived state**: a session's Active/Ended state is derived from
//!   the presence of `end_time` and can never desynchronize from it
//! - **Append-only tracks**: location samples are immutable once
//!   appended and kept in insertion order
//! - **Serializable**: all models support JSON serialization for
//!   persistence

mod exercise;
mod location;
mod session;

pub use exercise::{Difficulty, ExerciseDefinition};
pub use location::{Coordinate, LocationSample};
pub use session::{ExerciseUpdate, SessionExercise, SessionState, WorkoutSession};
