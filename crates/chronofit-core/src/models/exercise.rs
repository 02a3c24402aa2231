// ABOUTME: Exercise catalog entry models
// ABOUTME: Read-only reference data describing exercises and their calorie rates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

use serde::{Deserialize, Serialize};

/// Difficulty rating for a catalog exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Suitable for newcomers
    Beginner,
    /// Requires some training history
    Intermediate,
    /// Demanding form or conditioning
    Advanced,
}

/// A read-only exercise catalog entry.
///
/// Catalog entries are reference data: they describe an exercise and its
/// estimated energy expenditure but carry no per-session progress. They
/// may be freely shared and cached during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Stable catalog identifier
    pub id: String,
    /// Display name (e.g. "Push-ups")
    pub name: String,
    /// Category (e.g. "Strength", "Cardio", "HIIT")
    pub category: String,
    /// Difficulty rating
    pub difficulty: Difficulty,
    /// Required equipment ("bodyweight", "bicycle", ...)
    pub equipment: String,
    /// Muscle groups the exercise targets
    pub target_muscles: Vec<String>,
    /// Step-by-step instructions
    pub instructions: Vec<String>,
    /// Estimated calories burned per minute of activity
    pub calories_per_minute: f64,
}
