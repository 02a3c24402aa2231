// ABOUTME: Exercise catalog collaborator interface and built-in reference data
// ABOUTME: Read-only lookups feeding calorie estimation and exercise validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Exercise catalog collaborator.
//!
//! The catalog is read-only reference data during a session and may be
//! freely shared and cached. The engine consumes it through the
//! [`ExerciseCatalog`] trait; [`StaticCatalog`] ships the built-in
//! exercise library.

use std::collections::HashMap;

use chronofit_core::models::{Difficulty, ExerciseDefinition};

/// Read-only exercise lookup consumed by the session engine.
///
/// `add_exercise` validates ids against the catalog, and calorie
/// computation reads per-minute rates from it.
pub trait ExerciseCatalog: Send + Sync {
    /// Look up an exercise definition by its catalog id
    fn lookup(&self, exercise_id: &str) -> Option<ExerciseDefinition>;

    /// All catalog entries, in unspecified order
    fn all(&self) -> Vec<ExerciseDefinition>;
}

/// In-memory catalog backed by a keyed map.
///
/// [`StaticCatalog::default`] carries the built-in exercise library;
/// [`StaticCatalog::with_exercises`] builds a custom catalog (used in
/// tests and by deployments with their own exercise data).
pub struct StaticCatalog {
    by_id: HashMap<String, ExerciseDefinition>,
}

impl StaticCatalog {
    /// Build a catalog from the given definitions
    #[must_use]
    pub fn with_exercises(exercises: Vec<ExerciseDefinition>) -> Self {
        Self {
            by_id: exercises
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::with_exercises(builtin_exercises())
    }
}

impl ExerciseCatalog for StaticCatalog {
    fn lookup(&self, exercise_id: &str) -> Option<ExerciseDefinition> {
        self.by_id.get(exercise_id).cloned()
    }

    fn all(&self) -> Vec<ExerciseDefinition> {
        self.by_id.values().cloned().collect()
    }
}

/// The built-in exercise library
fn builtin_exercises() -> Vec<ExerciseDefinition> {
    vec![
        ExerciseDefinition {
            id: "push-ups".into(),
            name: "Push-ups".into(),
            category: "Strength".into(),
            difficulty: Difficulty::Beginner,
            equipment: "bodyweight".into(),
            target_muscles: vec!["chest".into(), "shoulders".into(), "triceps".into()],
            instructions: vec![
                "Start in a plank position with hands shoulder-width apart".into(),
                "Lower your body until your chest nearly touches the floor".into(),
                "Push back up to the starting position".into(),
                "Keep your core tight throughout the movement".into(),
            ],
            calories_per_minute: 8.0,
        },
        ExerciseDefinition {
            id: "squats".into(),
            name: "Squats".into(),
            category: "Strength".into(),
            difficulty: Difficulty::Beginner,
            equipment: "bodyweight".into(),
            target_muscles: vec!["quadriceps".into(), "glutes".into(), "hamstrings".into()],
            instructions: vec![
                "Stand with feet shoulder-width apart".into(),
                "Lower your body as if sitting back into a chair".into(),
                "Keep your chest up and knees behind your toes".into(),
                "Return to standing position".into(),
            ],
            calories_per_minute: 6.0,
        },
        ExerciseDefinition {
            id: "running".into(),
            name: "Running".into(),
            category: "Cardio".into(),
            difficulty: Difficulty::Intermediate,
            equipment: "none".into(),
            target_muscles: vec!["legs".into(), "cardiovascular".into()],
            instructions: vec![
                "Start with a light warm-up walk".into(),
                "Gradually increase pace to a comfortable run".into(),
                "Maintain steady breathing".into(),
                "Cool down with walking".into(),
            ],
            calories_per_minute: 12.0,
        },
        ExerciseDefinition {
            id: "cycling".into(),
            name: "Cycling".into(),
            category: "Cardio".into(),
            difficulty: Difficulty::Beginner,
            equipment: "bicycle".into(),
            target_muscles: vec!["legs".into(), "cardiovascular".into()],
            instructions: vec![
                "Adjust seat height properly".into(),
                "Start pedaling at a comfortable pace".into(),
                "Maintain proper posture".into(),
                "Gradually increase intensity".into(),
            ],
            calories_per_minute: 10.0,
        },
        ExerciseDefinition {
            id: "plank".into(),
            name: "Plank".into(),
            category: "Core".into(),
            difficulty: Difficulty::Intermediate,
            equipment: "bodyweight".into(),
            target_muscles: vec!["core".into(), "shoulders".into(), "back".into()],
            instructions: vec![
                "Start in a push-up position".into(),
                "Lower onto your forearms".into(),
                "Keep your body in a straight line".into(),
                "Hold the position while breathing normally".into(),
            ],
            calories_per_minute: 5.0,
        },
        ExerciseDefinition {
            id: "burpees".into(),
            name: "Burpees".into(),
            category: "HIIT".into(),
            difficulty: Difficulty::Advanced,
            equipment: "bodyweight".into(),
            target_muscles: vec!["full body".into(), "cardiovascular".into()],
            instructions: vec![
                "Start standing, then squat down".into(),
                "Jump feet back into plank position".into(),
                "Do a push-up".into(),
                "Jump feet back to squat, then jump up with arms overhead".into(),
            ],
            calories_per_minute: 15.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = StaticCatalog::default();
        let running = catalog.lookup("running");
        assert!(running.is_some());
        assert!((running.map_or(0.0, |e| e.calories_per_minute) - 12.0).abs() < f64::EPSILON);
        assert!(catalog.lookup("deadlift").is_none());
        assert_eq!(catalog.all().len(), 6);
    }
}
