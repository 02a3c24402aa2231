// ABOUTME: GPS coordinate and location sample models
// ABOUTME: Immutable timestamped fixes forming a session's location track
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude/longitude in degrees
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A single timestamped GPS fix.
///
/// Samples are immutable once appended to a session's track. The track
/// keeps insertion order and its timestamps are monotonically
/// non-decreasing; out-of-order samples are dropped at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// When the fix was taken (UTC)
    pub timestamp: DateTime<Utc>,
    /// Horizontal accuracy in meters, when the platform reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl LocationSample {
    /// Create a sample without accuracy information
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            accuracy: None,
        }
    }

    /// The sample's position as a coordinate
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
