// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for geo math, session policy, and location sampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Constants module
//!
//! Application constants grouped by domain rather than collected in a
//! single flat namespace.

/// Geodesic computation constants
pub mod geo {
    /// Mean Earth radius in meters, used by the Haversine formula
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// Session policy constants
pub mod session {
    /// Rest time assigned to a newly added session exercise, in seconds
    pub const DEFAULT_REST_SECONDS: u64 = 60;

    /// Estimated minutes per set when an exercise has no recorded duration
    pub const FALLBACK_MINUTES_PER_SET: f64 = 2.0;
}

/// Location sampling constants
pub mod sampling {
    /// Maximum age of a cached GPS fix before it is considered stale
    /// and dropped instead of appended to the track
    pub const MAX_FIX_AGE_SECONDS: u64 = 1;
}
