// ABOUTME: Great-circle distance computation for GPS coordinates
// ABOUTME: Haversine formula with mean Earth radius, pure and side-effect free
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Great-circle distance math.
//!
//! The Haversine approximation ignores altitude and ellipsoid flattening,
//! which is accurate to well under 0.5% for workout-scale tracks. NaN
//! inputs propagate; they are not trapped here.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::models::Coordinate;

/// Compute the great-circle distance between two coordinates in meters.
///
/// Inputs are latitude/longitude in degrees. The result is never
/// negative and is exactly zero for identical coordinates.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}
