//! Great-circle geometry and unit conversions.
//!
//! All distances are computed on a sphere in the grid's native lat/lng
//! degrees, never in grid-index space.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per nautical mile (and km/h per knot).
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Metres per second in one knot.
pub const MPS_PER_KNOT: f64 = 1852.0 / 3600.0;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * KM_PER_NAUTICAL_MILE
}

pub fn knots_to_mps(knots: f64) -> f64 {
    knots * MPS_PER_KNOT
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

/// Haversine distance between two points in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing (forward azimuth) from `a` to `b`, normalised to `[0, 360)`.
pub fn bearing_deg(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    normalize_deg(y.atan2(x).to_degrees())
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Progress along compass `heading_deg` when a velocity of `speed` on that
/// heading is combined with a drift of `drift_speed` towards `drift_deg`.
///
/// The result is signed: a drift stronger than `speed` and opposing it gives
/// a negative value. Cross drift contributes nothing. Units are whatever the
/// caller passes in, as long as both speeds agree.
pub fn speed_along_heading(speed: f64, heading_deg: f64, drift_speed: f64, drift_deg: f64) -> f64 {
    let heading = heading_deg.to_radians();
    let drift = drift_deg.to_radians();
    // east / north components
    let vx = speed * heading.sin() + drift_speed * drift.sin();
    let vy = speed * heading.cos() + drift_speed * drift.cos();
    vx * heading.sin() + vy * heading.cos()
}
