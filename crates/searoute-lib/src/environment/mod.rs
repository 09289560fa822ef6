//! Environmental conditions consumed by the cost model.
//!
//! The search only talks to an [`EnvironmentalField`]; where the samples come
//! from (a prefetched [`EnvironmentSnapshot`], a uniform [`CalmSea`], or
//! anything else) is the caller's concern.
//!
//! - [`snapshot`] - bounding-box raster decoded from the data service payload
//! - [`request`] - prefetch request for the data service

pub mod request;
pub mod snapshot;

pub use request::{voyage_week_start, BoundingBox, EnvironmentRequest};
pub use snapshot::{EnvironmentSnapshot, NO_DATA};

use serde::{Deserialize, Serialize};

/// Per-point physical snapshot. `None` means "no data here".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentalSample {
    /// Sea depth in metres.
    pub depth: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    /// Compass bearing the wind blows from.
    pub wind_direction_deg: Option<f64>,
    pub current_speed_mps: Option<f64>,
    /// Compass bearing the current flows towards.
    pub current_direction_deg: Option<f64>,
    pub waves_height_m: Option<f64>,
    /// Mean precipitation in mm/week.
    pub weekly_precip_mean: Option<f64>,
    /// Ice concentration as a fraction in `[0, 1]`.
    pub ice_conc: Option<f64>,
}

impl EnvironmentalSample {
    /// Calm, ice-free water of the given depth.
    pub fn calm(depth_m: f64) -> Self {
        Self {
            depth: Some(depth_m),
            wind_speed_mps: Some(0.0),
            wind_direction_deg: Some(0.0),
            current_speed_mps: Some(0.0),
            current_direction_deg: Some(0.0),
            waves_height_m: Some(0.0),
            weekly_precip_mean: Some(0.0),
            ice_conc: Some(0.0),
        }
    }
}

/// Source of environmental samples keyed by position.
///
/// Implementations must be cheap to query: the search calls this for every
/// newly discovered cell.
pub trait EnvironmentalField: Send + Sync {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample;
}

/// Uniform calm conditions everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalmSea {
    pub depth_m: f64,
}

impl Default for CalmSea {
    fn default() -> Self {
        Self { depth_m: 1000.0 }
    }
}

impl EnvironmentalField for CalmSea {
    fn sample(&self, _lat: f64, _lng: f64) -> EnvironmentalSample {
        EnvironmentalSample::calm(self.depth_m)
    }
}

impl<F: EnvironmentalField + ?Sized> EnvironmentalField for &F {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        (**self).sample(lat, lng)
    }
}

impl<F: EnvironmentalField + ?Sized> EnvironmentalField for std::sync::Arc<F> {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        (**self).sample(lat, lng)
    }
}

impl<F: EnvironmentalField + ?Sized> EnvironmentalField for Box<F> {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        (**self).sample(lat, lng)
    }
}
