// Test-only helpers for `searoute-lib` unit tests
#![allow(dead_code)]

use crate::environment::{EnvironmentalField, EnvironmentalSample};
use crate::grid::{GridBounds, SpatialGrid};
use crate::vessel::VesselParams;

/// A mid-size bulk carrier with unit correction factors.
pub fn sample_vessel() -> VesselParams {
    VesselParams {
        speed: 14.0,
        draft: 10.0,
        beam: 32.0,
        ship_length: 200.0,
        hp_req: 20_000.0,
        fuel_rate: 0.2,
        base_weight: 20_000.0,
        load: 30_000.0,
        hull_factor: 1.0,
        fouling_factor: 1.0,
        sea_state_factor: 1.0,
    }
}

/// Grid from ASCII rows (north first, `#` = land) anchored at 0°N 0°E with 1° cells.
pub fn ascii_grid(rows: &[&str]) -> SpatialGrid {
    SpatialGrid::from_ascii(
        rows,
        GridBounds {
            west: 0.0,
            south: 0.0,
        },
        1.0,
    )
    .expect("valid test grid")
}

/// All-water grid of the given size.
pub fn open_grid(cols: usize, rows: usize) -> SpatialGrid {
    let row = ".".repeat(cols);
    let rows: Vec<&str> = (0..rows).map(|_| row.as_str()).collect();
    ascii_grid(&rows)
}

/// Calm deep water except for per-point overrides matched by rounding to whole degrees.
#[derive(Debug, Default)]
pub struct PatchedSea {
    patches: Vec<((i64, i64), EnvironmentalSample)>,
}

impl PatchedSea {
    pub fn with(mut self, lat: f64, lng: f64, sample: EnvironmentalSample) -> Self {
        self.patches.push(((lat.floor() as i64, lng.floor() as i64), sample));
        self
    }
}

impl EnvironmentalField for PatchedSea {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        let key = (lat.floor() as i64, lng.floor() as i64);
        self.patches
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| *s)
            .unwrap_or_else(|| EnvironmentalSample::calm(1000.0))
    }
}
