//! Common test utilities and fixture helpers.
//!
//! Synthetic grids are drawn as ASCII rows (north first, `#` = land) anchored
//! at 0°N 0°E with one-degree cells, so cell `(x, y)` has its centre at
//! latitude `y + 0.5` and longitude `x + 0.5`.

#![allow(dead_code)]

use std::path::PathBuf;

use searoute_lib::{
    EnvironmentalField, EnvironmentalSample, FuelCostModel, GridBounds, GridCell, LatLng,
    SpatialGrid, VesselParams,
};

/// Path to the shared fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

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

pub fn grid(rows: &[&str]) -> SpatialGrid {
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

/// Centre of cell `(x, y)` on a grid built by [`grid`].
pub fn centre(x: i32, y: i32) -> LatLng {
    LatLng::new(f64::from(y) + 0.5, f64::from(x) + 0.5)
}

/// Deep calm water with per-cell overrides.
#[derive(Debug, Default, Clone)]
pub struct PatchField {
    patches: Vec<(GridCell, EnvironmentalSample)>,
}

impl PatchField {
    pub fn with(mut self, x: i32, y: i32, sample: EnvironmentalSample) -> Self {
        self.patches.push((GridCell::new(x, y), sample));
        self
    }
}

impl EnvironmentalField for PatchField {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        let cell = GridCell::new(lng.floor() as i32, lat.floor() as i32);
        self.patches
            .iter()
            .find(|(c, _)| *c == cell)
            .map(|(_, s)| *s)
            .unwrap_or_else(|| EnvironmentalSample::calm(1000.0))
    }
}

/// Strong headwinds, heavy seas and rain; every weather term is positive.
pub fn storm() -> EnvironmentalSample {
    EnvironmentalSample {
        wind_speed_mps: Some(18.0),
        wind_direction_deg: Some(90.0),
        waves_height_m: Some(5.0),
        weekly_precip_mean: Some(150.0),
        ..EnvironmentalSample::calm(1000.0)
    }
}

/// Exhaustive O(V²) Dijkstra over water cells with the same edge rule as the
/// search. Returns the cost to every cell, `f64::INFINITY` where unreachable.
pub fn reference_costs(
    grid: &SpatialGrid,
    field: &dyn EnvironmentalField,
    model: &FuelCostModel,
    start: GridCell,
) -> Vec<Vec<f64>> {
    let (cols, rows) = (grid.cols(), grid.rows());
    let mut cost = vec![vec![f64::INFINITY; cols]; rows];
    let mut done = vec![vec![false; cols]; rows];
    cost[start.y as usize][start.x as usize] = 0.0;

    loop {
        let mut best: Option<(GridCell, f64)> = None;
        for y in 0..rows {
            for x in 0..cols {
                let c = cost[y][x];
                if !done[y][x] && c.is_finite() && best.map_or(true, |(_, b)| c < b) {
                    best = Some((GridCell::new(x as i32, y as i32), c));
                }
            }
        }
        let Some((cell, g)) = best else {
            return cost;
        };
        done[cell.y as usize][cell.x as usize] = true;

        let from = grid.grid_to_lat_lng(cell);
        for next in grid.neighbours(cell) {
            if grid.is_land(next) {
                continue;
            }
            let to = grid.grid_to_lat_lng(next);
            let step = model.segment_cost(from, to, &field.sample(to.lat, to.lng));
            let slot = &mut cost[next.y as usize][next.x as usize];
            if g + step.fuel < *slot {
                *slot = g + step.fuel;
            }
        }
    }
}
