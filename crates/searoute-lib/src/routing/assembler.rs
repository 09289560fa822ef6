//! Stitch bridge and search paths into reported route points.

use serde::Serialize;

use crate::cost::{FuelCostModel, SegmentCost};
use crate::environment::{EnvironmentalField, EnvironmentalSample};
use crate::geo::{haversine_km, LatLng};
use crate::grid::{GridCell, SpatialGrid};

/// One reported position along a route with cumulative and per-segment metrics.
///
/// Segment fields describe the leg arriving at this point; they are zero
/// for the first point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub on_land: bool,
    /// Cumulative fuel in litres.
    pub total_fuel: f64,
    /// Cumulative time in hours.
    pub total_time: f64,
    /// km/h
    pub segment_speed: f64,
    /// km
    pub segment_distance: f64,
    /// hours
    pub segment_time: f64,
    /// litres
    pub segment_fuel: f64,
    pub env: EnvironmentalSample,
}

impl RoutePoint {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Join the start bridge, the searched path and the end bridge (given
/// land-to-water, so it is reversed here) into one cell sequence.
///
/// The cell shared at each junction appears once.
pub fn stitch(start_bridge: &[GridCell], searched: &[GridCell], end_bridge: &[GridCell]) -> Vec<GridCell> {
    let mut cells: Vec<GridCell> =
        Vec::with_capacity(start_bridge.len() + searched.len() + end_bridge.len());
    for cell in start_bridge
        .iter()
        .chain(searched)
        .chain(end_bridge.iter().rev())
    {
        if cells.last() != Some(cell) {
            cells.push(*cell);
        }
    }
    cells
}

/// Prices an assembled path with the same cost model used by the search.
pub struct RouteAssembler<'a, F: EnvironmentalField + ?Sized> {
    grid: &'a SpatialGrid,
    field: &'a F,
    model: &'a FuelCostModel,
}

impl<'a, F: EnvironmentalField + ?Sized> RouteAssembler<'a, F> {
    pub fn new(grid: &'a SpatialGrid, field: &'a F, model: &'a FuelCostModel) -> Self {
        Self { grid, field, model }
    }

    /// Turn `cells` into route points from `start` to `end`.
    ///
    /// Interior points sit at cell centres; the first and last use the
    /// exact requested coordinates. Segments touching land carry zero fuel,
    /// time and speed.
    pub fn assemble(&self, start: LatLng, end: LatLng, cells: &[GridCell]) -> Vec<RoutePoint> {
        let Some((&last_cell, _)) = cells.split_last() else {
            return Vec::new();
        };

        let mut stops: Vec<(LatLng, bool)> = cells
            .iter()
            .map(|cell| (self.grid.grid_to_lat_lng(*cell), self.grid.is_land(*cell)))
            .collect();
        stops[0].0 = start;
        if cells.len() == 1 {
            stops.push((end, self.grid.is_land(last_cell)));
        } else if let Some(stop) = stops.last_mut() {
            stop.0 = end;
        }

        let mut points: Vec<RoutePoint> = Vec::with_capacity(stops.len());
        let mut total_fuel = 0.0;
        let mut total_time = 0.0;

        for (i, (position, on_land)) in stops.iter().copied().enumerate() {
            let env = self.field.sample(position.lat, position.lng);
            let segment = match i.checked_sub(1).map(|prev| stops[prev]) {
                None => SegmentCost::zero(),
                Some((_, prev_on_land)) if prev_on_land || on_land => SegmentCost {
                    distance_km: haversine_km(stops[i - 1].0, position),
                    ..SegmentCost::zero()
                },
                Some((prev, _)) => self.model.segment_cost(prev, position, &env),
            };

            total_fuel += segment.fuel;
            total_time += segment.time_h;
            points.push(RoutePoint {
                lat: position.lat,
                lng: position.lng,
                on_land,
                total_fuel,
                total_time,
                segment_speed: segment.speed_kmh,
                segment_distance: segment.distance_km,
                segment_time: segment.time_h,
                segment_fuel: segment.fuel,
                env,
            });
        }

        points
    }
}
