//! Searoute library entry points.
//!
//! This crate plans fuel-minimising sea routes over a land/water raster. It
//! exposes the grid, the environmental-field interface and its in-memory
//! snapshot, the fuel cost model, the A* search with its land-to-water
//! bridge, and the multi-strategy planner. Higher-level consumers (the CLI)
//! should only depend on the items exported here instead of reimplementing
//! behavior.

pub mod cost;
pub mod environment;
pub mod error;
pub mod geo;
pub mod grid;
pub mod output;
pub mod path;
pub mod routing;
pub mod vessel;
pub mod zones;

#[cfg(test)]
mod test_helpers;

pub use cost::{base_fuel_per_km, FuelCostModel, PenaltyBreakdown, SegmentCost, StrategyWeights};
pub use environment::{
    voyage_week_start, BoundingBox, CalmSea, EnvironmentRequest, EnvironmentSnapshot,
    EnvironmentalField, EnvironmentalSample,
};
pub use error::{Error, Result};
pub use geo::{bearing_deg, haversine_km, LatLng};
pub use grid::{CellKind, GridBounds, GridCell, GridRaster, SpatialGrid};
pub use output::{StrategySummary, VoyageRenderMode, VoyageSummary};
pub use path::{shore_bridge, Heuristic, RouteSearch, SearchOptions, SearchOutcome, SearchResult, ShoreBridge};
pub use routing::{
    compute_routes, plan_voyage, Endpoint, PlannerOptions, RouteFailure, RoutePoint, RouteRequest,
    Strategy, StrategyOutcome, VoyagePlan,
};
pub use vessel::{VesselCatalog, VesselParams};
pub use zones::{load_zones, NoGoZone};
