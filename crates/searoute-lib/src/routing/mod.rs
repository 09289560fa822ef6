//! Multi-strategy voyage planning.
//!
//! This module provides:
//! - [`Strategy`] - the three routing strategies (balanced, fastest, safest)
//! - [`RouteRequest`] - start/end, vessel, voyage date and no-go zones
//! - [`StrategyOutcome`] - route points or a [`RouteFailure`] per strategy
//! - [`plan_voyage`] - main entry point running every requested strategy
//!
//! # Strategy Pattern
//!
//! Each strategy is a [`RoutePlanner`] that only picks its cost weights and
//! heuristic. The planners share read-only inputs (grid, field, request), so
//! [`plan_voyage`] runs them on the rayon pool when
//! [`PlannerOptions::parallel`] is set.
//!
//! # Example
//!
//! ```ignore
//! use searoute_lib::{plan_voyage, CalmSea, LatLng, PlannerOptions, RouteRequest, SpatialGrid};
//!
//! let grid = SpatialGrid::from_path("world.json".as_ref())?;
//! let request = RouteRequest::new(LatLng::new(1.2, 103.8), LatLng::new(22.3, 114.2), vessel);
//! let plan = plan_voyage(&grid, &CalmSea::default(), &request, &PlannerOptions::default());
//! ```

pub mod assembler;
mod planner;

pub use assembler::{stitch, RouteAssembler, RoutePoint};
pub use planner::{
    select_planner, BalancedPlanner, FastestPlanner, RoutePlanner, SafestPlanner,
};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::environment::{EnvironmentRequest, EnvironmentalField};
use crate::geo::LatLng;
use crate::grid::SpatialGrid;
use crate::path::SearchOptions;
use crate::vessel::VesselParams;
use crate::zones::NoGoZone;

/// Supported routing strategies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Balanced,
    Fastest,
    Safest,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Balanced, Strategy::Fastest, Strategy::Safest];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Fastest => "fastest",
            Strategy::Safest => "safest",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Strategy::Balanced),
            "fastest" => Ok(Strategy::Fastest),
            "safest" => Ok(Strategy::Safest),
            other => Err(format!(
                "unknown strategy '{other}' (expected balanced, fastest or safest)"
            )),
        }
    }
}

/// Which end of the route a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Why a strategy produced no route. These are expected outcomes, not errors
/// of the whole request.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteFailure {
    #[error("invalid vessel parameters: {message}")]
    InvalidVessel { message: String },

    #[error("{endpoint} point ({lat}, {lng}) lies outside the grid")]
    OutOfBounds { endpoint: Endpoint, lat: f64, lng: f64 },

    #[error("{endpoint} point is landlocked: no water reachable from it")]
    Landlocked { endpoint: Endpoint },

    #[error("no water path between the endpoints ({expanded} cells expanded)")]
    Unreachable { expanded: usize },

    #[error("search stopped after expanding {expanded} cells")]
    ExpansionLimit { expanded: usize },
}

/// A voyage to plan.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: LatLng,
    pub end: LatLng,
    pub vessel: VesselParams,
    /// Departure date; selects the weekly environmental data slice.
    pub voyage_date: Option<NaiveDate>,
    pub no_go_zones: Vec<NoGoZone>,
}

impl RouteRequest {
    pub fn new(start: LatLng, end: LatLng, vessel: VesselParams) -> Self {
        Self {
            start,
            end,
            vessel,
            voyage_date: None,
            no_go_zones: Vec::new(),
        }
    }

    pub fn with_voyage_date(mut self, date: NaiveDate) -> Self {
        self.voyage_date = Some(date);
        self
    }

    pub fn with_no_go_zones(mut self, zones: Vec<NoGoZone>) -> Self {
        self.no_go_zones = zones;
        self
    }

    /// Prefetch request covering this voyage, if a voyage date is set.
    pub fn environment_request(&self, padding_deg: f64) -> Option<EnvironmentRequest> {
        self.voyage_date
            .map(|date| EnvironmentRequest::for_voyage(self.start, self.end, date, padding_deg))
    }
}

/// Options controlling a multi-strategy plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOptions {
    pub strategies: Vec<Strategy>,
    /// Run strategies concurrently on the rayon pool.
    pub parallel: bool,
    pub search: SearchOptions,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            strategies: Strategy::ALL.to_vec(),
            parallel: true,
            search: SearchOptions::default(),
        }
    }
}

/// Result of one strategy. `points` is empty exactly when `failure` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub points: Vec<RoutePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<RouteFailure>,
    /// Cells expanded by the search.
    pub expanded: usize,
}

impl StrategyOutcome {
    pub fn failed(strategy: Strategy, failure: RouteFailure) -> Self {
        let expanded = match failure {
            RouteFailure::Unreachable { expanded } | RouteFailure::ExpansionLimit { expanded } => {
                expanded
            }
            _ => 0,
        };
        Self {
            strategy,
            points: Vec::new(),
            failure: Some(failure),
            expanded,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn total_fuel(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.total_fuel)
    }

    pub fn total_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.total_time)
    }

    pub fn total_distance(&self) -> f64 {
        self.points.iter().map(|p| p.segment_distance).sum()
    }
}

/// Outcomes for every requested strategy, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoyagePlan {
    pub outcomes: Vec<StrategyOutcome>,
}

impl VoyagePlan {
    pub fn get(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }

    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}

/// Plan `request` with every strategy in `options`.
///
/// Strategy failures are carried in the outcomes; this never fails as a whole.
pub fn plan_voyage<F: EnvironmentalField>(
    grid: &SpatialGrid,
    field: &F,
    request: &RouteRequest,
    options: &PlannerOptions,
) -> VoyagePlan {
    let run = |strategy: &Strategy| {
        select_planner(*strategy).plan(grid, field, request, &options.search)
    };

    let outcomes: Vec<StrategyOutcome> = if options.parallel {
        options.strategies.par_iter().map(run).collect()
    } else {
        options.strategies.iter().map(run).collect()
    };

    let plan = VoyagePlan { outcomes };
    info!(
        strategies = plan.outcomes.len(),
        succeeded = plan.successes(),
        start = ?request.start,
        end = ?request.end,
        "voyage planned"
    );
    plan
}

/// Route points per strategy; an empty list means no route was found.
pub fn compute_routes<F: EnvironmentalField>(
    grid: &SpatialGrid,
    field: &F,
    request: &RouteRequest,
) -> BTreeMap<Strategy, Vec<RoutePoint>> {
    plan_voyage(grid, field, request, &PlannerOptions::default())
        .outcomes
        .into_iter()
        .map(|outcome| (outcome.strategy, outcome.points))
        .collect()
}
