//! Per-strategy route planners.
//!
//! Each strategy is a [`RoutePlanner`] that only chooses its cost weights
//! and heuristic; the shared [`RoutePlanner::plan`] pipeline validates the
//! request, bridges land endpoints, runs the search and assembles the
//! result.

use tracing::{debug, warn};

use crate::cost::{FuelCostModel, StrategyWeights};
use crate::environment::EnvironmentalField;
use crate::grid::{GridCell, SpatialGrid};
use crate::path::{shore_bridge, Heuristic, RouteSearch, SearchOptions, SearchOutcome, ShoreBridge};

use super::assembler::{stitch, RouteAssembler};
use super::{Endpoint, RouteFailure, RouteRequest, Strategy, StrategyOutcome};

/// Trait for routing strategies.
pub trait RoutePlanner: Send + Sync {
    fn strategy(&self) -> Strategy;

    fn weights(&self) -> StrategyWeights;

    fn heuristic(&self) -> Heuristic {
        Heuristic::FuelLowerBound
    }

    /// Plan one route. Never panics on a routing outcome: failures come back
    /// in [`StrategyOutcome::failure`].
    fn plan(
        &self,
        grid: &SpatialGrid,
        field: &dyn EnvironmentalField,
        request: &RouteRequest,
        options: &SearchOptions,
    ) -> StrategyOutcome {
        let strategy = self.strategy();
        match plan_with(self, grid, field, request, options) {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!(%strategy, %failure, "no route for strategy");
                StrategyOutcome::failed(strategy, failure)
            }
        }
    }
}

/// Minimises weighted fuel with weather barely considered.
#[derive(Debug, Clone, Default)]
pub struct FastestPlanner;

impl RoutePlanner for FastestPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Fastest
    }

    fn weights(&self) -> StrategyWeights {
        StrategyWeights::FASTEST
    }

    fn heuristic(&self) -> Heuristic {
        Heuristic::Distance
    }
}

#[derive(Debug, Clone, Default)]
pub struct BalancedPlanner;

impl RoutePlanner for BalancedPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Balanced
    }

    fn weights(&self) -> StrategyWeights {
        StrategyWeights::BALANCED
    }
}

/// Weather terms dominate; rough water is avoided at almost any distance.
#[derive(Debug, Clone, Default)]
pub struct SafestPlanner;

impl RoutePlanner for SafestPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Safest
    }

    fn weights(&self) -> StrategyWeights {
        StrategyWeights::SAFEST
    }
}

/// Planner for the given strategy.
pub fn select_planner(strategy: Strategy) -> Box<dyn RoutePlanner> {
    match strategy {
        Strategy::Fastest => Box::new(FastestPlanner),
        Strategy::Balanced => Box::new(BalancedPlanner),
        Strategy::Safest => Box::new(SafestPlanner),
    }
}

fn plan_with<P: RoutePlanner + ?Sized>(
    planner: &P,
    grid: &SpatialGrid,
    field: &dyn EnvironmentalField,
    request: &RouteRequest,
    options: &SearchOptions,
) -> Result<StrategyOutcome, RouteFailure> {
    request
        .vessel
        .validate()
        .map_err(|err| RouteFailure::InvalidVessel {
            message: err.to_string(),
        })?;

    let start_cell = locate(grid, request, Endpoint::Start)?;
    let end_cell = locate(grid, request, Endpoint::End)?;
    let start_bridge = bridge(grid, start_cell, Endpoint::Start)?;
    let end_bridge = bridge(grid, end_cell, Endpoint::End)?;

    let model = FuelCostModel::new(&request.vessel, planner.weights())
        .with_no_go_zones(request.no_go_zones.clone());

    let searched = match RouteSearch::new(grid, field, &model)
        .with_heuristic(planner.heuristic())
        .with_options(*options)
        .run(start_bridge.water, end_bridge.water)
    {
        SearchOutcome::Found(result) => result,
        SearchOutcome::NoPath { expanded } => return Err(RouteFailure::Unreachable { expanded }),
        SearchOutcome::ExpansionLimit { expanded } => {
            return Err(RouteFailure::ExpansionLimit { expanded })
        }
    };

    let cells = stitch(&start_bridge.path, &searched.cells, &end_bridge.path);
    let points =
        RouteAssembler::new(grid, field, &model).assemble(request.start, request.end, &cells);
    debug!(
        strategy = %planner.strategy(),
        expanded = searched.expanded,
        points = points.len(),
        "strategy planned"
    );

    Ok(StrategyOutcome {
        strategy: planner.strategy(),
        points,
        failure: None,
        expanded: searched.expanded,
    })
}

fn locate(grid: &SpatialGrid, request: &RouteRequest, endpoint: Endpoint) -> Result<GridCell, RouteFailure> {
    let point = match endpoint {
        Endpoint::Start => request.start,
        Endpoint::End => request.end,
    };
    let cell = grid.lat_lng_to_grid(point);
    if !point.is_finite() || !grid.contains(cell) {
        return Err(RouteFailure::OutOfBounds {
            endpoint,
            lat: point.lat,
            lng: point.lng,
        });
    }
    Ok(cell)
}

fn bridge(grid: &SpatialGrid, cell: GridCell, endpoint: Endpoint) -> Result<ShoreBridge, RouteFailure> {
    let bridge = shore_bridge(grid, cell).ok_or(RouteFailure::Landlocked { endpoint })?;
    if bridge.path.len() > 1 {
        debug!(%endpoint, hops = bridge.path.len() - 1, "endpoint on land, bridged to water");
    }
    Ok(bridge)
}
