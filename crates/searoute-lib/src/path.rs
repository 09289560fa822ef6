use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::cost::constants::LAND_TRANSIT_MULTIPLIER;
use crate::cost::FuelCostModel;
use crate::environment::{EnvironmentalField, EnvironmentalSample};
use crate::geo::haversine_km;
use crate::grid::{GridCell, SpatialGrid};

/// Remaining-cost estimate used to order the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Cheapest possible fuel per km times great-circle distance.
    #[default]
    FuelLowerBound,
    /// Great-circle distance in km, capped by the fuel lower bound.
    Distance,
    /// No estimate; the search degenerates to Dijkstra.
    Zero,
}

/// Tunables for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop after expanding this many cells.
    pub max_expansions: Option<usize>,
}

/// Minimum-cost path between two cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Cells from start to goal inclusive.
    pub cells: Vec<GridCell>,
    /// Total edge cost in litres, including search-only surcharges.
    pub cost: f64,
    pub expanded: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The open set emptied before reaching the goal.
    NoPath { expanded: usize },
    /// [`SearchOptions::max_expansions`] was hit.
    ExpansionLimit { expanded: usize },
}

impl SearchOutcome {
    pub fn found(self) -> Option<SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    cell: GridCell,
    g: f64,
    parent: Option<usize>,
}

/// A* over water cells of a [`SpatialGrid`].
///
/// Each instance owns its open set, g-scores, node arena and sample cache,
/// so a fresh search is created per strategy and nothing is shared between
/// concurrent runs beyond the read-only grid, field and cost model.
pub struct RouteSearch<'a, F: EnvironmentalField + ?Sized> {
    grid: &'a SpatialGrid,
    field: &'a F,
    model: &'a FuelCostModel,
    heuristic: Heuristic,
    options: SearchOptions,
    samples: HashMap<usize, EnvironmentalSample>,
}

impl<'a, F: EnvironmentalField + ?Sized> RouteSearch<'a, F> {
    pub fn new(grid: &'a SpatialGrid, field: &'a F, model: &'a FuelCostModel) -> Self {
        Self {
            grid,
            field,
            model,
            heuristic: Heuristic::default(),
            options: SearchOptions::default(),
            samples: HashMap::new(),
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Land cells are walls except when they are exactly `goal`; stepping
    /// onto a land goal costs [`LAND_TRANSIT_MULTIPLIER`] times the normal
    /// segment cost. Out-of-bounds endpoints yield [`SearchOutcome::NoPath`].
    pub fn run(mut self, start: GridCell, goal: GridCell) -> SearchOutcome {
        let (Some(start_idx), Some(_)) = (self.grid.index(start), self.grid.index(goal)) else {
            return SearchOutcome::NoPath { expanded: 0 };
        };

        if start == goal {
            return SearchOutcome::Found(SearchResult {
                cells: vec![start],
                cost: 0.0,
                expanded: 0,
            });
        }

        let per_km = self.model.lower_bound_cost_per_km();
        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut g_score: HashMap<usize, f64> = HashMap::new();
        let mut closed: HashSet<usize> = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        nodes.push(SearchNode {
            cell: start,
            g: 0.0,
            parent: None,
        });
        g_score.insert(start_idx, 0.0);
        open.push(OpenEntry::new(0, self.estimate(start, goal, per_km), seq));

        while let Some(entry) = open.pop() {
            let node = nodes[entry.node];
            let Some(idx) = self.grid.index(node.cell) else {
                continue;
            };
            if closed.contains(&idx) {
                continue;
            }
            if g_score.get(&idx).is_some_and(|best| node.g > *best) {
                continue;
            }

            if node.cell == goal {
                let cells = reconstruct_path(&nodes, entry.node);
                debug!(expanded, cost = node.g, steps = cells.len(), "search reached goal");
                return SearchOutcome::Found(SearchResult {
                    cells,
                    cost: node.g,
                    expanded,
                });
            }

            if let Some(limit) = self.options.max_expansions {
                if expanded >= limit {
                    debug!(expanded, limit, "search hit expansion limit");
                    return SearchOutcome::ExpansionLimit { expanded };
                }
            }
            closed.insert(idx);
            expanded += 1;

            let from = self.grid.grid_to_lat_lng(node.cell);
            for next in self.grid.neighbours(node.cell) {
                let onto_land = self.grid.is_land(next);
                if onto_land && next != goal {
                    continue;
                }
                let Some(next_idx) = self.grid.index(next) else {
                    continue;
                };
                if closed.contains(&next_idx) {
                    continue;
                }

                let to = self.grid.grid_to_lat_lng(next);
                let sample = self.sample(next_idx, next);
                let mut step = self.model.segment_cost(from, to, &sample);
                if onto_land {
                    step = step.scaled(LAND_TRANSIT_MULTIPLIER);
                }
                if !step.fuel.is_finite() {
                    continue;
                }

                let tentative = node.g + step.fuel;
                if tentative < *g_score.get(&next_idx).unwrap_or(&f64::INFINITY) {
                    g_score.insert(next_idx, tentative);
                    nodes.push(SearchNode {
                        cell: next,
                        g: tentative,
                        parent: Some(entry.node),
                    });
                    seq += 1;
                    let f = tentative + self.estimate(next, goal, per_km);
                    open.push(OpenEntry::new(nodes.len() - 1, f, seq));
                }
            }
        }

        debug!(expanded, "search exhausted open set");
        SearchOutcome::NoPath { expanded }
    }

    fn sample(&mut self, idx: usize, cell: GridCell) -> EnvironmentalSample {
        let grid = self.grid;
        let field = self.field;
        *self.samples.entry(idx).or_insert_with(|| {
            let point = grid.grid_to_lat_lng(cell);
            field.sample(point.lat, point.lng)
        })
    }

    fn estimate(&self, from: GridCell, goal: GridCell, per_km: f64) -> f64 {
        let distance_km = haversine_km(self.grid.grid_to_lat_lng(from), self.grid.grid_to_lat_lng(goal));
        match self.heuristic {
            Heuristic::FuelLowerBound => per_km * distance_km,
            Heuristic::Distance => distance_km.min(per_km * distance_km),
            Heuristic::Zero => 0.0,
        }
    }
}

fn reconstruct_path(nodes: &[SearchNode], goal: usize) -> Vec<GridCell> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(id) = current {
        let node = &nodes[id];
        path.push(node.cell);
        current = node.parent;
    }
    path.reverse();
    path
}

/// Path from an off-water cell to the nearest water cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoreBridge {
    /// Cells from the starting cell to `water` inclusive.
    pub path: Vec<GridCell>,
    pub water: GridCell,
}

/// Breadth-first search from `start` to the nearest water cell by hop count.
///
/// A water `start` yields a single-cell bridge. Returns `None` when no
/// water is reachable or `start` lies outside the grid.
pub fn shore_bridge(grid: &SpatialGrid, start: GridCell) -> Option<ShoreBridge> {
    let start_idx = grid.index(start)?;
    if grid.is_water(start) {
        return Some(ShoreBridge {
            path: vec![start],
            water: start,
        });
    }

    let mut parents: HashMap<usize, Option<GridCell>> = HashMap::new();
    let mut queue = VecDeque::new();
    parents.insert(start_idx, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if grid.is_water(current) {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(Some(parent)) = grid.index(cursor).and_then(|idx| parents.get(&idx)) {
                path.push(*parent);
                cursor = *parent;
            }
            path.reverse();
            debug!(hops = path.len() - 1, ?current, "bridged to water");
            return Some(ShoreBridge {
                path,
                water: current,
            });
        }

        for next in grid.neighbours(current) {
            let Some(next_idx) = grid.index(next) else {
                continue;
            };
            if parents.contains_key(&next_idx) {
                continue;
            }
            parents.insert(next_idx, Some(current));
            queue.push_back(next);
        }
    }

    debug!(?start, "no water reachable");
    None
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    node: usize,
    estimate: FloatOrd,
    seq: u64,
}

impl OpenEntry {
    fn new(node: usize, estimate: f64, seq: u64) -> Self {
        Self {
            node,
            estimate: FloatOrd(estimate),
            seq,
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest f first; earlier pushes win ties.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
