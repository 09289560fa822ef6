use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::geo::LatLng;
use crate::routing::{RouteFailure, RoutePoint, RouteRequest, Strategy, StrategyOutcome, VoyagePlan};

/// Presentation style for turning a [`VoyageSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoyageRenderMode {
    /// One line per strategy.
    Summary,
    /// Strategy lines followed by a per-point table for each route.
    Detailed,
}

/// Totals and points for one strategy.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<RouteFailure>,
    pub total_fuel_l: f64,
    pub total_time_h: f64,
    pub total_distance_km: f64,
    pub point_count: usize,
    pub expanded: usize,
    pub points: Vec<RoutePoint>,
}

impl From<&StrategyOutcome> for StrategySummary {
    fn from(outcome: &StrategyOutcome) -> Self {
        Self {
            strategy: outcome.strategy,
            found: outcome.is_success(),
            failure: outcome.failure.clone(),
            total_fuel_l: outcome.total_fuel(),
            total_time_h: outcome.total_time(),
            total_distance_km: outcome.total_distance(),
            point_count: outcome.points.len(),
            expanded: outcome.expanded,
            points: outcome.points.clone(),
        }
    }
}

/// Structured representation of a planned voyage that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VoyageSummary {
    pub start: LatLng,
    pub end: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voyage_date: Option<NaiveDate>,
    pub no_go_zones: usize,
    pub strategies: Vec<StrategySummary>,
}

impl VoyageSummary {
    pub fn from_plan(request: &RouteRequest, plan: &VoyagePlan) -> Self {
        Self {
            start: request.start,
            end: request.end,
            voyage_date: request.voyage_date,
            no_go_zones: request.no_go_zones.len(),
            strategies: plan.outcomes.iter().map(StrategySummary::from).collect(),
        }
    }

    pub fn get(&self, strategy: Strategy) -> Option<&StrategySummary> {
        self.strategies.iter().find(|s| s.strategy == strategy)
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: VoyageRenderMode) -> String {
        let mut buffer = String::new();
        let _ = write!(
            buffer,
            "Voyage: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            self.start.lat, self.start.lng, self.end.lat, self.end.lng
        );
        if let Some(date) = self.voyage_date {
            let _ = write!(buffer, " on {date}");
        }
        if self.no_go_zones > 0 {
            let _ = write!(buffer, ", avoiding {} zone(s)", self.no_go_zones);
        }
        let _ = writeln!(buffer);

        for summary in &self.strategies {
            render_strategy_line(&mut buffer, summary);
        }

        if mode == VoyageRenderMode::Detailed {
            for summary in self.strategies.iter().filter(|s| s.found) {
                let _ = writeln!(buffer);
                render_points(&mut buffer, summary);
            }
        }

        buffer
    }
}

fn render_strategy_line(buffer: &mut String, summary: &StrategySummary) {
    match &summary.failure {
        Some(failure) => {
            let _ = writeln!(
                buffer,
                "  {:<9} no route for strategy {}: {failure}",
                summary.strategy, summary.strategy
            );
        }
        None => {
            let _ = writeln!(
                buffer,
                "  {:<9} {:>12.1} L  {:>8.1} h  {:>9.1} km  {:>4} points",
                summary.strategy,
                summary.total_fuel_l,
                summary.total_time_h,
                summary.total_distance_km,
                summary.point_count
            );
        }
    }
}

fn render_points(buffer: &mut String, summary: &StrategySummary) {
    let _ = writeln!(buffer, "{}:", summary.strategy);
    let _ = writeln!(
        buffer,
        "  {:>4}  {:>9}  {:>10}  {:>8}  {:>8}  {:>11}  {:>8}",
        "#", "lat", "lng", "km", "km/h", "fuel L", "hours"
    );
    for (index, point) in summary.points.iter().enumerate() {
        let land = if point.on_land { " (land)" } else { "" };
        let _ = writeln!(
            buffer,
            "  {:>4}  {:>9.4}  {:>10.4}  {:>8.1}  {:>8.1}  {:>11.1}  {:>8.2}{land}",
            index,
            point.lat,
            point.lng,
            point.segment_distance,
            point.segment_speed,
            point.total_fuel,
            point.total_time
        );
    }
}
