//! Route command handler: loads inputs, plans every strategy under a timeout
//! and prints the summary.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use searoute_lib::{
    load_zones, plan_voyage, CalmSea, EnvironmentSnapshot, EnvironmentalField, LatLng,
    PlannerOptions, RouteRequest, SearchOptions, SpatialGrid, Strategy, VesselParams,
    VoyagePlan, VoyageSummary,
};

use searoute_cli::output::{write_voyage, OutputFormat};

use super::vessels::load_vessel_catalog;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub grid: PathBuf,
    pub start: LatLng,
    pub end: LatLng,
    /// Preset name looked up in `vessel_catalog`.
    pub vessel: Option<String>,
    pub vessel_catalog: Option<PathBuf>,
    /// JSON vessel parameters; takes the place of a preset.
    pub vessel_file: Option<PathBuf>,
    pub environment: Option<PathBuf>,
    pub no_go: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    /// Empty means every strategy.
    pub strategies: Vec<Strategy>,
    pub format: OutputFormat,
    pub timeout: Duration,
    pub max_expansions: Option<usize>,
    pub sequential: bool,
}

impl RouteCommandArgs {
    pub fn planner_options(&self) -> PlannerOptions {
        let requested: &[Strategy] = if self.strategies.is_empty() {
            &Strategy::ALL
        } else {
            &self.strategies
        };
        let mut strategies = Vec::with_capacity(requested.len());
        for strategy in requested {
            if !strategies.contains(strategy) {
                strategies.push(*strategy);
            }
        }
        PlannerOptions {
            strategies,
            parallel: !self.sequential,
            search: SearchOptions {
                max_expansions: self.max_expansions,
            },
        }
    }
}

/// Handle the route subcommand.
///
/// Fails when inputs cannot be loaded, when planning exceeds the timeout, or
/// when no strategy found a route (the summary is still printed first).
pub async fn handle_route_command(args: RouteCommandArgs) -> Result<()> {
    let grid = SpatialGrid::from_path(&args.grid)
        .with_context(|| format!("failed to load grid from {}", args.grid.display()))?;
    let vessel = resolve_vessel(&args)?;
    let field = load_field(args.environment.as_ref())?;

    let mut request = RouteRequest::new(args.start, args.end, vessel);
    if let Some(date) = args.date {
        request = request.with_voyage_date(date);
    }
    if let Some(path) = &args.no_go {
        let zones = load_zones(path)
            .with_context(|| format!("failed to load no-go zones from {}", path.display()))?;
        debug!(zones = zones.len(), "loaded no-go zones");
        request = request.with_no_go_zones(zones);
    }

    let options = args.planner_options();
    let request = Arc::new(request);
    let plan = run_with_timeout(Arc::new(grid), field, Arc::clone(&request), options, args.timeout).await?;

    let summary = VoyageSummary::from_plan(&request, &plan);
    write_voyage(&mut io::stdout().lock(), &summary, args.format)
        .context("failed to write route output")?;

    if plan.successes() == 0 {
        bail!("no route found for any requested strategy");
    }
    Ok(())
}

async fn run_with_timeout(
    grid: Arc<SpatialGrid>,
    field: Box<dyn EnvironmentalField>,
    request: Arc<RouteRequest>,
    options: PlannerOptions,
    timeout: Duration,
) -> Result<VoyagePlan> {
    let worker = tokio::task::spawn_blocking(move || {
        let field: &dyn EnvironmentalField = field.as_ref();
        plan_voyage(&grid, &field, &request, &options)
    });

    let plan = tokio::time::timeout(timeout, worker)
        .await
        .map_err(|_| anyhow!("route planning timed out after {}s", timeout.as_secs()))?
        .context("route planning worker failed")?;
    info!(succeeded = plan.successes(), "route planning finished");
    Ok(plan)
}

fn resolve_vessel(args: &RouteCommandArgs) -> Result<VesselParams> {
    if let Some(path) = &args.vessel_file {
        return VesselParams::from_path(path)
            .with_context(|| format!("failed to load vessel parameters from {}", path.display()));
    }

    let Some(name) = &args.vessel else {
        bail!("either --vessel or --vessel-file is required");
    };
    let catalog_path = args
        .vessel_catalog
        .as_ref()
        .ok_or_else(|| anyhow!("--vessel requires --vessel-catalog or SEAROUTE_VESSEL_CATALOG"))?;
    let catalog = load_vessel_catalog(catalog_path)?;
    Ok(catalog.lookup(name)?.clone())
}

fn load_field(path: Option<&PathBuf>) -> Result<Box<dyn EnvironmentalField>> {
    match path {
        Some(path) => {
            let snapshot = EnvironmentSnapshot::from_path(path).with_context(|| {
                format!("failed to load environmental snapshot from {}", path.display())
            })?;
            debug!(layers = ?snapshot.layer_names(), "loaded environmental snapshot");
            Ok(Box::new(snapshot))
        }
        None => {
            info!("no environmental snapshot given, assuming calm deep water");
            Ok(Box::new(CalmSea::default()))
        }
    }
}
