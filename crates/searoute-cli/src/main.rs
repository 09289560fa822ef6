mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use searoute_cli::logging::{init_logging, LoggingConfig};
use searoute_cli::output::OutputFormat;
use searoute_lib::environment::request::DEFAULT_PADDING_DEG;
use searoute_lib::{LatLng, Strategy};

use commands::env_request::handle_env_request;
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::vessels::handle_list_vessels;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fuel-aware maritime route planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a voyage with every routing strategy and print the result.
    Route(RouteArgs),
    /// List the vessel presets in a catalog CSV.
    Vessels {
        /// Vessel preset catalog (CSV).
        #[arg(long, env = "SEAROUTE_VESSEL_CATALOG")]
        vessel_catalog: PathBuf,
    },
    /// Print the bounding-box request body for the environmental data service.
    EnvRequest {
        #[command(flatten)]
        endpoints: EndpointArgs,
        /// Voyage date (YYYY-MM-DD); snapped back to the weekly slice.
        #[arg(long)]
        date: NaiveDate,
        /// Degrees added around the endpoints on every side.
        #[arg(long, default_value_t = DEFAULT_PADDING_DEG)]
        padding: f64,
    },
}

#[derive(Args, Debug)]
struct EndpointArgs {
    #[arg(long, allow_hyphen_values = true)]
    from_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    from_lng: f64,
    #[arg(long, allow_hyphen_values = true)]
    to_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    to_lng: f64,
}

impl EndpointArgs {
    fn start(&self) -> LatLng {
        LatLng::new(self.from_lat, self.from_lng)
    }

    fn end(&self) -> LatLng {
        LatLng::new(self.to_lat, self.to_lng)
    }
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Land/water grid raster (JSON).
    #[arg(long, env = "SEAROUTE_GRID")]
    grid: PathBuf,

    #[command(flatten)]
    endpoints: EndpointArgs,

    /// Vessel preset name from the catalog.
    #[arg(long, conflicts_with = "vessel_file", required_unless_present = "vessel_file")]
    vessel: Option<String>,

    /// Vessel preset catalog (CSV).
    #[arg(long, env = "SEAROUTE_VESSEL_CATALOG")]
    vessel_catalog: Option<PathBuf>,

    /// Vessel parameters (JSON) instead of a preset.
    #[arg(long)]
    vessel_file: Option<PathBuf>,

    /// Environmental snapshot payload; calm deep water when omitted.
    #[arg(long, env = "SEAROUTE_ENVIRONMENT")]
    environment: Option<PathBuf>,

    /// No-go zones (JSON array of [lat, lng] rings).
    #[arg(long)]
    no_go: Option<PathBuf>,

    /// Voyage date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Strategies to run (repeatable); all three by default.
    #[arg(long = "strategy")]
    strategies: Vec<Strategy>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Give up when planning takes longer than this.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Stop each search after expanding this many cells.
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Run strategies one after another instead of in parallel.
    #[arg(long)]
    sequential: bool,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        Self {
            grid: args.grid,
            start: args.endpoints.start(),
            end: args.endpoints.end(),
            vessel: args.vessel,
            vessel_catalog: args.vessel_catalog,
            vessel_file: args.vessel_file,
            environment: args.environment,
            no_go: args.no_go,
            date: args.date,
            strategies: args.strategies,
            format: args.format,
            timeout: Duration::from_secs(args.timeout_secs),
            max_expansions: args.max_expansions,
            sequential: args.sequential,
        }
    }
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    match cli.command {
        Command::Route(args) => run_route(args.into()),
        Command::Vessels { vessel_catalog } => handle_list_vessels(&vessel_catalog),
        Command::EnvRequest {
            endpoints,
            date,
            padding,
        } => handle_env_request(endpoints.start(), endpoints.end(), date, padding),
    }
}

fn run_route(args: RouteCommandArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(handle_route_command(args));
    // A timed-out search is still running on a blocking thread; do not wait for it.
    runtime.shutdown_background();
    result
}
