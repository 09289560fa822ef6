//! Prints the bounding-box request body for the environmental data service.

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use searoute_lib::{EnvironmentRequest, LatLng};

use searoute_cli::output::write_environment_request;

pub fn handle_env_request(start: LatLng, end: LatLng, date: NaiveDate, padding_deg: f64) -> Result<()> {
    let request = EnvironmentRequest::for_voyage(start, end, date, padding_deg);
    write_environment_request(&mut io::stdout().lock(), &request)
        .context("failed to write environment request")?;
    Ok(())
}
