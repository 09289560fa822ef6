//! Output formatting for voyage plans, vessel presets and prefetch requests.

use std::io::{self, Write};

use clap::ValueEnum;
use searoute_lib::{EnvironmentRequest, VesselCatalog, VoyageRenderMode, VoyageSummary};

/// How `route` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per strategy.
    #[default]
    Text,
    /// Strategy lines plus a point table for every route.
    Detailed,
    /// Pretty-printed `VoyageSummary` JSON.
    Json,
}

/// Write a voyage summary in the requested format.
pub fn write_voyage<W: Write>(out: &mut W, summary: &VoyageSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => out.write_all(summary.render(VoyageRenderMode::Summary).as_bytes()),
        OutputFormat::Detailed => {
            out.write_all(summary.render(VoyageRenderMode::Detailed).as_bytes())
        }
        OutputFormat::Json => write_json(out, summary),
    }
}

/// Print the vessel catalog as a table.
pub fn write_vessel_catalog<W: Write>(out: &mut W, catalog: &VesselCatalog) -> io::Result<()> {
    let presets = catalog.presets_sorted();
    if presets.is_empty() {
        return writeln!(out, "No vessel presets in catalog.");
    }

    writeln!(out, "Available vessels ({}):", presets.len())?;
    writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "Name", "Speed kn", "Draft m", "Beam m", "Length m", "Power hp", "Load t"
    )?;
    for (name, params) in presets {
        writeln!(
            out,
            "{:<16} {:>8.1} {:>8.1} {:>8.1} {:>10.1} {:>10.0} {:>10.0}",
            name,
            params.speed,
            params.draft,
            params.beam,
            params.ship_length,
            params.hp_req,
            params.load
        )?;
    }
    Ok(())
}

/// Print the prefetch request body as JSON.
pub fn write_environment_request<W: Write>(out: &mut W, request: &EnvironmentRequest) -> io::Result<()> {
    write_json(out, request)
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}
