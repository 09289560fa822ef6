//! Vessels command handler for listing presets.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use searoute_lib::VesselCatalog;

use searoute_cli::output::write_vessel_catalog;

/// Handle the vessels subcommand.
pub fn handle_list_vessels(catalog_path: &Path) -> Result<()> {
    let catalog = load_vessel_catalog(catalog_path)?;
    write_vessel_catalog(&mut io::stdout().lock(), &catalog)
        .context("failed to write vessel table")?;
    Ok(())
}

pub fn load_vessel_catalog(path: &Path) -> Result<VesselCatalog> {
    VesselCatalog::from_path(path)
        .with_context(|| format!("failed to load vessel presets from {}", path.display()))
}
