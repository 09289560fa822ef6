//! Vessel descriptors and preset catalog.
//!
//! - [`params`] - physical parameters of a single ship
//! - [`catalog`] - named presets loaded from CSV
//!
//! # Example
//!
//! ```no_run
//! use searoute_lib::vessel::VesselCatalog;
//!
//! let catalog = VesselCatalog::from_path(std::path::Path::new("vessels.csv")).unwrap();
//! let panamax = catalog.get("Panamax").unwrap();
//! println!("{} t displacement", panamax.displacement());
//! ```

pub mod catalog;
pub mod params;

pub use catalog::VesselCatalog;
pub use params::VesselParams;
