//! Searoute CLI library.
//!
//! Logging setup and output rendering shared by the `searoute-cli` binary
//! and its tests.

pub mod logging;
pub mod output;
