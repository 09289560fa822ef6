// Handlers for each CLI subcommand; main.rs only parses and dispatches.

pub mod env_request;
pub mod route;
pub mod vessels;
