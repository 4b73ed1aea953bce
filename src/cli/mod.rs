//! CLI commands
//!
//! Command implementations for the `subup` binary.

mod auth;
mod progress;
mod style;
mod update;

pub use auth::run_auth;
pub use update::{run_update, UpdateArgs};
