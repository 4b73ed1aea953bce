//! subup - Automated pull requests for outdated git submodules
//!
//! This library provides the core workflow for keeping a repository's git
//! submodules current: for each submodule it checks whether the upstream has
//! moved and, if so, updates the pinned commit on a dedicated branch, pushes
//! it, and opens (or refreshes) a pull request on the forge.
//!
//! # Architecture
//!
//! The library is designed to be interface-agnostic, allowing it to be used
//! from:
//! - CLI applications
//! - CI jobs / scheduled runners
//! - Web services
//!
//! Forge I/O is async; local git operations are synchronous subprocess calls.
//! All state is passed explicitly (no globals).

pub mod auth;
pub mod config;
pub mod error;
pub mod forge;
pub mod repo;
pub mod types;
pub mod update;

pub use error::{Error, Result};
pub use types::*;
