//! Submodule update workflow
//!
//! Drives the whole run: fetch the open-PR list once, then for each
//! submodule switch onto its update branch, fast-forward the checkout to the
//! upstream tip, and commit/push/open a PR when something moved.

mod execute;
mod progress;

pub use execute::{execute_update, UpdateOptions};
pub use progress::{NoopProgress, Phase, ProgressCallback, SubmoduleStatus};
