//! Authentication for the forge
//!
//! Supports an explicit flag, environment variables, and the gh CLI.

mod github;

pub use github::{resolve_github_token, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
    /// Token from the gh CLI
    Cli,
}
