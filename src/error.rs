//! Error types for subup

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the update workflow can produce
#[derive(Debug, Error)]
pub enum Error {
    /// A checkout could not complete (branch missing, conflicting working tree)
    #[error("checkout failed: {0}")]
    Checkout(String),

    /// A git invocation exited nonzero; `detail` carries its stderr
    #[error("git {command} failed: {detail}")]
    Vcs {
        /// The git subcommand that failed (e.g. `push`)
        command: String,
        /// Diagnostic text from git
        detail: String,
    },

    /// Non-success response from the forge API
    #[error("forge API error ({status}): {message}")]
    ForgeApi {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Transport-level HTTP failure (timeout, DNS, TLS)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication problem (no token, invalid token)
    #[error("authentication error: {0}")]
    Auth(String),

    /// Missing or invalid configuration input
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to parse external output (remote URLs, branch lists, .gitmodules)
    #[error("parse error: {0}")]
    Parse(String),

    /// No remote pointing at a supported forge was found
    #[error("no GitHub remote found in repository")]
    NoGitHubRemote,

    /// Underlying I/O failure (spawning git, reading output)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
