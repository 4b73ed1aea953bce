//! GitHub remote detection from URLs

use crate::error::{Error, Result};
use crate::types::RepoSlug;
use regex::Regex;
use std::env;

/// A remote URL resolved to a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRemote {
    /// Owner/repository pair
    pub slug: RepoSlug,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Whether a remote URL points at GitHub (or a GHE host named by `GH_HOST`)
pub fn detect_github(url: &str) -> bool {
    let gh_host = env::var("GH_HOST").ok();

    let Some(hostname) = extract_hostname(url) else {
        return false;
    };

    hostname == "github.com"
        || hostname.ends_with(".github.com")
        || gh_host.as_ref().is_some_and(|h| hostname == *h)
}

/// Parse a GitHub remote URL into owner/repo and an optional custom host
pub fn parse_github_remote(url: &str) -> Result<GitHubRemote> {
    if !detect_github(url) {
        return Err(Error::NoGitHubRemote);
    }
    let hostname = extract_hostname(url);

    // SSH format: git@host:owner/repo.git
    // HTTPS format: https://host/owner/repo.git
    let re_ssh = Regex::new(r"git@[^:]+:(.+?)(?:\.git)?/?$").expect("static pattern");
    let re_https = Regex::new(r"https?://[^/]+/(.+?)(?:\.git)?/?$").expect("static pattern");

    let path = re_ssh
        .captures(url)
        .or_else(|| re_https.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    let parts: Vec<&str> = path.split('/').collect();
    let [owner, repo] = parts.as_slice() else {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    };

    let host = hostname.filter(|h| h != "github.com");

    Ok(GitHubRemote {
        slug: RepoSlug::new(*owner, *repo),
        host,
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    // SSH format
    if url.starts_with("git@") {
        return url
            .strip_prefix("git@")
            .and_then(|s| s.split(':').next())
            .map(ToString::to_string);
    }

    // HTTPS format
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}
