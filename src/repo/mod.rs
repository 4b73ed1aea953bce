//! Local repository gateway
//!
//! Thin synchronous wrapper over the `git` binary. Every operation maps to
//! one subprocess invocation; failures carry git's own diagnostic text.

mod scope;

pub use scope::BranchScope;

use crate::error::{Error, Result};
use crate::types::{BranchRecord, GitRemote, Submodule};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Which configuration file a [`GitRepo::set_config`] write lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.git/config` of this repository
    Local,
    /// The user-global configuration
    Global,
}

/// Handle to a local git working copy
///
/// All operations are blocking and act on the repository the handle was
/// opened on; the active branch is read from git on demand rather than
/// cached, so checkouts performed through the handle are always visible.
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Open an existing working copy
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Self {
            workdir: path.to_path_buf(),
        };
        // Fails with git's diagnostic if `path` is not a work tree
        repo.run(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(repo)
    }

    /// Root of the working copy
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(args = ?args, workdir = %self.workdir.display(), "git");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Vcs {
                command: args.first().map_or_else(String::new, ToString::to_string),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// List local branches, marking the currently active one
    pub fn branches(&self) -> Result<Vec<BranchRecord>> {
        let output = self.run(&["branch"])?;
        Ok(parse_branch_list(&output))
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        self.branches()?
            .into_iter()
            .find(|b| b.is_current)
            .map(|b| b.name)
            .ok_or_else(|| Error::Checkout("no branch is checked out (detached HEAD?)".to_string()))
    }

    /// Create a branch at HEAD; an already-existing branch is not an error
    pub fn create_branch(&self, name: &str) -> Result<()> {
        match self.run(&["branch", name]) {
            Ok(_) => Ok(()),
            Err(Error::Vcs { detail, .. }) if detail.contains("already exists") => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Check out a branch
    pub fn checkout(&self, name: &str) -> Result<()> {
        self.run(&["checkout", name])
            .map(|_| ())
            .map_err(|e| match e {
                Error::Vcs { detail, .. } => Error::Checkout(detail),
                other => other,
            })
    }

    /// Re-resolve a submodule's remote URL and tracked branch
    pub fn sync_submodule(&self, path: &str) -> Result<()> {
        self.run(&["submodule", "sync", "--", path]).map(|_| ())
    }

    /// Fast-forward a submodule checkout to the tip of its tracked branch
    pub fn update_submodule_remote(&self, path: &str) -> Result<()> {
        self.run(&["submodule", "update", "--init", "--remote", "--", path])
            .map(|_| ())
    }

    /// Whether tracked content differs from HEAD, optionally restricted to a
    /// subtree
    pub fn is_dirty(&self, scope: Option<&str>) -> Result<bool> {
        let mut args = vec!["status", "--porcelain", "--untracked-files=no"];
        if let Some(path) = scope {
            args.push("--");
            args.push(path);
        }
        Ok(!self.run(&args)?.trim().is_empty())
    }

    /// Stage a path
    pub fn stage(&self, path: &str) -> Result<()> {
        self.run(&["add", "--", path]).map(|_| ())
    }

    /// Commit staged changes
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    /// Push a branch to a remote
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch]).map(|_| ())
    }

    /// Pull a branch from a remote
    pub fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["pull", remote, branch]).map(|_| ())
    }

    /// Write a configuration value
    pub fn set_config(&self, scope: ConfigScope, key: &str, value: &str) -> Result<()> {
        let args = match scope {
            ConfigScope::Local => vec!["config", key, value],
            ConfigScope::Global => vec!["config", "--global", key, value],
        };
        self.run(&args).map(|_| ())
    }

    /// Re-point a submodule's tracked branch in `.gitmodules`
    pub fn set_submodule_branch(&self, name: &str, branch: &str) -> Result<()> {
        let key = format!("submodule.{name}.branch");
        self.run(&["config", "-f", ".gitmodules", &key, branch])
            .map(|_| ())
    }

    /// List configured remotes
    pub fn remotes(&self) -> Result<Vec<GitRemote>> {
        let output = self.run(&["remote", "-v"])?;
        Ok(parse_remotes(&output))
    }

    /// Create a remote, or re-point it if it already exists
    pub fn ensure_remote(&self, name: &str, url: &str) -> Result<()> {
        match self.run(&["remote", "add", name, url]) {
            Ok(_) => Ok(()),
            Err(Error::Vcs { detail, .. }) if detail.contains("already exists") => {
                self.run(&["remote", "set-url", name, url]).map(|_| ())
            }
            Err(e) => Err(e),
        }
    }

    /// Enumerate submodules from `.gitmodules`, in file order
    pub fn submodules(&self) -> Result<Vec<Submodule>> {
        if !self.workdir.join(".gitmodules").exists() {
            return Ok(Vec::new());
        }
        let output = self.run(&["config", "-f", ".gitmodules", "--get-regexp", r"^submodule\."])?;
        parse_gitmodules_config(&output)
    }

    /// Commit id of HEAD
    pub fn head_commit(&self) -> Result<String> {
        Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
    }
}

/// Parse `git branch` output into branch records
///
/// Lines look like `  main` or `* feature`; the marker identifies the active
/// branch and is not part of the name.
fn parse_branch_list(output: &str) -> Vec<BranchRecord> {
    output
        .lines()
        .filter_map(|line| {
            let is_current = line.starts_with('*');
            let name = line.trim_start_matches('*').trim();
            // Skip detached-HEAD pseudo entries like "(HEAD detached at abc123)"
            if name.is_empty() || name.starts_with('(') {
                return None;
            }
            Some(BranchRecord {
                name: name.to_string(),
                is_current,
            })
        })
        .collect()
}

/// Parse `git remote -v` output, taking one entry per remote (fetch lines)
fn parse_remotes(output: &str) -> Vec<GitRemote> {
    output
        .lines()
        .filter(|line| line.ends_with("(fetch)"))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let url = parts.next()?;
            Some(GitRemote {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Parse `git config -f .gitmodules --get-regexp '^submodule\.'` output
///
/// Keys look like `submodule.<name>.path`; entries are grouped by name in
/// first-seen order. A submodule without both `path` and `url` is a parse
/// error.
fn parse_gitmodules_config(output: &str) -> Result<Vec<Submodule>> {
    struct Partial {
        path: Option<String>,
        url: Option<String>,
        branch: Option<String>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut entries: std::collections::HashMap<String, Partial> = std::collections::HashMap::new();

    for line in output.lines() {
        let Some((key, value)) = line.split_once(' ') else {
            continue;
        };
        // submodule.<name>.<field>; the name itself may contain dots
        let Some(rest) = key.strip_prefix("submodule.") else {
            continue;
        };
        let Some((name, field)) = rest.rsplit_once('.') else {
            continue;
        };

        let entry = entries.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            Partial {
                path: None,
                url: None,
                branch: None,
            }
        });

        match field {
            "path" => entry.path = Some(value.to_string()),
            "url" => entry.url = Some(value.to_string()),
            "branch" => entry.branch = Some(value.to_string()),
            _ => {}
        }
    }

    order
        .into_iter()
        .map(|name| {
            let partial = entries.remove(&name).expect("entry recorded with order");
            let path = partial
                .path
                .ok_or_else(|| Error::Parse(format!("submodule {name} has no path")))?;
            let url = partial
                .url
                .ok_or_else(|| Error::Parse(format!("submodule {name} has no url")))?;
            Ok(Submodule {
                name,
                path,
                url,
                branch: partial.branch,
            })
        })
        .collect()
}
