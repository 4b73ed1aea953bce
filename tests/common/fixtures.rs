//! Test fixtures: real temporary git repositories with submodules
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use subup::config::UpdateConfig;
use subup::types::{PullRequest, RepoSlug};
use tempfile::TempDir;

/// Run a git command in `dir`, panicking with git's stderr on failure
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("git is installed");
    assert!(
        output.status.success(),
        "git {args:?} in {} failed: {}",
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn set_identity(dir: &Path) {
    run_git(dir, &["config", "user.name", "Test Runner"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
}

/// A parent repository with a bare push remote and local-path submodules
///
/// Layout under one temp dir:
/// - `parent/` - the working copy the workflow runs against
/// - `origin.git/` - bare repository registered as the parent's `origin`
/// - `<name>-upstream/` - one source repository per submodule
pub struct RepoFixture {
    root: TempDir,
    /// Working copy path
    pub parent: PathBuf,
    /// Bare push remote path
    pub origin: PathBuf,
}

impl RepoFixture {
    /// Create a parent repository with an initial commit pushed to `origin`
    pub fn new() -> Self {
        let root = TempDir::new().expect("temp dir");

        let origin = root.path().join("origin.git");
        run_git(root.path(), &["init", "--bare", "-b", "main", "origin.git"]);

        let parent = root.path().join("parent");
        fs::create_dir(&parent).expect("create parent dir");
        run_git(&parent, &["init", "-b", "main"]);
        set_identity(&parent);
        fs::write(parent.join("README.md"), "parent\n").expect("write file");
        run_git(&parent, &["add", "."]);
        run_git(&parent, &["commit", "-m", "initial"]);
        run_git(&parent, &["remote", "add", "origin", origin.to_str().unwrap()]);
        run_git(&parent, &["push", "origin", "main"]);

        Self {
            root,
            parent,
            origin,
        }
    }

    fn upstream_dir(&self, name: &str) -> PathBuf {
        self.root.path().join(format!("{name}-upstream"))
    }

    /// Create an upstream repository and add it to the parent as a submodule
    /// tracking `main`; commits and pushes the result.
    pub fn add_submodule(&self, name: &str) {
        let upstream = self.upstream_dir(name);
        fs::create_dir(&upstream).expect("create upstream dir");
        run_git(&upstream, &["init", "-b", "main"]);
        set_identity(&upstream);
        fs::write(upstream.join("lib.txt"), format!("{name} v1\n")).expect("write file");
        run_git(&upstream, &["add", "."]);
        run_git(&upstream, &["commit", "-m", "initial"]);

        run_git(
            &self.parent,
            &[
                "-c",
                "protocol.file.allow=always",
                "submodule",
                "add",
                "-b",
                "main",
                upstream.to_str().unwrap(),
                name,
            ],
        );
        // The fetch performed by `submodule update --remote` runs inside the
        // submodule's own repository; allow its file-path remote there.
        run_git(&self.parent.join(name), &["config", "protocol.file.allow", "always"]);
        run_git(&self.parent, &["commit", "-m", &format!("add {name} submodule")]);
        run_git(&self.parent, &["push", "origin", "main"]);
    }

    /// Land a new commit on the upstream's main branch
    pub fn advance_upstream(&self, name: &str) {
        let upstream = self.upstream_dir(name);
        let marker = upstream.join("update.txt");
        let generation = fs::read_to_string(&marker).map_or(0, |s| s.lines().count());
        fs::write(&marker, format!("update {}\n", generation + 1)).expect("write file");
        run_git(&upstream, &["add", "."]);
        run_git(&upstream, &["commit", "-m", "upstream change"]);
    }

    /// Create a branch at the parent's HEAD and push it to origin
    pub fn push_branch(&self, branch: &str) {
        run_git(&self.parent, &["branch", branch]);
        run_git(&self.parent, &["push", "origin", branch]);
    }

    /// Branch names in the parent working copy
    pub fn parent_branches(&self) -> Vec<String> {
        run_git(&self.parent, &["branch", "--format=%(refname:short)"])
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Branch names in the bare origin
    pub fn origin_branches(&self) -> Vec<String> {
        run_git(&self.origin, &["branch", "--format=%(refname:short)"])
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Currently checked-out branch of the parent
    pub fn current_branch(&self) -> String {
        run_git(&self.parent, &["branch", "--show-current"])
            .trim()
            .to_string()
    }

    /// Subject line of a revision in the parent
    pub fn log_subject(&self, rev: &str) -> String {
        run_git(&self.parent, &["log", "-1", "--format=%s", rev])
            .trim()
            .to_string()
    }

    /// Paths touched between two revisions in the parent
    pub fn changed_paths(&self, from: &str, to: &str) -> Vec<String> {
        run_git(
            &self.parent,
            &["diff", "--name-only", &format!("{from}..{to}")],
        )
        .lines()
        .map(ToString::to_string)
        .collect()
    }
}

/// Workflow config wired for the fixture: pushes go to `origin`, actor is
/// `robot`, and the PR target is a placeholder slug the mock forge accepts.
pub fn make_config() -> UpdateConfig {
    let mut config = UpdateConfig::new(
        "test-token".to_string(),
        "robot".to_string(),
        RepoSlug::new("octo", "widgets"),
    );
    config.remote_name = "origin".to_string();
    config
}

/// Create a pull request record with default values
pub fn make_pr(number: u64, head_label: &str, base: &str) -> PullRequest {
    let branch = head_label.split_once(':').map_or(head_label, |(_, b)| b);
    PullRequest {
        number,
        html_url: format!("https://github.com/octo/widgets/pull/{number}"),
        head_label: head_label.to_string(),
        head_ref: branch.to_string(),
        base_ref: base.to_string(),
        title: format!("PR for {branch}"),
    }
}
