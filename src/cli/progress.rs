//! CLI progress callback with styled output

use crate::cli::style::{check, cross, hyperlink_url, Stream, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use subup::error::Error;
use subup::types::PullRequest;
use subup::update::{Phase, ProgressCallback, SubmoduleStatus};

/// Progress callback that prints to the terminal
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        println!("{}...", phase.to_string().emphasis());
    }

    async fn on_submodule(&self, name: &str, status: SubmoduleStatus) {
        match &status {
            SubmoduleStatus::Started => {
                println!("  Checking {}...", name.accent());
            }
            SubmoduleStatus::UpToDate => {
                println!("  {} {} {}", "-".muted(), name.accent(), "up to date".muted());
            }
            SubmoduleStatus::Pushed => {
                println!("  {} Pushed update for {}", check(), name.emphasis());
            }
            SubmoduleStatus::Failed(_) => {
                eprintln!(
                    "  {} {}: {}",
                    cross(),
                    name.accent().for_stderr(),
                    status.to_string().error()
                );
            }
        }
    }

    async fn on_pr_created(&self, name: &str, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Created PR {} for {}",
            check(),
            pr_num.accent(),
            name.emphasis()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_reused(&self, name: &str, head_label: &str) {
        println!(
            "  {} Existing PR for {} refreshed ({})",
            check(),
            name.emphasis(),
            head_label.muted()
        );
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("{}: {error}", "error".error());
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
