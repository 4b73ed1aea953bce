//! Auth command - test and manage authentication

use std::env;
use subup::auth::resolve_github_token;
use subup::error::Result;
use subup::forge::{ForgeService, GitHubForge};

/// Run the auth test command
pub async fn run_auth_test() -> Result<()> {
    println!("Testing GitHub authentication...");
    let auth = resolve_github_token(None).await?;
    let forge = GitHubForge::for_user(auth.token.clone(), env::var("GH_HOST").ok())?;
    let login = forge.current_user().await?;
    println!("Authenticated as: {login}");
    println!("Token source: {:?}", auth.source);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("GitHub Authentication Setup");
    println!("===========================");
    println!();
    println!("Option 1: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("Option 2: GitHub CLI");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set GH_HOST to your instance hostname");
}

/// Wrapper for auth commands
pub async fn run_auth(action: &str) -> Result<()> {
    match action {
        "test" => run_auth_test().await,
        "setup" => {
            run_auth_setup();
            Ok(())
        }
        _ => {
            println!("Unknown action: {action}. Use 'test' or 'setup'.");
            Ok(())
        }
    }
}
