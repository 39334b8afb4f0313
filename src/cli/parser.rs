use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::event::RepoRef;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) auth: AuthArgs,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Handle the comment that triggered a GitHub Actions workflow run
    Run(RunArgs),
    /// Start web hook server
    Serve(ServeArgs),
}

#[derive(Args, Default)]
pub(crate) struct AuthArgs {
    /// Token for the GitHub API, e.g. the workflow’s `GITHUB_TOKEN`
    #[arg(long, env, global = true, hide_env_values = true)]
    pub(crate) github_token: Option<String>,
    /// GitHub App ID, authenticates as the app’s first installation
    #[arg(long, env, global = true, requires = "app_key")]
    pub(crate) app_id: Option<u64>,
    /// GitHub App private key (PEM)
    #[arg(
        long,
        env,
        global = true,
        requires = "app_id",
        conflicts_with = "github_token",
        hide_env_values = true
    )]
    pub(crate) app_key: Option<String>,
    /// REST API root, set for GitHub Enterprise Server
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    pub(crate) api_url: Option<String>,
}

#[derive(Args)]
pub(crate) struct RunArgs {
    /// JSON file containing the event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub(crate) event_path: PathBuf,
    /// Repository as `owner/name` (default: the event’s repository)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub(crate) repository: Option<RepoRef>,
}

#[derive(Args)]
pub(crate) struct ServeArgs {
    /// IP and port to listen on
    #[arg(default_value = "0.0.0.0:3000")]
    pub(crate) addr: String,
    /// Webhook secret as configured on GitHub
    #[arg(long, env, hide_env_values = true)]
    pub(crate) secret_token: Option<String>,
}
