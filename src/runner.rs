use std::path::Path;

use anyhow::{Context, Result};
use tracing::Instrument;

use crate::approve::{approve, ActionsReporter, Outcome};
use crate::cli::RunArgs;
use crate::event::IssueCommentEvent;
use crate::traits::PullRequestApi;

/// Handle the event of the current workflow run, reporting on stdout.
pub(crate) async fn run(args: RunArgs) -> Result<Outcome> {
    let github_api = octocrab::instance();
    let mut reporter = ActionsReporter::new(std::io::stdout());
    run_with(args, github_api.as_ref(), &mut reporter).await
}

async fn run_with<C, W>(
    RunArgs {
        event_path,
        repository,
    }: RunArgs,
    github_api: &C,
    reporter: &mut ActionsReporter<W>,
) -> Result<Outcome>
where
    C: PullRequestApi,
    W: std::io::Write,
{
    let event = load_event(&event_path).await?;
    let repo = repository
        .or_else(|| event.repo_ref())
        .context("no repository in event payload, pass --repository")?;
    tracing::debug!("Handling event from {} for {repo}", event_path.display());

    let outcome = approve(&event, &repo, github_api, reporter)
        .instrument(tracing::info_span!("approve"))
        .await;
    Ok(outcome)
}

async fn load_event(path: &Path) -> Result<IssueCommentEvent> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid event payload in {}", path.display()))
}
