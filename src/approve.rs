use thiserror::Error;

use crate::constants::{ISSUE_BODY_PREVIEW, MISSING_TARGET_HINT};
use crate::event::{IssueCommentEvent, RepoRef};
use crate::traits::{PullRequestApi, Reporter};
use crate::utils::truncate;

mod extract;
mod report;

pub(crate) use extract::{mentions_command, normalize};
pub(crate) use report::{ActionsReporter, TracingReporter};

/// Terminal result of one approval.
#[derive(Debug)]
pub(crate) enum Outcome {
    Merged(u64),
    /// Nothing to do, the pull request was merged before.
    AlreadyMerged(u64),
    Failed(ApprovalError),
}

impl Outcome {
    pub(crate) fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ApprovalError {
    #[error("{}", MISSING_TARGET_HINT)]
    MissingTarget,
    #[error("Failed to get PR #{number}: {error}")]
    Fetch { number: u64, error: anyhow::Error },
    #[error("Failed to squash-merge PR #{number}: {error}")]
    Merge { number: u64, error: anyhow::Error },
    #[error("PR #{number} not merged: {response}")]
    NotMerged { number: u64, response: String },
}

/// Find the pull request a comment asks for and squash-merge it.
///
/// Exactly one terminal outcome is produced. Failures are handed to
/// [`Reporter::fail`] and returned, never propagated.
pub(crate) async fn approve<C, R>(
    event: &IssueCommentEvent,
    repo: &RepoRef,
    github_api: &C,
    reporter: &mut R,
) -> Outcome
where
    C: PullRequestApi,
    R: Reporter,
{
    match merge_requested(event, repo, github_api, reporter).await {
        Ok(outcome) => outcome,
        Err(error) => {
            reporter.fail(&error.to_string());
            Outcome::Failed(error)
        }
    }
}

async fn merge_requested<C, R>(
    event: &IssueCommentEvent,
    repo: &RepoRef,
    github_api: &C,
    reporter: &mut R,
) -> Result<Outcome, ApprovalError>
where
    C: PullRequestApi,
    R: Reporter,
{
    log_context(event, repo, reporter);
    let number = extract_target(event, reporter).ok_or(ApprovalError::MissingTarget)?;

    let pr = github_api
        .get_pull(repo, number)
        .await
        .map_err(|error| ApprovalError::Fetch { number, error })?;
    reporter.info(&format!(
        "Fetched PR #{number}: title=\"{}\", url={}, state={}",
        pr.title, pr.html_url, pr.state
    ));
    if let Some(mergeable) = pr.mergeable {
        reporter.info(&format!("PR.mergeable: {mergeable}"));
    }
    if pr.merged {
        reporter.info(&format!("PR #{number} already merged."));
        return Ok(Outcome::AlreadyMerged(number));
    }

    let merge = github_api
        .squash_merge(repo, number)
        .await
        .map_err(|error| ApprovalError::Merge { number, error })?;
    let response = merge.to_string();
    reporter.info(&format!("Merge response: {response}"));
    if !merge.merged {
        return Err(ApprovalError::NotMerged { number, response });
    }
    reporter.info(&format!("PR #{number} squashed and merged successfully."));
    Ok(Outcome::Merged(number))
}

fn log_context<R: Reporter>(event: &IssueCommentEvent, repo: &RepoRef, reporter: &mut R) {
    let or_null = |n: Option<u64>| n.map_or_else(|| "null".to_owned(), |n| n.to_string());
    reporter.info(&format!(
        "Comment body: \"{}\"",
        event.comment_body().unwrap_or_default()
    ));
    reporter.info(&format!(
        "Commenter: {}, association: {}",
        event.commenter().unwrap_or("unknown"),
        event.author_association().unwrap_or("UNKNOWN"),
    ));
    reporter.info(&format!(
        "Issue number: {}, Comment id: {}",
        or_null(event.issue_number()),
        or_null(event.comment_id()),
    ));
    reporter.info(&format!("Repository: {repo}"));
}

/// The command in the comment wins; the issue's own references are the fallback.
fn extract_target<R: Reporter>(event: &IssueCommentEvent, reporter: &mut R) -> Option<u64> {
    let body = normalize(event.comment_body());
    if let Some(target) = extract::parse_command(&body) {
        return target;
    }

    reporter.info("No PR number found in comment, attempting to extract from issue title/body...");
    let (title, issue_body) = (event.issue_title(), event.issue_body());
    reporter.info(&format!("Issue title: \"{title}\""));
    reporter.info(&format!(
        "Issue body (first {ISSUE_BODY_PREVIEW} chars): \"{}\"",
        truncate(issue_body, ISSUE_BODY_PREVIEW)
    ));
    let target = extract::find_reference(title, issue_body)?;
    reporter.info(&format!("Found PR number {target} in issue content."));
    Some(target)
}
