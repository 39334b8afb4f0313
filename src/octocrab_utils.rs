use anyhow::{anyhow, Result};
use octocrab::{
    models::{pulls::PullRequest, IssueState},
    params::pulls::MergeMethod,
    Octocrab,
};

use crate::event::RepoRef;
use crate::traits::{MergeResponse, PullRequestApi, PullSummary};

impl PullRequestApi for Octocrab {
    async fn get_pull(&self, repo: &RepoRef, number: u64) -> Result<PullSummary> {
        let pr = self
            .pulls(&repo.owner, &repo.name)
            .get(number)
            .await
            .map_err(github_error)?;
        Ok(pr.into())
    }

    async fn squash_merge(&self, repo: &RepoRef, number: u64) -> Result<MergeResponse> {
        let merge = self
            .pulls(&repo.owner, &repo.name)
            .merge(number)
            .method(MergeMethod::Squash)
            .send()
            .await
            .map_err(github_error)?;
        Ok(MergeResponse {
            sha: merge.sha,
            merged: merge.merged,
            message: merge.message,
        })
    }
}

/// Keep GitHub's own message ("Not Found", …); `octocrab::Error::GitHub` only displays as `GitHub`.
fn github_error(error: octocrab::Error) -> anyhow::Error {
    match error {
        octocrab::Error::GitHub { source, .. } => anyhow!("{}", source.message),
        error => error.into(),
    }
}

impl From<PullRequest> for PullSummary {
    fn from(pr: PullRequest) -> Self {
        let state = match pr.state {
            Some(IssueState::Open) => "open",
            Some(IssueState::Closed) => "closed",
            // IssueState is non-exhaustive
            Some(_) | None => "unknown",
        };
        PullSummary {
            title: pr.title.unwrap_or_default(),
            html_url: pr.html_url.map(|url| url.to_string()).unwrap_or_default(),
            state: state.to_owned(),
            merged: pr.merged_at.is_some(),
            mergeable: pr.mergeable,
        }
    }
}
