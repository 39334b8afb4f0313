use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;

use crate::event::RepoRef;

/// The parts of a pull request the approval handler looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PullSummary {
    pub title: String,
    pub html_url: String,
    pub state: String,
    pub merged: bool,
    /// `None` while GitHub is still computing mergeability
    pub mergeable: Option<bool>,
}

/// Body of the merge endpoint's response, quoted verbatim in failure reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct MergeResponse {
    pub sha: Option<String>,
    pub merged: bool,
    pub message: Option<String>,
}

impl Display for MergeResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_json::to_string(self).map_err(|_| std::fmt::Error)?)
    }
}

pub(crate) trait PullRequestApi {
    async fn get_pull(&self, repo: &RepoRef, number: u64) -> Result<PullSummary>;
    async fn squash_merge(&self, repo: &RepoRef, number: u64) -> Result<MergeResponse>;
}

/// Where progress and the terminal failure of an approval are reported.
///
/// `fail` records the failure but does not stop the caller; return after calling it.
pub(crate) trait Reporter {
    fn info(&mut self, message: &str);
    fn fail(&mut self, message: &str);
}
