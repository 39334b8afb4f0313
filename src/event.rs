use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};

mod github;

pub(crate) use github::{IssueCommentAction, IssueCommentEvent};

/// Coordinates of the repository whose pull requests are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RepoRef {
                    owner: owner.to_owned(),
                    name: name.to_owned(),
                })
            }
            _ => Err(anyhow!("expected `owner/name`, got {s:?}")),
        }
    }
}

impl Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
