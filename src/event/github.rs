use serde::Deserialize;

use super::RepoRef;

/// A stripped down version of [`octocrab::models::webhook_events::WebhookEvent`]
/// for `issue_comment` events. Every field is optional: the same type reads the
/// payload file of a workflow run and the body of a webhook delivery.
#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct IssueCommentEvent {
    /// What happened to the comment. Absent for non-comment triggers.
    pub action: Option<IssueCommentAction>,
    pub comment: Option<Comment>,
    /// The issue or pull request the comment was made on
    pub issue: Option<Issue>,
    pub repository: Option<Repository>,
    /// The account that triggered the event
    pub sender: Option<User>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum IssueCommentAction {
    Created,
    Edited,
    Deleted,
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct Comment {
    pub id: Option<u64>,
    pub body: Option<String>,
    pub user: Option<User>,
    /// e.g. `OWNER`, `COLLABORATOR`, `NONE`
    pub author_association: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct Issue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct Repository {
    pub name: String,
    pub owner: User,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct User {
    pub login: String,
}

impl IssueCommentEvent {
    pub(crate) fn comment_body(&self) -> Option<&str> {
        self.comment.as_ref()?.body.as_deref()
    }

    /// Login of the commenter, falling back to the event sender.
    pub(crate) fn commenter(&self) -> Option<&str> {
        self.comment
            .as_ref()
            .and_then(|c| c.user.as_ref())
            .or(self.sender.as_ref())
            .map(|u| u.login.as_str())
    }

    pub(crate) fn author_association(&self) -> Option<&str> {
        self.comment.as_ref()?.author_association.as_deref()
    }

    pub(crate) fn comment_id(&self) -> Option<u64> {
        self.comment.as_ref()?.id
    }

    pub(crate) fn issue_number(&self) -> Option<u64> {
        self.issue.as_ref()?.number
    }

    pub(crate) fn issue_title(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|i| i.title.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn issue_body(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|i| i.body.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn repo_ref(&self) -> Option<RepoRef> {
        self.repository.as_ref().map(|r| RepoRef {
            owner: r.owner.login.clone(),
            name: r.name.clone(),
        })
    }
}
