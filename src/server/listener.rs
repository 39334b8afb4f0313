use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Router,
};
use axum_github_webhook_extract::{GithubEvent, GithubToken as GitHubSecret};
use octocrab::Octocrab;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::approve::{
    approve, mentions_command, normalize, ApprovalError, Outcome, TracingReporter,
};
use crate::event::{IssueCommentAction, IssueCommentEvent};

#[derive(Debug, Clone)]
struct AppState {
    secret: GitHubSecret,
    github_client: Arc<Octocrab>,
}

impl FromRef<AppState> for GitHubSecret {
    fn from_ref(state: &AppState) -> GitHubSecret {
        state.secret.clone()
    }
}

async fn handle(
    State(state): State<AppState>,
    GithubEvent(event): GithubEvent<IssueCommentEvent>,
) -> Result<String, (StatusCode, String)> {
    if event.action != Some(IssueCommentAction::Created)
        || !mentions_command(&normalize(event.comment_body()))
    {
        return Ok("skipped".to_owned());
    }
    let Some(repo) = event.repo_ref() else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Error: event has no repository".to_owned(),
        ));
    };

    let mut reporter = TracingReporter;
    let outcome = approve(&event, &repo, state.github_client.as_ref(), &mut reporter)
        .instrument(tracing::info_span!("approve", %repo, comment = event.comment_id()))
        .await;
    match outcome {
        Outcome::Merged(number) => Ok(format!("merged #{number}")),
        Outcome::AlreadyMerged(number) => Ok(format!("already merged #{number}")),
        Outcome::Failed(error) => Err((status_for(&error), error.to_string())),
    }
}

fn status_for(error: &ApprovalError) -> StatusCode {
    match error {
        ApprovalError::MissingTarget => StatusCode::BAD_REQUEST,
        ApprovalError::Fetch { .. }
        | ApprovalError::Merge { .. }
        | ApprovalError::NotMerged { .. } => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn listen(github_client: Arc<Octocrab>, secret: SecretString) -> axum::Router {
    let state = AppState {
        secret: GitHubSecret(Arc::new(secret.expose_secret().to_owned())),
        github_client,
    };
    std::mem::drop(secret);

    Router::new()
        .route("/", post(handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
