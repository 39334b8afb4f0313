use axum::{body::Body, extract::Request, http::StatusCode, routing::post, Router};
use axum_github_webhook_extract::GithubToken as GitHubSecret;
use hmac_sha256::HMAC;
use http_body_util::BodyExt;
use octocrab::Octocrab;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::constants::MISSING_TARGET_HINT;
use crate::fixtures::{self, ISSUE_COMMENT};

use super::{handle, AppState};

mod mock_error {
    use serde_json::json;
    use wiremock::{
        matchers::{method, path_regex},
        Mock, MockServer, ResponseTemplate,
    };

    // Sets up a handler on the mock server which will return a 500 with the given message. This
    // will be mapped internally into a GitHub json error, making it much easier to identify the cause
    // of these test failures.
    //
    // This handler should always come after your real expectations as it will match any request.
    pub async fn setup_error_handler(mock_server: &MockServer, message: &str) {
        for verb in ["GET", "PUT"] {
            Mock::given(method(verb))
                .and(path_regex(".*"))
                .respond_with(ResponseTemplate::new(500).set_body_json(json!( {
                    "documentation_url": "",
                    "errors": None::<Vec<serde_json::Value>>,
                    "message": message,
                })))
                .mount(mock_server)
                .await;
        }
    }
}

use mock_error::setup_error_handler;

const TEST_SECRET: &str = "It's a Secret to Everybody";
const PR_URI: &str = "/repos/octo-org/widgets/pulls/57";
const MERGE_URI: &str = "/repos/octo-org/widgets/pulls/57/merge";

/// Mock GitHub API answering the PR lookup with `pr` and the merge with `merge`.
/// `None` means the endpoint must not be called.
async fn setup_github_api(
    pr: Option<ResponseTemplate>,
    merge: Option<ResponseTemplate>,
) -> MockServer {
    let mock_server = MockServer::start().await;
    if let Some(template) = pr {
        Mock::given(method("GET"))
            .and(path(PR_URI))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    let merge_mock = Mock::given(method("PUT"))
        .and(path(MERGE_URI))
        .and(body_partial_json(json!({ "merge_method": "squash" })));
    if let Some(template) = merge {
        merge_mock
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;
    } else {
        merge_mock
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;
    }
    setup_error_handler(&mock_server, "Unexpected request").await;
    mock_server
}

async fn app(mock_github_server: &MockServer) -> Router {
    // https://github.com/flows-network/octocrab/blob/main/examples/custom_client.rs
    let state = AppState {
        secret: GitHubSecret(Arc::new(TEST_SECRET.to_owned())),
        github_client: Arc::new(
            Octocrab::builder()
                .base_uri(mock_github_server.uri())
                .unwrap()
                .build()
                .unwrap(),
        ),
    };
    Router::new().route("/", post(handle)).with_state(state)
}

fn make_webhook_request<B: Into<Body> + AsRef<[u8]>>(body: B, valid: bool) -> Request {
    let mac = if valid {
        HMAC::mac(&body, TEST_SECRET.as_bytes())
    } else {
        [0; 32]
    };
    Request::builder()
        .method("POST")
        .header(
            "X-Hub-Signature-256",
            format!("sha256={}", hex::encode(mac)),
        )
        .body(body.into())
        .unwrap()
}

async fn body_string(body: Body) -> String {
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).into_owned()
}

/// The fixture event with `comment_body` and `issue_body` replaced.
fn comment_event(comment_body: &str, issue_body: Option<&str>) -> String {
    let mut event: Value = serde_json::from_str(ISSUE_COMMENT).unwrap();
    event["comment"]["body"] = json!(comment_body);
    event["issue"]["body"] = json!(issue_body);
    event.to_string()
}

fn pr_response(merged: bool) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(fixtures::pull_request(json!({
        "title": "Add widgets",
        "html_url": "https://github.com/octo-org/widgets/pull/57",
        "state": if merged { "closed" } else { "open" },
        "merged_at": merged.then_some("2024-01-17T10:00:00Z"),
        "mergeable": !merged,
    })))
}

fn merge_response(merged: bool) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "sha": merged.then_some("6dcb09b5b57875f334f61aebed695e2e4193db5e"),
        "merged": merged,
        "message": if merged { "Pull Request successfully merged" } else { "Base branch was modified" },
    }))
}

#[tokio::test]
async fn should_error_on_invalid_signature() {
    let github = setup_github_api(None, None).await;
    let request = make_webhook_request(ISSUE_COMMENT, false);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{res:?}");
    assert_eq!(&body_string(res.into_body()).await, "signature mismatch");
}

#[tokio::test]
async fn should_error_on_invalid_event_payload() {
    let github = setup_github_api(None, None).await;
    let request = make_webhook_request("[]", true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{res:?}");
}

#[tokio::test]
async fn should_skip_comment_without_command() {
    let github = setup_github_api(None, None).await;
    let request = make_webhook_request(comment_event("LGTM, thanks! #57", None), true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK, "{res:?}");
    assert_eq!(body_string(res.into_body()).await, "skipped");
}

#[tokio::test]
async fn should_skip_edited_comment() {
    let github = setup_github_api(None, None).await;
    let mut event: Value = serde_json::from_str(ISSUE_COMMENT).unwrap();
    event["action"] = json!("edited");
    let request = make_webhook_request(event.to_string(), true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK, "{res:?}");
    assert_eq!(body_string(res.into_body()).await, "skipped");
}

#[tokio::test]
async fn should_merge_commanded_pr() {
    let github = setup_github_api(Some(pr_response(false)), Some(merge_response(true))).await;
    let request = make_webhook_request(ISSUE_COMMENT, true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK, "{res:?}");
    assert_eq!(body_string(res.into_body()).await, "merged #57");
}

#[tokio::test]
async fn should_not_merge_twice() {
    let github = setup_github_api(Some(pr_response(true)), None).await;
    let request = make_webhook_request(ISSUE_COMMENT, true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK, "{res:?}");
    assert_eq!(body_string(res.into_body()).await, "already merged #57");
}

#[tokio::test]
async fn should_report_missing_pr() {
    let not_found = ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest/pulls/pulls#get-a-pull-request",
    }));
    let github = setup_github_api(Some(not_found), None).await;
    let request = make_webhook_request(ISSUE_COMMENT, true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY, "{res:?}");
    assert_eq!(
        body_string(res.into_body()).await,
        "Failed to get PR #57: Not Found"
    );
}

#[tokio::test]
async fn should_report_rejected_merge() {
    let not_mergeable = ResponseTemplate::new(405).set_body_json(json!({
        "message": "Pull Request is not mergeable",
        "documentation_url": "https://docs.github.com/rest/pulls/pulls#merge-a-pull-request",
    }));
    let github = setup_github_api(Some(pr_response(false)), Some(not_mergeable)).await;
    let request = make_webhook_request(ISSUE_COMMENT, true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY, "{res:?}");
    assert_eq!(
        body_string(res.into_body()).await,
        "Failed to squash-merge PR #57: Pull Request is not mergeable"
    );
}

#[tokio::test]
async fn should_report_unmerged_response() {
    let github = setup_github_api(Some(pr_response(false)), Some(merge_response(false))).await;
    let request = make_webhook_request(ISSUE_COMMENT, true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY, "{res:?}");
    assert_eq!(
        body_string(res.into_body()).await,
        r#"PR #57 not merged: {"sha":null,"merged":false,"message":"Base branch was modified"}"#
    );
}

#[tokio::test]
async fn should_reject_command_without_number() {
    let github = setup_github_api(None, None).await;
    let request = make_webhook_request(comment_event("/approve-pr please", None), true);
    let res = app(&github).await.oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{res:?}");
    assert_eq!(body_string(res.into_body()).await, MISSING_TARGET_HINT);
}
