use serde_json::{json, Value};

/// `issue_comment` webhook payload: `/approve-pr #57` on issue 12 of `octo-org/widgets`.
pub(crate) const ISSUE_COMMENT: &str = include_str!("fixtures/issue_comment.json");

/// Pull request 57 as returned by `GET /repos/octo-org/widgets/pulls/57`,
/// with `fields` merged in on top.
pub(crate) fn pull_request(fields: Value) -> Value {
    let mut pr = json!({
        "url": "https://api.github.com/repos/octo-org/widgets/pulls/57",
        "id": 1_700_000_057_u64,
        "number": 57,
        "head": { "ref": "feature", "sha": "f88f7bd4250b963752d615e491b7e676ce5eb7f0" },
        "base": { "ref": "main", "sha": "a4786471ee4d4e894fec150e426c3551db0f31e0" },
    });
    if let (Some(pr), Value::Object(fields)) = (pr.as_object_mut(), fields) {
        pr.extend(fields);
    }
    pr
}
