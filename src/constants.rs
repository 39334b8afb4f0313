pub(crate) const MISSING_TARGET_HINT: &str = "No PR number found in comment or issue. \
     Use \"/approve-pr #123\" or include PR reference in the issue.";
/// How much of the issue body is echoed to the log when falling back to it.
pub(crate) const ISSUE_BODY_PREVIEW: usize = 300;
