use std::sync::LazyLock;

use regex::Regex;

/// `/approve-pr 12`, `approvepr#12`, `APPROVE-PR: 12`, …
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:/\s*)?approve-?pr[\s:/#-]*?([0-9]+)").expect("invalid command regex")
});
/// Looser check used to decide whether a comment is addressed to us at all.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)approve-?pr").expect("invalid mention regex"));
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("invalid reference regex"));

/// Replace non-breaking spaces and trim. A missing comment is an empty one.
pub(crate) fn normalize(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .replace('\u{00A0}', " ")
        .trim()
        .to_owned()
}

pub(crate) fn mentions_command(body: &str) -> bool {
    MENTION_RE.is_match(body)
}

/// Digits following the first command in `body`.
///
/// `Some(None)` means a command was found but its digits are not a usable number.
pub(crate) fn parse_command(body: &str) -> Option<Option<u64>> {
    let caps = COMMAND_RE.captures(body)?;
    Some(to_target(&caps[1]))
}

/// First `#123` style reference in the issue title or body.
pub(crate) fn find_reference(title: &str, body: &str) -> Option<u64> {
    let haystack = format!("{title}\n{body}");
    let caps = REFERENCE_RE.captures(&haystack)?;
    to_target(&caps[1])
}

fn to_target(digits: &str) -> Option<u64> {
    digits.parse().ok().filter(|&n| n != 0)
}
