//! Link-target encoding scanner.
//!
//! Relative targets must percent-encode spaces (`%20`) and plus signs
//! (`%2B`). Both inline links/images and reference-style definitions are
//! checked. External targets are exempt.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IssueKind, LinkIssue};
use crate::lines::{FenceMode, prose_lines};
use crate::scan::is_external;

/// Optional link title: `"..."`, `'...'` or `(...)`.
const TITLE: &str = r#"(?:\s+(?:"[^"]*"|'[^']*'|\([^)]*\)))?"#;

/// Inline link or image: `[text](target "title")` / `![alt](target "title")`.
/// The target may contain raw spaces, which is exactly what this scanner reports.
static INLINE_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"!?\[(?P<text>[^\]]+)\]\((?P<target><[^>]*>|[^)]+?){TITLE}\)");
    match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid inline link regex: {err}"),
    }
});

/// Reference-style definition occupying a whole line: `[id]: target "title"`.
/// The target is one token, or `<...>` when it holds spaces. Footnote labels
/// (`[^1]:`) are not definitions.
static REF_DEF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^\s*\[[^\]^][^\]]*\]:\s*(?P<target><[^>]*>|\S+){TITLE}\s*$");
    match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid reference definition regex: {err}"),
    }
});

/// Whether the raw target contains a character that must be encoded.
#[must_use]
pub fn has_unencoded_chars(target: &str) -> bool {
    target.contains(' ') || target.contains('+')
}

/// Drop the angle brackets around a `<...>` target.
fn strip_angle_brackets(target: &str) -> &str {
    target
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(target)
}

/// Scan markdown content for unencoded spaces or `+` in relative targets.
///
/// With [`FenceMode::Ignore`] every line is inspected, code blocks included.
#[must_use]
pub fn scan_encoding(content: &str, path: &Path, fence_mode: FenceMode) -> Vec<LinkIssue> {
    let mut issues = Vec::new();

    for line in prose_lines(content, fence_mode) {
        for caps in INLINE_LINK_PATTERN.captures_iter(line.text) {
            let (Some(text), Some(target)) = (caps.name("text"), caps.name("target")) else {
                continue;
            };
            let target = strip_angle_brackets(target.as_str().trim());
            if !is_external(target) && has_unencoded_chars(target) {
                issues.push(LinkIssue::unencoded(
                    path.to_owned(),
                    line.number,
                    IssueKind::UnencodedTarget,
                    text.as_str().trim(),
                    target,
                ));
            }
        }

        if let Some(target) = REF_DEF_PATTERN
            .captures(line.text)
            .and_then(|caps| caps.name("target"))
        {
            let target = strip_angle_brackets(target.as_str().trim());
            if !is_external(target) && has_unencoded_chars(target) {
                issues.push(LinkIssue::unencoded(
                    path.to_owned(),
                    line.number,
                    IssueKind::UnencodedDefinition,
                    "",
                    target,
                ));
            }
        }
    }

    issues
}
