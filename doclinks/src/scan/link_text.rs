//! Link-text scanner.
//!
//! Flags links to markdown documents whose visible text is the raw file name
//! or a path instead of a readable phrase:
//!
//! ```markdown
//! See [README.md](README.md)       <- flagged
//! See [the README](README.md)      <- fine
//! ```
//!
//! Fenced blocks and inline code spans are never inspected, so examples of
//! bad links inside code do not trip the check.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::LinkIssue;
use crate::lines::{FenceMode, prose_lines};
use crate::scan::{is_external, percent_decode, strip_query_and_fragment};

/// Inline link with an optional quoted title. Images are rejected separately
/// by looking at the byte before the match.
pub static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r#"\[(?P<text>[^\]]+)\]\((?P<target>[^)\s]+)(?:\s+"[^"]*")?\)"#) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid link regex: {err}"),
    }
});

/// Single-backtick inline code span on one line.
static INLINE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"`[^`\n]*`") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid inline code regex: {err}"),
});

/// A link found on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence<'a> {
    pub text: &'a str,
    pub target: &'a str,
}

/// Delete inline code spans so links written as literal examples are ignored.
#[must_use]
pub fn remove_inline_code(line: &str) -> String {
    INLINE_CODE_PATTERN.replace_all(line, "").into_owned()
}

/// Extract every non-image inline link from `line`, left to right.
#[must_use]
pub fn find_links(line: &str) -> Vec<LinkOccurrence<'_>> {
    let mut links = Vec::new();
    let mut pos = 0;

    while let Some(caps) = LINK_PATTERN.captures_at(line, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if line[..whole.start()].ends_with('!') {
            // An image; a real link may still start inside its brackets.
            pos = whole.start() + 1;
            continue;
        }
        if let (Some(text), Some(target)) = (caps.name("text"), caps.name("target")) {
            links.push(LinkOccurrence {
                text: text.as_str().trim(),
                target: target.as_str().trim(),
            });
        }
        pos = whole.end();
    }

    links
}

/// Whether a link target refers to a local markdown document.
#[must_use]
pub fn should_check_target(target: &str) -> bool {
    if target.starts_with('#') || is_external(target) {
        return false;
    }
    let core = percent_decode(strip_query_and_fragment(target));
    core.to_lowercase().ends_with(".md")
}

/// Whether `text` reads like a file name or path rather than prose.
#[must_use]
pub fn is_link_text_problematic(text: &str, target: &str) -> bool {
    let core = percent_decode(strip_query_and_fragment(target));
    let file_name = core.rsplit('/').next().unwrap_or_default();

    let is_exact_file_name = text.to_lowercase() == file_name.to_lowercase();
    let looks_like_path =
        (text.contains('/') || text.contains('\\')) && !text.chars().any(char::is_whitespace);
    let looks_like_markdown = text.trim().to_lowercase().ends_with(".md");

    is_exact_file_name || looks_like_path || looks_like_markdown
}

/// Check a single line. Returns `(text, target)` for each flagged link.
///
/// `in_code_block` short-circuits the check for lines inside fenced code.
#[must_use]
pub fn check_line_for_issues(line: &str, in_code_block: bool) -> Vec<(String, String)> {
    if in_code_block {
        return Vec::new();
    }
    let stripped = remove_inline_code(line);
    find_links(&stripped)
        .into_iter()
        .filter(|link| should_check_target(link.target))
        .filter(|link| is_link_text_problematic(link.text, link.target))
        .map(|link| (link.text.to_owned(), link.target.to_owned()))
        .collect()
}

/// Scan markdown content for links with non-human-readable text.
///
/// Issues come back in line order, then left-to-right within a line.
#[must_use]
pub fn scan_link_text(content: &str, path: &Path) -> Vec<LinkIssue> {
    prose_lines(content, FenceMode::Respect)
        .flat_map(|line| {
            check_line_for_issues(line.text, false)
                .into_iter()
                .map(move |(text, target)| {
                    LinkIssue::link_text(path.to_owned(), line.number, &text, &target)
                })
        })
        .collect()
}
