//! Per-document link checks.
//!
//! - `link_text` - link text that is a raw file name or path
//! - `encoding` - raw spaces and `+` in relative link targets

use std::borrow::Cow;

pub mod encoding;
pub mod link_text;

/// Scheme prefixes that mark a target as external.
pub const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:", "data:"];

/// Whether `target` points outside the repository.
#[must_use]
pub fn is_external(target: &str) -> bool {
    EXTERNAL_PREFIXES
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

/// Drop everything from the first `?` or `#` onwards.
#[must_use]
pub fn strip_query_and_fragment(target: &str) -> &str {
    target
        .find(['?', '#'])
        .map_or(target, |idx| &target[..idx])
}

/// Percent-decode a target, falling back to the raw string on malformed input.
#[must_use]
pub fn percent_decode(target: &str) -> Cow<'_, str> {
    urlencoding::decode(target).unwrap_or(Cow::Borrowed(target))
}
