//! Shared line traversal for the markdown scanners.

use crate::fence::FenceState;

/// Whether a traversal should skip fenced code blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum FenceMode {
    /// Skip fence lines and everything inside fenced blocks.
    #[default]
    Respect,
    /// Yield every line, including fenced code.
    Ignore,
}

/// A line selected for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProseLine<'a> {
    /// 1-indexed line number.
    pub number: usize,
    pub text: &'a str,
}

/// Iterate the lines of `content` that a scanner should look at.
pub fn prose_lines(content: &str, mode: FenceMode) -> impl Iterator<Item = ProseLine<'_>> {
    let mut fences = FenceState::new();
    content
        .lines()
        .enumerate()
        .filter_map(move |(idx, text)| {
            if mode == FenceMode::Respect && (fences.advance(text) || fences.in_block()) {
                return None;
            }
            Some(ProseLine {
                number: idx + 1,
                text,
            })
        })
}
