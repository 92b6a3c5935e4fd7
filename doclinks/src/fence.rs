//! Fenced code block tracking for line-by-line markdown scanning.
//!
//! Only backtick fences are tracked. A block opened with N backticks is closed
//! by a line consisting of exactly those N backticks; fences of any other
//! length inside the block are ordinary content, so a four-backtick block can
//! show a complete three-backtick example without ending early.

/// Minimum run of backticks that opens a fenced block.
pub const MIN_FENCE_LEN: usize = 3;

/// Per-document fence state. Reset for every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceState {
    marker: Option<String>,
}

impl FenceState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scanner is currently inside a fenced block.
    #[must_use]
    pub fn in_block(&self) -> bool {
        self.marker.is_some()
    }

    /// The backtick run that opened the current block, if any.
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Feed one line into the state machine.
    ///
    /// Returns `true` when the line itself opened or closed a block.
    pub fn advance(&mut self, line: &str) -> bool {
        let (_, marker, is_fence) = advance(line, self.in_block(), self.marker.as_deref());
        self.marker = marker;
        is_fence
    }
}

/// Pure form of [`FenceState::advance`].
///
/// Takes the current `(in_block, opening_marker)` pair and returns
/// `(new_in_block, new_opening_marker, is_fence_line)`.
#[must_use]
pub fn advance(
    line: &str,
    in_block: bool,
    opening_marker: Option<&str>,
) -> (bool, Option<String>, bool) {
    let stripped = line.trim_start();

    if in_block {
        if let Some(marker) = opening_marker
            && stripped.starts_with(marker)
            && stripped.trim() == marker
        {
            return (false, None, true);
        }
        return (true, opening_marker.map(str::to_owned), false);
    }

    let run = stripped.bytes().take_while(|&b| b == b'`').count();
    if run >= MIN_FENCE_LEN {
        return (true, Some("`".repeat(run)), true);
    }

    (false, None, false)
}
