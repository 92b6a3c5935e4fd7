//! Lint report types.

use serde::Serialize;

use crate::error::{IssueKind, LinkIssue, SkippedFile};

/// Result of a lint run.
///
/// `ok` reflects issues only. Skipped files are listed for visibility but do
/// not fail the run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct LintReport {
    /// Number of files successfully read and checked.
    pub scanned_files: usize,
    /// Number of discovered files that could not be read.
    pub skipped_files: usize,
    /// Whether no issues were found.
    pub ok: bool,
    /// Flagged links, grouped by file in scan order.
    pub issues: Vec<LinkIssue>,
    /// Files and walk entries that were skipped, with the reason.
    pub skipped: Vec<SkippedFile>,
}

impl LintReport {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scanned_files: 0,
            skipped_files: 0,
            ok: true,
            issues: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of issues found.
    #[must_use]
    pub fn issues_count(&self) -> usize {
        self.issues.len()
    }

    /// Number of link-text issues.
    #[must_use]
    pub fn link_text_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::LinkText)
            .count()
    }

    /// Number of encoding issues (inline targets and definitions).
    #[must_use]
    pub fn encoding_count(&self) -> usize {
        self.issues_count() - self.link_text_count()
    }

    /// Process exit status for this report: 1 if any issue was found.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.ok)
    }
}
