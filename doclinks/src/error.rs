//! Issue and skip types produced by a lint run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueKind {
    /// Link text is a raw file name or path.
    LinkText,
    /// An inline link or image target contains a raw space or `+`.
    UnencodedTarget,
    /// A reference-style definition target contains a raw space or `+`.
    UnencodedDefinition,
}

/// A single flagged link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct LinkIssue {
    /// File the link was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    pub kind: IssueKind,
    /// Display text of the link; empty for reference definitions.
    pub text: String,
    /// The raw, undecoded link target.
    pub target: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl LinkIssue {
    #[must_use]
    pub fn link_text(file: PathBuf, line: usize, text: &str, target: &str) -> Self {
        Self {
            file,
            line,
            kind: IssueKind::LinkText,
            text: text.to_owned(),
            target: target.to_owned(),
            message: format!(
                "Link text '{text}' should be human-readable, not a raw file name or path (target: {target})"
            ),
        }
    }

    #[must_use]
    pub fn unencoded(file: PathBuf, line: usize, kind: IssueKind, text: &str, target: &str) -> Self {
        let what = if kind == IssueKind::UnencodedDefinition {
            "link definition"
        } else {
            "link target"
        };
        Self {
            file,
            line,
            kind,
            text: text.to_owned(),
            target: target.to_owned(),
            message: format!(
                "Unencoded character(s) in {what}: '{target}'. Encode spaces as %20 and '+' as %2B."
            ),
        }
    }

    /// Format the issue as `{file}:{line}: {message}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}:{}: {}", self.file.display(), self.line, self.message)
    }
}

/// Why a discovered file was not scanned.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SkipReason {
    IoError,
    FileTooLarge,
    InvalidEncoding,
    WalkError,
    InvalidExcludePattern,
}

/// A file the run could not scan. Skips never affect the exit status.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct SkippedFile {
    pub file: PathBuf,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedFile {
    #[must_use]
    pub fn new(file: PathBuf, reason: SkipReason, message: String) -> Self {
        Self {
            file,
            reason,
            message,
        }
    }

    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [skipped] {}", self.file.display(), self.message)
    }
}

/// Failure while reading a single document.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("File exceeds maximum size of {max} bytes")]
    TooLarge { max: u64 },

    #[error("File is not valid UTF-8")]
    InvalidEncoding,
}

impl ReadError {
    #[must_use]
    pub fn reason(&self) -> SkipReason {
        match self {
            Self::Io(_) => SkipReason::IoError,
            Self::TooLarge { .. } => SkipReason::FileTooLarge,
            Self::InvalidEncoding => SkipReason::InvalidEncoding,
        }
    }
}
