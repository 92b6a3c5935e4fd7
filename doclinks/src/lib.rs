//! # doclinks
//!
//! Markdown documentation link checks and a source-link rewriting hook.
//!
//! - **Link text**: links to markdown documents must use readable text, not
//!   the raw file name or a path.
//! - **Encoding**: relative link targets must not contain raw spaces or `+`.
//! - **Rewrite**: repository-relative source links become absolute hosting
//!   URLs at documentation build time, with code left untouched.
//!
//! The per-document checks are input-agnostic; [`lint_fs`] drives them over
//! files on disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doclinks::{FsSourceConfig, ScanConfig, lint_fs};
//!
//! let fs_config = FsSourceConfig::for_root("docs");
//! let report = lint_fs(&fs_config, &ScanConfig::default()).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Issues: {}", report.issues_count());
//! std::process::exit(report.exit_code());
//! ```
//!
//! ```rust
//! use doclinks::{LinkRewriter, RewriteConfig};
//!
//! let rewriter = LinkRewriter::new(RewriteConfig::default());
//! let out = rewriter.rewrite("[Core](Runtime/Core)");
//! assert_eq!(out, "[Core](https://github.com/wallstop/DxMessaging/tree/master/Runtime/Core)");
//! ```

mod config;
mod error;
pub mod fence;
pub mod lines;
pub mod mask;
pub mod output;
mod report;
pub mod rewrite;
pub mod scan;
mod strategy;

use std::path::Path;

use tracing::{debug, info};

pub use config::{
    DEFAULT_SKIP_DIRS, DEFAULT_SOURCE_PREFIXES, FsSourceConfig, RewriteConfig, ScanConfig,
};
pub use error::{IssueKind, LinkIssue, ReadError, SkipReason, SkippedFile};
pub use fence::FenceState;
pub use lines::FenceMode;
pub use mask::CodeMask;
pub use report::LintReport;
pub use rewrite::{LinkRewriter, SourceLinkHook};
pub use scan::encoding::scan_encoding;
pub use scan::link_text::scan_link_text;

use strategy::fs::{find_files, read_file_bounded};

/// Run the configured checks over one document held in memory.
#[must_use]
pub fn lint_content(content: &str, path: &Path, scan_config: &ScanConfig) -> Vec<LinkIssue> {
    let mut issues = Vec::new();
    if scan_config.check_link_text {
        issues.extend(scan_link_text(content, path));
    }
    if scan_config.check_encoding {
        issues.extend(scan_encoding(content, path, scan_config.encoding_fence_mode));
    }
    issues
}

/// Lint markdown files on disk.
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty or if any provided path does
/// not exist. Files that cannot be read are skipped and listed in
/// `report.skipped`; they never fail the run.
pub fn lint_fs(fs_config: &FsSourceConfig, scan_config: &ScanConfig) -> anyhow::Result<LintReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for linting");
    }

    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, mut skipped) = find_files(fs_config);
    let mut issues = Vec::new();
    let mut scanned_files: usize = 0;
    let mut skipped_files: usize = 0;

    for file_path in &files {
        let content = match read_file_bounded(file_path, fs_config.max_file_size) {
            Ok(c) => c,
            Err(e) => {
                info!(file = %file_path.display(), error = %e, "skipping unreadable file");
                skipped.push(SkippedFile::new(file_path.clone(), e.reason(), e.to_string()));
                skipped_files += 1;
                continue;
            }
        };

        let file_issues = lint_content(&content, file_path, scan_config);
        debug!(file = %file_path.display(), issues = file_issues.len(), "scanned");
        issues.extend(file_issues);
        scanned_files += 1;
    }

    info!(
        scanned = scanned_files,
        skipped = skipped_files,
        issues = issues.len(),
        "lint finished"
    );

    Ok(LintReport {
        scanned_files,
        skipped_files,
        ok: issues.is_empty(),
        issues,
        skipped,
    })
}
