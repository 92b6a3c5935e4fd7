//! Filesystem document source.
//!
//! Discovers markdown files on disk and reads them for the checks.
//! - Configured directory names are pruned during the walk, never descended
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Maximum directory depth is enforced
//! - Reads are bounded by `max_file_size`
//!
//! Nothing here is fatal: unreadable entries become [`SkippedFile`] records.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ReadError, SkipReason, SkippedFile};

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Whether a file has a markdown extension, in any letter case.
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

/// Find all markdown files to scan in the configured paths.
///
/// Returns `(files, skipped)`: walk errors and bad exclude patterns land in
/// `skipped` instead of aborting the run.
#[must_use]
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<SkippedFile>) {
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => skipped.push(SkippedFile::new(
                PathBuf::from(pat_str),
                SkipReason::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }

    // The root itself is never pruned, even if its name is in `skip_dirs`.
    let is_not_skip_dir = |entry: &walkdir::DirEntry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || entry
                .file_name()
                .to_str()
                .is_none_or(|name| !config.skip_dirs.iter().any(|d| d == name))
    };

    for root in &config.paths {
        if root.is_file() {
            if is_markdown_file(root) && !matches_exclude(root, &exclude_patterns) {
                files.push(root.clone());
            }
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    skipped.push(SkippedFile::new(
                        path,
                        SkipReason::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !entry.file_type().is_file()
                || !is_markdown_file(file_path)
                || matches_exclude(file_path, &exclude_patterns)
            {
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "discovered markdown files");
    (files, skipped)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns [`ReadError`] if the file cannot be read, exceeds `max_file_size`
/// or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ReadError> {
    let file = std::fs::File::open(path)?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)?;

    if buffer.len() as u64 > max_file_size {
        return Err(ReadError::TooLarge { max: max_file_size });
    }

    String::from_utf8(buffer).map_err(|_| ReadError::InvalidEncoding)
}
