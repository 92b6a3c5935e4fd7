//! Configuration types for doclinks.
//!
//! Split into check config (what to look for), rewrite config (where source
//! links point) and source-specific config (how files are discovered), so the
//! core checks never see filesystem concerns.

use std::path::PathBuf;

use crate::lines::FenceMode;

/// Directory names pruned from traversal by default.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "node_modules", ".vs", ".vscode", "Library", "Temp"];

/// Source-root prefixes rewritten by default.
pub const DEFAULT_SOURCE_PREFIXES: &[&str] = &["Runtime/", "Tests/", "Editor/", "Samples~/"];

/// Which checks run over each document.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Report links whose text is a raw file name or path.
    pub check_link_text: bool,
    /// Report raw spaces and `+` in relative link targets.
    pub check_encoding: bool,
    /// Fence handling for the encoding check.
    ///
    /// Defaults to [`FenceMode::Ignore`]: encoding problems are reported even
    /// inside fenced code, matching the behaviour existing CI jobs rely on.
    pub encoding_fence_mode: FenceMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            check_link_text: true,
            check_encoding: true,
            encoding_fence_mode: FenceMode::Ignore,
        }
    }
}

impl ScanConfig {
    /// Only the link-text check.
    #[must_use]
    pub fn link_text_only() -> Self {
        Self {
            check_encoding: false,
            ..Self::default()
        }
    }

    /// Only the encoding check.
    #[must_use]
    pub fn encoding_only(fence_mode: FenceMode) -> Self {
        Self {
            check_link_text: false,
            check_encoding: true,
            encoding_fence_mode: fence_mode,
        }
    }
}

/// Where rewritten source links point.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RewriteConfig {
    /// Repository base URL, without a trailing slash.
    pub repo_url: String,
    /// Branch name placed after `tree/` or `blob/`.
    pub branch: String,
    /// Link targets starting with one of these are rewritten.
    pub source_prefixes: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/wallstop/DxMessaging".to_owned(),
            branch: "master".to_owned(),
            source_prefixes: DEFAULT_SOURCE_PREFIXES
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the
    /// file name.
    pub exclude: Vec<String>,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB). Larger files are skipped.
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| (*d).to_owned()).collect(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}

impl FsSourceConfig {
    /// Default options rooted at `root`.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![root.into()],
            ..Self::default()
        }
    }
}
