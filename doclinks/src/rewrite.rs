//! Source-link rewriting for documentation builds.
//!
//! Docs link to source files with repository-relative paths so they read well
//! in an editor preview (`[MessageBus](Runtime/Core/MessageBus.cs)`). At build
//! time those links are turned into absolute URLs on the hosting service:
//!
//! - files:       `<repo_url>/blob/<branch>/<path>`
//! - directories: `<repo_url>/tree/<branch>/<path>`
//!
//! Links inside fenced blocks or inline code are left exactly as written.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::config::RewriteConfig;
use crate::mask::CodeMask;

/// `[text](url)`; group 1 is the display text, group 2 the URL.
static MARKDOWN_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"\[([^\]]+)\]\(([^)]+)\)") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid markdown link regex: {err}"),
    }
});

/// Kind of object a source path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl PathKind {
    /// Classify by shape: a trailing `/`, or no `.` in the last segment, means
    /// a directory.
    #[must_use]
    pub fn of(path: &str) -> Self {
        if path.ends_with('/') {
            return Self::Directory;
        }
        let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
        if last.contains('.') {
            Self::File
        } else {
            Self::Directory
        }
    }

    /// URL segment used by the hosting service.
    #[must_use]
    pub fn url_segment(self) -> &'static str {
        match self {
            Self::File => "blob",
            Self::Directory => "tree",
        }
    }
}

/// Percent-encode each `/`-separated component, keeping the separators.
#[must_use]
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|component| urlencoding::encode(component).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Rewrites repository-relative source links to absolute hosting URLs.
#[derive(Debug, Clone, Default)]
pub struct LinkRewriter {
    config: RewriteConfig,
}

impl LinkRewriter {
    #[must_use]
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Whether `url` starts with one of the configured source prefixes.
    #[must_use]
    pub fn is_source_link(&self, url: &str) -> bool {
        self.config
            .source_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    /// Absolute hosting URL for a source path.
    #[must_use]
    pub fn source_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.repo_url.trim_end_matches('/'),
            PathKind::of(path).url_segment(),
            self.config.branch,
            encode_path(path)
        )
    }

    /// Rewrite every source link in `markdown`, leaving code untouched.
    #[must_use]
    pub fn rewrite(&self, markdown: &str) -> String {
        CodeMask::scoped(markdown, |masked| self.rewrite_links(masked))
    }

    fn rewrite_links(&self, masked: &str) -> String {
        MARKDOWN_LINK_PATTERN
            .replace_all(masked, |caps: &Captures<'_>| {
                let url = &caps[2];
                if !self.is_source_link(url) {
                    return caps[0].to_owned();
                }
                let rewritten = self.source_url(url);
                trace!(from = url, to = %rewritten, "rewrote source link");
                format!("[{}]({rewritten})", &caps[1])
            })
            .into_owned()
    }
}

/// Page-level hook for a static documentation build.
///
/// The page, site config and file collection are whatever the build tool
/// passes around; the hook only needs the markdown.
#[derive(Debug, Clone, Default)]
pub struct SourceLinkHook {
    rewriter: LinkRewriter,
}

impl SourceLinkHook {
    #[must_use]
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            rewriter: LinkRewriter::new(config),
        }
    }

    /// Transform one page's markdown before it is rendered.
    #[must_use]
    pub fn on_page_markdown<P, C, F>(
        &self,
        markdown: &str,
        _page: &P,
        _config: &C,
        _files: &F,
    ) -> String
    where
        P: ?Sized,
        C: ?Sized,
        F: ?Sized,
    {
        self.rewriter.rewrite(markdown)
    }
}
