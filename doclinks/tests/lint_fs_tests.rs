#![allow(clippy::unwrap_used)]
//! Integration tests for `doclinks::lint_fs`.

use std::fs;
use std::path::PathBuf;

use doclinks::{FenceMode, FsSourceConfig, IssueKind, ScanConfig, SkipReason, lint_fs};
use tempfile::TempDir;

fn default_fs_config(paths: Vec<PathBuf>) -> FsSourceConfig {
    let mut cfg = FsSourceConfig::default();
    cfg.paths = paths;
    cfg
}

#[test]
fn test_lint_fs_empty_paths_errors() {
    let fs_config = default_fs_config(vec![]);
    let result = lint_fs(&fs_config, &ScanConfig::default());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("No paths provided"), "got: {msg}");
}

#[test]
fn test_lint_fs_nonexistent_path_errors() {
    let tmp = TempDir::new().unwrap();
    let fs_config = default_fs_config(vec![tmp.path().join("does_not_exist")]);
    let msg = lint_fs(&fs_config, &ScanConfig::default())
        .unwrap_err()
        .to_string();
    assert!(msg.contains("does not exist"), "got: {msg}");
}

#[test]
fn test_lint_fs_clean_docs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("README.md"),
        "# Project\n\nSee [the guide](docs/guide.md) and [the site](https://example.com).\n",
    )
    .unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert!(report.ok, "unexpected issues: {:?}", report.issues);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_lint_fs_reports_both_checks() {
    let tmp = TempDir::new().unwrap();
    let md = tmp.path().join("index.md");
    fs::write(
        &md,
        "# Index\n\nSee [README.md](README.md).\nAlso [the notes](my notes.md).\n",
    )
    .unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();
    assert!(!report.ok);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.issues_count(), 2);
    assert_eq!(report.issues[0].kind, IssueKind::LinkText);
    assert_eq!(report.issues[0].line, 3);
    assert_eq!(report.issues[0].file, md);
    assert_eq!(report.issues[1].kind, IssueKind::UnencodedTarget);
    assert_eq!(report.issues[1].line, 4);
}

#[test]
fn test_lint_fs_single_check_configs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("index.md"),
        "[README.md](README.md)\n[notes](a+b.md)\n",
    )
    .unwrap();
    let fs_config = FsSourceConfig::for_root(tmp.path());

    let links = lint_fs(&fs_config, &ScanConfig::link_text_only()).unwrap();
    assert_eq!(links.issues_count(), 1);
    assert_eq!(links.link_text_count(), 1);

    let encoding = lint_fs(&fs_config, &ScanConfig::encoding_only(FenceMode::Ignore)).unwrap();
    assert_eq!(encoding.issues_count(), 1);
    assert_eq!(encoding.encoding_count(), 1);
}

#[test]
fn test_lint_fs_encoding_fence_mode() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("index.md"),
        "```markdown\n[example](bad name.md)\n```\n",
    )
    .unwrap();
    let fs_config = FsSourceConfig::for_root(tmp.path());

    let ignoring = lint_fs(&fs_config, &ScanConfig::encoding_only(FenceMode::Ignore)).unwrap();
    assert_eq!(ignoring.issues_count(), 1);

    let respecting = lint_fs(&fs_config, &ScanConfig::encoding_only(FenceMode::Respect)).unwrap();
    assert!(respecting.ok);
}

#[test]
fn test_lint_fs_uppercase_extension_and_skip_dirs() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("NOTES.MD"), "[GUIDE.md](GUIDE.md)\n").unwrap();
    let modules = tmp.path().join("node_modules").join("pkg");
    fs::create_dir_all(&modules).unwrap();
    fs::write(modules.join("README.md"), "[README.md](README.md)\n").unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.issues_count(), 1);
    assert_eq!(report.issues[0].text, "GUIDE.md");
}

#[test]
fn test_lint_fs_exclude_pattern() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("keep.md"), "[the guide](guide.md)\n").unwrap();
    fs::write(tmp.path().join("CHANGELOG.md"), "[README.md](README.md)\n").unwrap();

    let mut fs_config = FsSourceConfig::for_root(tmp.path());
    let report_all = lint_fs(&fs_config, &ScanConfig::default()).unwrap();
    assert_eq!(report_all.scanned_files, 2);
    assert!(!report_all.ok);

    fs_config.exclude = vec!["CHANGELOG.md".to_owned()];
    let report = lint_fs(&fs_config, &ScanConfig::default()).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert!(report.ok);
}

#[test]
fn test_lint_fs_unreadable_file_is_skipped_not_failed() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("binary.md"), [0xFF, 0xFE, 0x00, 0x01, 0x80]).unwrap();
    fs::write(tmp.path().join("good.md"), "[the README](README.md)\n").unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.skipped_files, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidEncoding);
    assert!(report.ok, "skipped files must not fail the run");
}

#[test]
fn test_lint_fs_oversized_file_is_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("big.md"), "[README.md](README.md)\n").unwrap();

    let mut fs_config = FsSourceConfig::for_root(tmp.path());
    fs_config.max_file_size = 10;
    let report = lint_fs(&fs_config, &ScanConfig::default()).unwrap();
    assert_eq!(report.scanned_files, 0);
    assert_eq!(report.skipped_files, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::FileTooLarge);
    assert!(report.ok);
}

#[test]
fn test_lint_fs_json_output_contract() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.md"), "[A.md](A.md)\n").unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();
    let mut buf = Vec::new();
    doclinks::output::write_json(&report, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(json["scanned_files"], 1);
    assert_eq!(json["skipped_files"], 0);
    assert_eq!(json["ok"], false);
    assert_eq!(json["issues"][0]["kind"], "link_text");
    assert_eq!(json["issues"][0]["line"], 1);
    assert_eq!(json["issues"][0]["text"], "A.md");
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_write_human_and_summary() {
    let tmp = TempDir::new().unwrap();
    let md = tmp.path().join("a.md");
    fs::write(&md, "[A.md](A.md)\n[b](b+c.md)\n").unwrap();

    let report = lint_fs(&FsSourceConfig::for_root(tmp.path()), &ScanConfig::default()).unwrap();

    let mut out = Vec::new();
    doclinks::output::write_human(&report, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(&format!(
        "{}:1: Link text 'A.md' should be human-readable, not a raw file name or path (target: A.md)",
        md.display()
    )));
    assert!(out.contains(&format!(
        "{}:2: Unencoded character(s) in link target: 'b+c.md'. Encode spaces as %20 and '+' as %2B.",
        md.display()
    )));

    let mut err = Vec::new();
    doclinks::output::write_summary(&report, &mut err).unwrap();
    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("Use a descriptive phrase instead of the raw file name."));
    assert!(err.contains("Please URL-encode spaces as %20 and '+' as %2B in relative links."));
}
