//! Shared output formatting for lint reports.
//!
//! Issue lines go to one writer (stdout in the CLI) and the summary to
//! another (stderr), so the issue stream stays machine-friendly. Color is the
//! CLI's concern.

use std::io::Write;

use crate::report::LintReport;

/// Format a `LintReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &LintReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write one `<path>:<line>: <message>` line per issue.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &LintReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for issue in &report.issues {
        writeln!(writer, "{}", issue.format_human_readable())?;
    }
    Ok(())
}

/// Write the trailing summary and remediation hints. Writes nothing when the
/// report is clean.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary(report: &LintReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let link_text = report.link_text_count();
    if link_text > 0 {
        writeln!(
            writer,
            "Found {link_text} documentation link(s) with non-human-readable text."
        )?;
        writeln!(writer, "Use a descriptive phrase instead of the raw file name.")?;
    }

    let encoding = report.encoding_count();
    if encoding > 0 {
        writeln!(
            writer,
            "Found {encoding} markdown link(s) with unencoded spaces or plus signs."
        )?;
        writeln!(
            writer,
            "Please URL-encode spaces as %20 and '+' as %2B in relative links."
        )?;
    }
    Ok(())
}

/// Write one line per skipped file.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_skipped(report: &LintReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for skipped in &report.skipped {
        writeln!(writer, "{}", skipped.format_human_readable())?;
    }
    Ok(())
}
