use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Map the `-v` count onto a log level.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// issues (or rewritten markdown).
pub fn init(verbose: u8) {
    let use_colors = std::io::stderr().is_terminal();
    colored::control::set_override(use_colors);

    // A second init (e.g. from tests) keeps the first subscriber.
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level_for(verbose)))
        .with_writer(std::io::stderr)
        .with_ansi(use_colors)
        .with_target(false)
        .try_init()
    {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}
