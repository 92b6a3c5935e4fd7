use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use doclinks::{FenceMode, FsSourceConfig, LinkRewriter, LintReport, RewriteConfig, ScanConfig};
use tracing::{debug, info};

use crate::logging;

#[derive(Parser)]
#[command(name = "doclinks", version, about = "Markdown documentation link checks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag links whose text is a raw file name or path
    Links {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Flag raw spaces and '+' in relative link targets
    Encoding {
        #[command(flatten)]
        scan: ScanArgs,

        /// Skip fenced code blocks (by default they are checked too)
        #[arg(long)]
        respect_fences: bool,
    },

    /// Run both the link-text and the encoding check
    Check {
        #[command(flatten)]
        scan: ScanArgs,

        /// Skip fenced code blocks in the encoding check
        #[arg(long)]
        respect_fences: bool,
    },

    /// Rewrite repository-relative source links to absolute hosting URLs
    Rewrite(RewriteArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Directory or markdown file to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Glob pattern to exclude (matched against the path and the file name)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Directory name to skip; replaces the default list when given
    #[arg(long = "skip-dir", value_name = "NAME")]
    skip_dirs: Vec<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_links: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// List files that could not be read on stderr
    #[arg(long)]
    show_skipped: bool,
}

#[derive(Args)]
struct RewriteArgs {
    /// Markdown file to rewrite; reads stdin when omitted or '-'
    input: Option<PathBuf>,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long, requires = "input")]
    in_place: bool,

    /// Repository base URL
    #[arg(long)]
    repo_url: Option<String>,

    /// Branch used in generated URLs
    #[arg(long)]
    branch: Option<String>,

    /// Source-root prefix to rewrite; replaces the default list when given
    #[arg(long = "prefix", value_name = "PREFIX")]
    prefixes: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// Parse arguments, run the command and return the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Links { scan } => run_scan(&scan, &ScanConfig::link_text_only()),
        Commands::Encoding {
            scan,
            respect_fences,
        } => run_scan(
            &scan,
            &ScanConfig::encoding_only(fence_mode(respect_fences)),
        ),
        Commands::Check {
            scan,
            respect_fences,
        } => {
            let mut config = ScanConfig::default();
            config.encoding_fence_mode = fence_mode(respect_fences);
            run_scan(&scan, &config)
        }
        Commands::Rewrite(args) => run_rewrite(&args).map(|()| 0),
    }
}

fn fence_mode(respect_fences: bool) -> FenceMode {
    if respect_fences {
        FenceMode::Respect
    } else {
        FenceMode::Ignore
    }
}

fn run_scan(args: &ScanArgs, scan_config: &ScanConfig) -> Result<i32> {
    let mut fs_config = FsSourceConfig::for_root(&args.root);
    fs_config.exclude.clone_from(&args.exclude);
    fs_config.follow_links = args.follow_links;
    if !args.skip_dirs.is_empty() {
        fs_config.skip_dirs.clone_from(&args.skip_dirs);
    }

    let report = doclinks::lint_fs(&fs_config, scan_config)?;

    match args.format {
        OutputFormat::Json => {
            doclinks::output::write_json(&report, &mut std::io::stdout().lock())?;
        }
        OutputFormat::Human => write_human_report(&report, args.show_skipped)?,
    }

    Ok(report.exit_code())
}

fn write_human_report(report: &LintReport, show_skipped: bool) -> Result<()> {
    doclinks::output::write_human(report, &mut std::io::stdout().lock())?;

    let mut stderr = std::io::stderr().lock();
    if show_skipped {
        let mut buf = Vec::new();
        doclinks::output::write_skipped(report, &mut buf)?;
        write!(stderr, "{}", String::from_utf8_lossy(&buf).dimmed())?;
    }

    if !report.ok {
        let mut buf = Vec::new();
        doclinks::output::write_summary(report, &mut buf)?;
        write!(stderr, "{}", String::from_utf8_lossy(&buf).yellow())?;
    }
    Ok(())
}

fn rewrite_config(args: &RewriteArgs) -> RewriteConfig {
    let mut config = RewriteConfig::default();
    if let Some(repo_url) = &args.repo_url {
        config.repo_url.clone_from(repo_url);
    }
    if let Some(branch) = &args.branch {
        config.branch.clone_from(branch);
    }
    if !args.prefixes.is_empty() {
        config.source_prefixes.clone_from(&args.prefixes);
    }
    config
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read markdown from stdin")?;
            Ok(content)
        }
    }
}

fn run_rewrite(args: &RewriteArgs) -> Result<()> {
    let rewriter = LinkRewriter::new(rewrite_config(args));
    let markdown = read_input(args.input.as_deref())?;
    let rewritten = rewriter.rewrite(&markdown);
    debug!(changed = rewritten != markdown, "rewrite finished");

    let destination = if args.in_place {
        args.input.as_deref().filter(|p| *p != Path::new("-"))
    } else {
        args.output.as_deref()
    };

    match destination {
        Some(path) => {
            std::fs::write(path, &rewritten)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(file = %path.display(), "wrote rewritten markdown");
        }
        None if args.in_place => anyhow::bail!("--in-place needs a file argument, not stdin"),
        None => std::io::stdout().lock().write_all(rewritten.as_bytes())?,
    }
    Ok(())
}
