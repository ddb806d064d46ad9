use anyhow::{Context as AnyhowContext, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use vendorfix_core::{
    build_fallback_sequence, parse_manifest, process_manifest, sync_all, FixReport,
    GovendorCli, VendorFixError, VendorTool, BRANCH_MASTER, DEFAULT_GOVENDOR,
};

mod flags;

/// Repository prefix used when `-rep` is not given.
pub const DEFAULT_REPO: &str = "github.com/coldze";

/// Environment override for the vendoring program.
pub const GOVENDOR_ENV: &str = "VENDORFIX_GOVENDOR";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "vendorfix")]
#[command(about = "Re-pin vendored packages of a repository to a branch", long_about = None)]
#[command(version)]
struct Cli {
    /// Working dir (full path) holding vendor/vendor.json
    #[arg(long)]
    path: Option<String>,

    /// Source branch; falls back through develop, stage and master
    #[arg(long, default_value = BRANCH_MASTER)]
    branch: String,

    /// Repository path filter (case-insensitive substring of the import path)
    #[arg(long, default_value = DEFAULT_REPO)]
    rep: String,

    /// Vendoring program (overrides VENDORFIX_GOVENDOR, default: govendor)
    #[arg(long)]
    govendor: Option<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub root: PathBuf,
    pub branch: String,
    pub repo: String,
    pub govendor: String,
}

impl RunConfig {
    fn from_cli(cli: &Cli) -> std::result::Result<Self, VendorFixError> {
        let root = cli
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| VendorFixError::Config("Working dir not specified".to_string()))?;
        if cli.branch.is_empty() {
            return Err(VendorFixError::Config("Branch not specified".to_string()));
        }
        if cli.rep.is_empty() {
            return Err(VendorFixError::Config(
                "Repository not specified".to_string(),
            ));
        }
        let govendor = cli
            .govendor
            .clone()
            .or_else(|| env::var(GOVENDOR_ENV).ok())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOVENDOR.to_string());

        Ok(Self {
            root,
            branch: cli.branch.clone(),
            repo: cli.rep.clone(),
            govendor,
        })
    }
}

/// Load the manifest, fix every matching package, then sync once.
///
/// Only manifest and sync failures are returned; per-package failures end up
/// in the report.
pub fn run(config: &RunConfig, tool: &dyn VendorTool) -> Result<FixReport> {
    let manifest = parse_manifest(&config.root).with_context(|| {
        format!(
            "Failed to parse vendor. Directory: {}",
            config.root.display()
        )
    })?;

    let branches = build_fallback_sequence(&config.branch);
    let mut report = process_manifest(&manifest, &config.repo, &branches, &config.root, tool);
    log::info!(
        "Fixed {} of {} matching packages ({} fetch failures, {} removal failures, {} skipped)",
        report.fixed(),
        report.matched(),
        report.fetch_failed(),
        report.removal_failed(),
        report.skipped()
    );

    sync_all(tool).context("Failed to sync sources")?;
    report.mark_synced();
    Ok(report)
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || cli.json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn enter_workdir(path: &Path) -> Result<PathBuf> {
    env::set_current_dir(path)
        .with_context(|| format!("Failed to change dir to '{}'", path.display()))?;
    env::current_dir().context("Failed to resolve working dir")
}

pub fn main_entry() -> Result<()> {
    let args = flags::normalize_long_flags(env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(1);
            }
        },
    };

    init_logging(&cli);

    let mut config = RunConfig::from_cli(&cli)?;
    config.root = enter_workdir(&config.root)?;
    log::debug!(
        "Working dir {}, branch '{}', repo '{}', tool '{}'",
        config.root.display(),
        config.branch,
        config.repo,
        config.govendor
    );

    let tool = GovendorCli::new(config.govendor.clone(), config.root.clone());
    let report = run(&config, &tool)?;

    if cli.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}
