//! Homepage-Harvest main entry point
//!
//! This is the command-line interface for the Homepage-Harvest site crawler.

use anyhow::{Context, Result};
use clap::Parser;
use homepage_harvest::config::{read_config_with_hash, validate, Config};
use homepage_harvest::crawler::{build_exclusions, Coordinator};
use homepage_harvest::input::{load_missing_candidates, Candidate};
use homepage_harvest::normalize_url;
use homepage_harvest::output::{print_statistics, JsonDirectoryOutput};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Homepage-Harvest: a polite candidate website scraper
///
/// Homepage-Harvest reads a candidate list, skips candidates that already
/// have results, and crawls each remaining homepage breadth-first on its own
/// host. The visible text of every page is saved to one JSON file per
/// candidate.
#[derive(Parser, Debug)]
#[command(name = "homepage-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite candidate website scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// CSV file listing candidates
    #[arg(long, value_name = "PATH")]
    candidates_csv: Option<PathBuf>,

    /// Directory results are written to
    #[arg(long, value_name = "DIR")]
    json_dir: Option<PathBuf>,

    /// Comma-separated directories checked for existing results
    #[arg(long, value_name = "DIRS")]
    json_dirs: Option<String>,

    /// Maximum pages collected per site
    #[arg(long)]
    max_pages: Option<usize>,

    /// Seconds between requests to the same domain
    #[arg(long)]
    delay: Option<f64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Do not fetch or obey robots.txt
    #[arg(long)]
    ignore_robots: bool,

    /// File with one URL exclusion regex per line
    #[arg(long, value_name = "PATH")]
    exclude_file: Option<PathBuf>,

    /// Process at most this many candidates
    #[arg(long)]
    limit: Option<usize>,

    /// Number of candidates crawled in parallel
    #[arg(long)]
    workers: Option<usize>,

    /// Preset for quick passes: 15 pages, 0.3s delay, 6 workers
    #[arg(long)]
    fast: bool,

    /// List the candidates that would be crawled and exit
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.candidates_csv {
            config.input.candidates_csv = path.clone();
        }
        if let Some(dir) = &self.json_dir {
            config.output.json_dir = dir.clone();
        }
        if let Some(dirs) = &self.json_dirs {
            config.input.json_dirs = dirs
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(delay) = self.delay {
            config.crawler.delay_seconds = delay;
        }
        if let Some(timeout) = self.timeout {
            config.crawler.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent.name = user_agent.clone();
        }
        if self.ignore_robots {
            config.crawler.respect_robots = false;
        }
        if let Some(path) = &self.exclude_file {
            config.crawler.exclude_file = Some(path.clone());
        }
        if self.limit.is_some() {
            config.run.limit = self.limit;
        }
        if let Some(workers) = self.workers {
            config.run.workers = workers;
        }
        if self.fast {
            config.apply_fast_preset();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    let exclude = build_exclusions(&config.crawler).context("Failed to load exclusion patterns")?;
    let candidates = load_missing_candidates(
        &config.input.candidates_csv,
        &config.input.json_dirs,
        config.run.limit,
    )
    .context("Failed to select candidates")?;

    if cli.dry_run {
        handle_dry_run(&config, &candidates);
        return Ok(());
    }

    handle_harvest(config, exclude, candidates).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("homepage_harvest=info,warn"),
            1 => EnvFilter::new("homepage_harvest=debug,info"),
            2 => EnvFilter::new("homepage_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: lists the selected candidates without crawling
fn handle_dry_run(config: &Config, candidates: &[Candidate]) {
    println!("=== Homepage-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages per site: {}", config.crawler.max_pages);
    println!("  Delay: {}s", config.crawler.delay_seconds);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);
    println!("  User agent: {}", config.user_agent.name);
    println!("  Workers: {}", config.run.workers);
    println!("  Output: {}", config.output.json_dir.display());

    println!("\nCandidates ({}):", candidates.len());
    for candidate in candidates {
        let homepage = candidate
            .homepage_url
            .as_deref()
            .and_then(normalize_url)
            .unwrap_or_else(|| "(no homepage_url)".to_string());
        println!(
            "  - {} {} -> {}",
            candidate.person_id,
            candidate.display_name(),
            homepage
        );
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    exclude: Vec<regex::Regex>,
    candidates: Vec<Candidate>,
) -> Result<()> {
    let output = JsonDirectoryOutput::new(&config.output.json_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output.json_dir.display()
        )
    })?;

    let coordinator = Coordinator::new(config, exclude, Arc::new(output))?;

    let interrupt = coordinator.interrupt_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after current requests");
            interrupt.store(true, Ordering::Relaxed);
        }
    });

    let stats = coordinator.run(&candidates).await;
    tracing::info!("Harvest finished");
    print_statistics(&stats);

    Ok(())
}
