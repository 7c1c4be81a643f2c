use serde::Deserialize;
use std::path::PathBuf;

/// Default number of pages collected per site
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Default spacing between requests to one domain (seconds)
pub const DEFAULT_DELAY_SECONDS: f64 = 1.0;

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = "CandidateWebsiteScraper/1.0";

/// Default number of candidates crawled in parallel
pub const DEFAULT_WORKERS: usize = 4;

/// Main configuration structure for Homepage-Harvest
///
/// Every field has a default, so an empty TOML file (or no file at all) yields
/// a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub run: RunConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages with text collected per site
    pub max_pages: usize,

    /// Minimum time between requests to the same domain (seconds, <= 0 disables)
    pub delay_seconds: f64,

    /// Per-request network timeout (seconds)
    pub timeout_seconds: u64,

    /// Whether robots.txt is fetched and enforced
    pub respect_robots: bool,

    /// Regular expressions; URLs matching any of them are never fetched
    pub exclude_patterns: Vec<String>,

    /// File with one exclusion pattern per line
    pub exclude_file: Option<PathBuf>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            delay_seconds: DEFAULT_DELAY_SECONDS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            respect_robots: true,
            exclude_patterns: Vec::new(),
            exclude_file: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Sent on every request and used for robots.txt queries
    pub name: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Candidate input configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InputConfig {
    /// CSV file with `person_id`, `person_name`, `homepage_url` columns
    pub candidates_csv: PathBuf,

    /// Directories scanned for already produced result files
    pub json_dirs: Vec<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            candidates_csv: PathBuf::from("assets/data/candidates.csv"),
            json_dirs: vec![
                PathBuf::from("assets/json"),
                PathBuf::from("assets/large_json"),
            ],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory that receives one JSON file per crawled candidate
    pub json_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_dir: PathBuf::from("assets/json"),
        }
    }
}

/// Run-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of candidates crawled concurrently
    pub workers: usize,

    /// Maximum number of candidates processed this run
    pub limit: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            limit: None,
        }
    }
}

impl Config {
    /// Applies the `--fast` preset: fewer pages, shorter delay, more workers
    pub fn apply_fast_preset(&mut self) {
        self.crawler.max_pages = 15;
        self.crawler.delay_seconds = 0.3;
        self.run.workers = 6;
    }
}
