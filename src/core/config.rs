//! Configuration management for stemdex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Command-line flags are applied on top by the CLI.

use crate::core::error::{Result, StemdexError};
use crate::core::text::TextAnalyzer;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub threads: ThreadsConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// File indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// File patterns to include (glob syntax, case-insensitive)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Follow symbolic links while walking
    #[serde(default = "default_true")]
    pub follow_links: bool,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThreadsConfig {
    /// Worker threads used in threaded mode
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Web crawl configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    /// Maximum number of distinct pages scheduled per crawl
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum requests per page, redirects included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Prefix (partial) search instead of exact search
    #[serde(default = "default_true")]
    pub partial: bool,
}

/// Text analysis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextConfig {
    /// Snowball stemmer language, or "none" to disable stemming
    #[serde(default = "default_language")]
    pub language: String,
}

/// Export paths used when a flag is given without a value
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    #[serde(default = "default_counts_path")]
    pub counts_path: PathBuf,

    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
}

// Default value functions
fn default_include_patterns() -> Vec<String> {
    vec!["*.txt".to_string(), "*.text".to_string()]
}

fn default_max_file_size() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_workers() -> usize {
    5
}

fn default_limit() -> usize {
    50
}

fn default_max_attempts() -> usize {
    3
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("stemdex/{}", env!("CARGO_PKG_VERSION"))
}

fn default_language() -> String {
    "english".to_string()
}

fn default_index_path() -> PathBuf {
    PathBuf::from("index.json")
}

fn default_counts_path() -> PathBuf {
    PathBuf::from("counts.json")
}

fn default_results_path() -> PathBuf {
    PathBuf::from("results.json")
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            include_patterns: default_include_patterns(),
            exclude_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
            follow_links: true,
        }
    }
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            max_attempts: default_max_attempts(),
            timeout_sec: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CrawlConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { partial: true }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            counts_path: default_counts_path(),
            results_path: default_results_path(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            StemdexError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. STEMDEX_CONFIG env var
    /// 2. XDG config file (~/.config/stemdex/config.toml)
    /// 3. ./stemdex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        xdg.log_paths();

        let mut config = if let Ok(config_path) = env::var("STEMDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("stemdex.toml").exists() {
                Self::from_file("stemdex.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|v| v.trim().parse().ok())
        }

        if let Some(size) = parsed("STEMDEX_MAX_FILE_SIZE_MB") {
            self.indexing.max_file_size_mb = size;
        }
        if let Some(follow) = parsed("STEMDEX_FOLLOW_LINKS") {
            self.indexing.follow_links = follow;
        }

        if let Some(workers) = parsed("STEMDEX_THREADS") {
            self.threads.workers = workers;
        }

        if let Some(limit) = parsed("STEMDEX_CRAWL_LIMIT") {
            self.crawl.limit = limit;
        }
        if let Some(attempts) = parsed("STEMDEX_MAX_ATTEMPTS") {
            self.crawl.max_attempts = attempts;
        }
        if let Some(timeout) = parsed("STEMDEX_TIMEOUT_SEC") {
            self.crawl.timeout_sec = timeout;
        }
        if let Ok(agent) = env::var("STEMDEX_USER_AGENT") {
            self.crawl.user_agent = agent;
        }

        if let Some(partial) = parsed("STEMDEX_PARTIAL") {
            self.search.partial = partial;
        }

        if let Ok(language) = env::var("STEMDEX_LANGUAGE") {
            self.text.language = language;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.threads.workers == 0 {
            return Err(StemdexError::ConfigError(
                "Thread count must be at least 1".to_string(),
            ));
        }

        if self.crawl.limit == 0 {
            return Err(StemdexError::ConfigError(
                "Crawl limit must be non-zero".to_string(),
            ));
        }

        if self.crawl.max_attempts == 0 {
            return Err(StemdexError::ConfigError(
                "Max attempts must be non-zero".to_string(),
            ));
        }

        if self.crawl.timeout_sec == 0 {
            return Err(StemdexError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        TextAnalyzer::for_language(&self.text.language)?;

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Include patterns: {:?}",
            self.indexing.include_patterns
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!("  Follow links: {}", self.indexing.follow_links);
        tracing::info!("  Workers: {}", self.threads.workers);
        tracing::info!("  Crawl limit: {} pages", self.crawl.limit);
        tracing::info!("  Max attempts: {}", self.crawl.max_attempts);
        tracing::info!("  Request timeout: {}s", self.crawl.timeout_sec);
        tracing::info!("  Partial search: {}", self.search.partial);
        tracing::info!("  Language: {}", self.text.language);
    }
}
