//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!("  indexing:");
            println!("    include_patterns: {:?}", config.indexing.include_patterns);
            println!("    exclude_patterns: {:?}", config.indexing.exclude_patterns);
            println!("    max_file_size_mb: {}", config.indexing.max_file_size_mb);
            println!("    follow_links: {}", config.indexing.follow_links);
            println!("  threads:");
            println!("    workers: {}", config.threads.workers);
            println!("  crawl:");
            println!("    limit: {}", config.crawl.limit);
            println!("    max_attempts: {}", config.crawl.max_attempts);
            println!("    timeout_sec: {}", config.crawl.timeout_sec);
            println!("    user_agent: {}", config.crawl.user_agent);
            println!("  search:");
            println!("    partial: {}", config.search.partial);
            println!("  text:");
            println!("    language: {}", config.text.language);
            println!("  output:");
            println!("    index_path: {}", config.output.index_path.display());
            println!("    counts_path: {}", config.output.counts_path.display());
            println!("    results_path: {}", config.output.results_path.display());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
