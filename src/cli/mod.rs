//! CLI adapter for stemdex
//!
//! Provides the command-line interface over `core/`.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// stemdex - inverted-index search over files and web pages
///
/// Build a word-position index from text files or a web crawl, export
/// it as JSON, and answer ranked queries from a query file.
#[derive(Parser, Debug)]
#[command(name = "stemdex")]
#[command(version)]
#[command(about = "Concurrent inverted-index search engine", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an index, export it and run queries
    Run(commands::RunArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  stemdex completions bash > ~/.local/share/bash-completion/completions/stemdex
    ///   zsh:   stemdex completions zsh > ~/.zfunc/_stemdex
    ///   fish:  stemdex completions fish > ~/.config/fish/completions/stemdex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
