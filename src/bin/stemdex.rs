//! stemdex CLI - build and query stemmed inverted indexes
//!
//! # Examples
//!
//! ```bash
//! # Index a directory, export it and answer queries with partial matching
//! stemdex run --path docs/ --query queries.txt --index --results
//!
//! # Crawl up to 20 pages on 8 workers
//! stemdex run --url https://example.com/ --limit 20 --threads 8 --counts
//!
//! # Show configuration
//! stemdex show-config
//! ```

use clap::Parser;
use stemdex::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr so exports and summaries on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stemdex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
