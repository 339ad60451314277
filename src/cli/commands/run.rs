//! Run command - build an index, export it and answer queries
//!
//! Steps run in a fixed order: crawl, index files, write the index, write
//! the counts, process the query file, write the results. A failing step
//! is reported and the remaining steps still run.

use crate::cli::output::{self, colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::crawler::{CrawlStats, WebCrawler};
use crate::core::error::StemdexError;
use crate::core::index::{ConcurrentIndex, IndexReader, InvertedIndex};
use crate::core::indexer::{IndexBuilder, IndexStats, ThreadedIndexBuilder};
use crate::core::query::{QueryEngine, QueryHandler, ThreadedQueryEngine};
use crate::core::services::Services;
use crate::core::text::Fetcher;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Text file or directory to index
    #[arg(long, visible_alias = "text", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Seed URL to crawl (implies --threads)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Maximum number of pages to crawl
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Build and query on a work queue, optionally with N workers
    #[arg(long, num_args = 0..=1, value_name = "N")]
    pub threads: Option<Option<usize>>,

    /// File with one query per line
    #[arg(long, value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// Match whole words only instead of prefixes
    #[arg(long)]
    pub exact: bool,

    /// Write the inverted index as JSON
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    pub index: Option<Option<PathBuf>>,

    /// Write per-document token counts as JSON
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    pub counts: Option<Option<PathBuf>>,

    /// Write query results as JSON
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    pub results: Option<Option<PathBuf>>,
}

/// Settings for one run after merging flags with configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// Worker count, or `None` for the single-threaded path
    pub workers: Option<usize>,
    pub limit: usize,
    pub partial: bool,
    pub index_path: Option<PathBuf>,
    pub counts_path: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
}

impl RunPlan {
    /// Resolve flags against `config`
    ///
    /// # Errors
    ///
    /// `ConfigError` for a zero thread count or a zero crawl limit.
    pub fn resolve(args: &RunArgs, config: &Config) -> Result<Self, StemdexError> {
        let threaded = args.threads.is_some() || args.url.is_some();

        let workers = if threaded {
            let workers = args.threads.flatten().unwrap_or(config.threads.workers);
            if workers == 0 {
                return Err(StemdexError::ConfigError(
                    "--threads must be at least 1".to_string(),
                ));
            }
            Some(workers)
        } else {
            None
        };

        let limit = args.limit.unwrap_or(config.crawl.limit);
        if limit == 0 {
            return Err(StemdexError::ConfigError(
                "--limit must be at least 1".to_string(),
            ));
        }

        let output = &config.output;
        Ok(Self {
            workers,
            limit,
            partial: !args.exact && config.search.partial,
            index_path: output_path(&args.index, &output.index_path),
            counts_path: output_path(&args.counts, &output.counts_path),
            results_path: output_path(&args.results, &output.results_path),
        })
    }
}

fn output_path(flag: &Option<Option<PathBuf>>, default: &Path) -> Option<PathBuf> {
    flag.as_ref()
        .map(|path| path.clone().unwrap_or_else(|| default.to_path_buf()))
}

/// Run summary
#[derive(Debug, Default, Serialize)]
pub struct RunResponse {
    pub threaded: bool,
    pub workers: Option<usize>,
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl: Option<CrawlStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexing: Option<IndexStats>,
    pub words: usize,
    pub documents: usize,
    pub queries: usize,
    pub searches: usize,
    pub written: Vec<String>,
    pub errors: Vec<String>,
    pub elapsed_secs: f64,
}

impl RunResponse {
    /// Record a failed step; errors confined to one document are warnings
    fn report(&mut self, context: String, error: StemdexError) {
        let message = format!("{context}: {error}");
        if error.is_per_document() {
            tracing::warn!("{}", message);
            output::print_warning(&message);
        } else {
            tracing::error!("{}", message);
            output::print_error(&message);
        }
        self.errors.push(message);
    }

    fn export(&mut self, path: &Path, outcome: crate::core::Result<()>) {
        match outcome {
            Ok(()) => self.written.push(path.display().to_string()),
            Err(e) => self.report("Export failed".to_string(), e),
        }
    }
}

/// Execute the run command
pub fn execute(
    args: RunArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let plan = RunPlan::resolve(&args, &services.config)?;

    let mut response = match plan.workers {
        Some(workers) => run_threaded(&args, &plan, workers, services)?,
        None => run_plain(&args, &plan, services)?,
    };
    response.elapsed_secs = start.elapsed().as_secs_f64();

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

fn run_plain(
    args: &RunArgs,
    plan: &RunPlan,
    services: &Services,
) -> Result<RunResponse, Box<dyn std::error::Error>> {
    let mut response = RunResponse {
        partial: plan.partial,
        ..Default::default()
    };
    let mut index = InvertedIndex::new();

    if let Some(path) = &args.path {
        let builder = IndexBuilder::new(services.create_walker()?, services.analyzer.clone());
        match builder.index_directory(path, &mut index) {
            Ok(stats) => response.indexing = Some(stats),
            Err(e) => response.report(format!("Unable to index {}", path.display()), e),
        }
    }

    let mut engine = QueryEngine::new(&index, services.analyzer.clone());
    finish_run(args, plan, &index, &mut engine, &mut response);

    Ok(response)
}

fn run_threaded(
    args: &RunArgs,
    plan: &RunPlan,
    workers: usize,
    services: &Services,
) -> Result<RunResponse, Box<dyn std::error::Error>> {
    let mut response = RunResponse {
        threaded: true,
        workers: Some(workers),
        partial: plan.partial,
        ..Default::default()
    };

    let queue = services.create_queue(workers)?;
    let index = Arc::new(ConcurrentIndex::new());

    if let Some(url) = &args.url {
        let fetcher: Arc<dyn Fetcher> = Arc::new(services.create_fetcher()?);
        let crawler = WebCrawler::new(
            Arc::clone(&index),
            &queue,
            fetcher,
            services.analyzer.clone(),
            plan.limit,
        );
        match crawler.crawl(url) {
            Ok(stats) => response.crawl = Some(stats),
            Err(e) => response.report(format!("Unable to crawl {url}"), e),
        }
    }

    if let Some(path) = &args.path {
        let builder = ThreadedIndexBuilder::new(
            services.create_walker()?,
            services.analyzer.clone(),
            Arc::clone(&index),
            &queue,
        );
        match builder.index_directory(path) {
            Ok(stats) => response.indexing = Some(stats),
            Err(e) => response.report(format!("Unable to index {}", path.display()), e),
        }
    }

    let mut engine = ThreadedQueryEngine::new(Arc::clone(&index), services.analyzer.clone(), &queue);
    finish_run(args, plan, &*index, &mut engine, &mut response);

    drop(engine);
    queue.shutdown();

    Ok(response)
}

/// Export, query and summarize, identically for both paths
fn finish_run(
    args: &RunArgs,
    plan: &RunPlan,
    index: &dyn IndexReader,
    queries: &mut dyn QueryHandler,
    response: &mut RunResponse,
) {
    if let Some(path) = &plan.index_path {
        response.export(path, index.write_index(path));
    }

    if let Some(path) = &plan.counts_path {
        response.export(path, index.write_counts(path));
    }

    if let Some(path) = &args.query {
        if let Err(e) = queries.process_file(path, plan.partial) {
            response.report(format!("Unable to process queries from {}", path.display()), e);
        }
    }

    if let Some(path) = &plan.results_path {
        response.export(path, queries.write_results(path));
    }

    response.words = index.num_words();
    response.documents = index.num_counted_documents();
    response.queries = queries.num_queries();
    response.searches = queries.searches_run();
}

fn print_human(response: &RunResponse) {
    if let Some(crawl) = &response.crawl {
        println!(
            "{} {} pages ({} indexed) in {}",
            colors::success("Crawled"),
            colors::number(&crawl.pages_scheduled.to_string()),
            colors::number(&crawl.pages_indexed.to_string()),
            colors::number(&format_duration(crawl.duration_ms as f64 / 1000.0))
        );
    }

    if let Some(indexing) = &response.indexing {
        println!(
            "{} {} files ({} tokens, {} skipped) in {}",
            colors::success("Indexed"),
            colors::number(&indexing.files_indexed.to_string()),
            colors::number(&indexing.tokens_indexed.to_string()),
            colors::number(&indexing.files_skipped.to_string()),
            colors::number(&format_duration(indexing.duration_ms as f64 / 1000.0))
        );
    }

    let mode = match response.workers {
        Some(workers) => format!("{workers} workers"),
        None => "single thread".to_string(),
    };
    println!(
        "{} {} words across {} documents ({})",
        colors::label("Index:"),
        colors::number(&response.words.to_string()),
        colors::number(&response.documents.to_string()),
        colors::dim(&mode)
    );

    if response.queries > 0 {
        println!(
            "{} {} distinct, {} {} searches",
            colors::label("Queries:"),
            colors::number(&response.queries.to_string()),
            colors::number(&response.searches.to_string()),
            if response.partial { "partial" } else { "exact" }
        );
    }

    for path in &response.written {
        println!("{} {}", colors::label("Wrote"), colors::file_path(path));
    }

    if !response.errors.is_empty() {
        output::print_warning(&format!("{} step(s) failed", response.errors.len()));
    }

    println!("Elapsed: {:.6} seconds", response.elapsed_secs);
}
