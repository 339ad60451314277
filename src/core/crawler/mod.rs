//! Web crawler.
//!
//! Starting from a seed URL, fetches pages on the work queue, indexes
//! their text and schedules their links. The frontier bounds how many
//! distinct URLs are ever scheduled; the crawl ends when the queue goes
//! idle, i.e. when no fetch task is queued or running.
//!
//! Every fetch task follows the same steps:
//!
//! 1. Fetch the page. A failed fetch ends the task.
//! 2. Extract links from the raw HTML.
//! 3. Strip the HTML and index the text into a private page index
//!    (positions start at 1), merged with one `add_all`.
//! 4. Admit each link to the frontier and schedule a task per admission.

pub mod frontier;

pub use frontier::Frontier;

use reqwest::Url;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::{Result, StemdexError};
use crate::core::index::{ConcurrentIndex, InvertedIndex};
use crate::core::queue::{QueueHandle, WorkQueue};
use crate::core::text::{html, Fetcher, TextAnalyzer};

/// Statistics about one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Distinct URLs admitted to the frontier
    pub pages_scheduled: usize,
    /// Pages fetched and indexed
    pub pages_indexed: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// State shared by every fetch task of a crawler
struct CrawlContext {
    index: Arc<ConcurrentIndex>,
    frontier: Frontier,
    fetcher: Arc<dyn Fetcher>,
    analyzer: TextAnalyzer,
    queue: QueueHandle,
    pages_indexed: AtomicUsize,
}

impl CrawlContext {
    fn schedule(self: &Arc<Self>, url: Url) {
        let context = Arc::clone(self);
        self.queue.submit(move || context.visit(&url));
    }

    fn visit(self: &Arc<Self>, url: &Url) {
        let Some(page) = self.fetcher.fetch(url) else {
            tracing::debug!("No content fetched from {}", url);
            return;
        };

        let links = html::list_links(url, &page);

        let text = html::strip_html(&page);
        let mut local = InvertedIndex::new();
        let tokens = local.add_words(self.analyzer.stems(&text), url.as_str(), 1) - 1;
        self.index.add_all(local);
        self.pages_indexed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Indexed {} ({} tokens, {} links)", url, tokens, links.len());

        for link in links {
            if self.frontier.try_admit(&link) {
                self.schedule(link);
            } else if self.frontier.is_full() {
                break;
            }
        }
    }
}

/// Crawls pages into a shared index using a work queue
pub struct WebCrawler<'q> {
    context: Arc<CrawlContext>,
    queue: &'q WorkQueue,
}

impl<'q> WebCrawler<'q> {
    /// Create a crawler that schedules at most `limit` pages
    pub fn new(
        index: Arc<ConcurrentIndex>,
        queue: &'q WorkQueue,
        fetcher: Arc<dyn Fetcher>,
        analyzer: TextAnalyzer,
        limit: usize,
    ) -> Self {
        let context = CrawlContext {
            index,
            frontier: Frontier::new(limit),
            fetcher,
            analyzer,
            queue: queue.handle(),
            pages_indexed: AtomicUsize::new(0),
        };

        Self {
            context: Arc::new(context),
            queue,
        }
    }

    /// Crawl from `seed` until no fetch task is left
    ///
    /// # Errors
    ///
    /// `InvalidUrl` if the seed cannot be parsed, `Interrupted` if the
    /// queue was shut down mid-crawl.
    pub fn crawl(&self, seed: &str) -> Result<CrawlStats> {
        let start = Instant::now();

        let seed = html::normalize(seed)
            .ok_or_else(|| StemdexError::InvalidUrl(format!("Cannot parse seed URL '{seed}'")))?;

        tracing::info!(
            "Crawling from {} (limit {} pages, {} workers)",
            seed,
            self.context.frontier.limit(),
            self.queue.size()
        );

        if self.context.frontier.try_admit(&seed) {
            self.context.schedule(seed);
        }

        self.queue.wait_idle()?;

        let stats = CrawlStats {
            pages_scheduled: self.context.frontier.len(),
            pages_indexed: self.context.pages_indexed.load(Ordering::Relaxed),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Crawl complete: {} pages scheduled, {} indexed in {}ms",
            stats.pages_scheduled,
            stats.pages_indexed,
            stats.duration_ms
        );

        Ok(stats)
    }
}
