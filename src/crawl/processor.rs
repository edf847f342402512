//! Page processing orchestration
//!
//! Drives one fetched page through the admission pipeline: status and body
//! gates, body decoding, duplicate detection, statistics accumulation, and
//! outgoing-link canonicalization and filtering. Shared crawl state lives
//! behind a single mutex so per-page registration and statistics updates
//! appear atomic to concurrent workers.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::config::Config;
use crate::crawl::{
    canonical::{self, CanonicalizeError},
    dedup::NearDuplicateDetector,
    document::PageDocument,
    fetch::{decode_body, FetchResult},
    filter::UrlFilter,
    stats::{CrawlStatistics, StatsSnapshot},
};

/// Mutable state shared across all pages of a crawl run
pub struct CrawlState {
    pub dedup: NearDuplicateDetector,
    pub stats: CrawlStatistics,
}

impl CrawlState {
    /// Create fresh state from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            dedup: NearDuplicateDetector::new(&config.dedup),
            stats: CrawlStatistics::new(),
        }
    }
}

/// Why a page was rejected before content inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// HTTP status was not 200
    NonSuccessStatus(u16),
    /// Response carried no body bytes
    EmptyBody,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSuccessStatus(status) => write!(f, "non-success status {status}"),
            Self::EmptyBody => write!(f, "empty or missing body"),
        }
    }
}

/// Terminal outcome of processing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page never reached content inspection
    Rejected(RejectReason),
    /// Content duplicates a previously accepted page
    Duplicate,
    /// Novel content; statistics were updated and links extracted
    Novel,
}

/// Result of processing a single fetched page
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Canonical URL of the page (requested URL for rejected fetches)
    pub url: Url,
    /// Processing outcome
    pub outcome: PageOutcome,
    /// Canonical, trap-filtered outgoing links; empty unless `Novel`
    pub links: Vec<Url>,
}

impl ProcessResult {
    fn terminal(url: Url, outcome: PageOutcome) -> Self {
        Self {
            url,
            outcome,
            links: Vec::new(),
        }
    }
}

/// Per-page admission pipeline over shared crawl state.
///
/// The filter and canonicalizer are pure; all shared mutation happens under
/// one lock acquisition per page, so a page's duplicate registration and
/// statistics contribution are atomic relative to other pages.
pub struct PageProcessor {
    filter: UrlFilter,
    state: Arc<Mutex<CrawlState>>,
}

impl PageProcessor {
    /// Create a processor with fresh state
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let filter = UrlFilter::new(&config.scope, &config.traps)?;
        let state = Arc::new(Mutex::new(CrawlState::new(config)));
        Ok(Self { filter, state })
    }

    /// Create a processor over existing shared state, for callers running
    /// several workers against one crawl run
    pub fn with_state(filter: UrlFilter, state: Arc<Mutex<CrawlState>>) -> Self {
        Self { filter, state }
    }

    /// Handle to the shared crawl state
    pub fn state(&self) -> Arc<Mutex<CrawlState>> {
        Arc::clone(&self.state)
    }

    /// Process one fetched page, returning its outcome and the canonical,
    /// filter-eligible links it contributes to the frontier.
    pub fn process(&self, fetch: &FetchResult) -> ProcessResult {
        if fetch.status != 200 {
            return ProcessResult::terminal(
                canonical::canonical_base(&fetch.requested_url),
                PageOutcome::Rejected(RejectReason::NonSuccessStatus(fetch.status)),
            );
        }
        let body = match fetch.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => {
                return ProcessResult::terminal(
                    canonical::canonical_base(&fetch.requested_url),
                    PageOutcome::Rejected(RejectReason::EmptyBody),
                )
            }
        };

        let base = fetch.base_url();
        let page_url = canonical::canonical_base(base);

        let decoded = decode_body(body, fetch.encoding.as_deref());
        if decoded.lossy {
            tracing::debug!(url = %page_url, encoding = decoded.encoding, "lossy body decode");
        }

        let document = PageDocument::parse(&decoded.text);
        let normalized = crate::crawl::text::normalize(&document.text);

        // One lock acquisition covers the duplicate gate and the statistics
        // update, so no partially-updated state is observable. Normalization
        // is idempotent, so the pre-normalized text feeds both paths.
        {
            let mut state = self.state.lock();
            if state.dedup.check_and_register(&normalized) {
                tracing::debug!(url = %page_url, "duplicate content, skipping");
                return ProcessResult::terminal(page_url, PageOutcome::Duplicate);
            }
            state.stats.record_page(&page_url, &normalized);
        }

        let links = self.extract_links(base, &document);
        ProcessResult {
            url: page_url,
            outcome: PageOutcome::Novel,
            links,
        }
    }

    /// Snapshot the crawl statistics
    pub fn snapshot(&self, top_words: usize) -> StatsSnapshot {
        self.state.lock().stats.snapshot(top_words)
    }

    /// Canonicalize, de-duplicate, and filter a page's anchor targets.
    ///
    /// First occurrence of each canonical URL wins; links that fail to
    /// canonicalize are skipped, never fatal to the page.
    fn extract_links(&self, base: &Url, document: &PageDocument) -> Vec<Url> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut links = Vec::new();

        for href in &document.links {
            let url = match canonical::canonicalize(base, href) {
                Ok(url) => url,
                Err(CanonicalizeError::Empty | CanonicalizeError::FragmentOnly) => continue,
                Err(err) => {
                    tracing::debug!(href = %href, error = %err, "skipping link");
                    continue;
                }
            };
            if !seen.insert(url.as_str().to_string()) {
                continue;
            }
            if self.filter.is_eligible(&url) {
                links.push(url);
            }
        }

        links
    }
}
