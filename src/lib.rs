//! Crawlcore: per-page admission and deduplication for a focused web crawler
//!
//! The core that sits between a fetch layer and a crawl frontier, featuring:
//! - URL canonicalization (relative resolution, fragment stripping)
//! - Scope and trap filtering (domain allow-list, calendar/pagination traps)
//! - Near-duplicate detection (exact SHA256 + minhash over word shingles)
//! - Crawl statistics (unique pages, longest page, word and subdomain counts)
//!
//! All shared state mutates under a single lock, so each accepted page's
//! registration and statistics contribution are atomic.

pub mod config;
pub mod crawl;
pub mod types;

pub use config::Config;
pub use crawl::{FetchResult, PageOutcome, PageProcessor, ProcessResult};
pub use types::*;
