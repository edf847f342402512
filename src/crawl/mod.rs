//! Per-page crawl admission pipeline
//!
//! Everything that happens between receiving a fetched page and emitting
//! frontier links: canonicalization, trap filtering, body decoding, HTML
//! parsing, near-duplicate detection, and statistics accumulation. The fetch
//! layer itself (HTTP, frontier ordering, politeness) lives outside this
//! crate and communicates through [`fetch::FetchResult`].

pub mod canonical;
pub mod dedup;
pub mod document;
pub mod fetch;
pub mod filter;
pub mod processor;
pub mod stats;
pub mod text;

pub use canonical::{canonical_base, canonicalize, CanonicalizeError};
pub use dedup::NearDuplicateDetector;
pub use document::PageDocument;
pub use fetch::{decode_body, DecodedBody, FetchResult};
pub use filter::UrlFilter;
pub use processor::{CrawlState, PageOutcome, PageProcessor, ProcessResult, RejectReason};
pub use stats::{CrawlStatistics, LongestPage, StatsSnapshot, SubdomainCount};
