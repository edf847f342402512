//! Near-duplicate content detection
//!
//! Two-level check over normalized page text:
//! - Level 1: exact SHA256 hash lookup (cheap, catches byte-identical pages)
//! - Level 2: minhash signature comparison over 3-word shingles, catching
//!   pages that differ only in boilerplate or small edits
//!
//! Only the first-seen representative of a similarity cluster is registered,
//! so later members are compared against it rather than against each other.

use std::collections::HashSet;

use crate::config::DedupConfig;
use crate::crawl::text;
use crate::types::{ContentFingerprint, ContentHash, MinhashSignature};

/// Detector over the content seen so far in this crawl run.
///
/// State is in-memory only and grows for the lifetime of the process;
/// retained signatures are capped to bound the per-page comparison scan.
pub struct NearDuplicateDetector {
    seen_hashes: HashSet<ContentHash>,
    seen_signatures: Vec<MinhashSignature>,
    shingle_size: usize,
    num_bands: usize,
    similarity_threshold: f64,
    max_signatures: usize,
}

impl NearDuplicateDetector {
    /// Create an empty detector from configuration
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            seen_hashes: HashSet::new(),
            seen_signatures: Vec::new(),
            shingle_size: config.shingle_size,
            num_bands: config.num_bands,
            similarity_threshold: config.similarity_threshold,
            max_signatures: config.max_signatures,
        }
    }

    /// Check whether `text` duplicates previously accepted content,
    /// registering its fingerprint when it does not.
    ///
    /// Empty or whitespace-only text is a neutral pass-through: never a
    /// duplicate, never registered.
    pub fn check_and_register(&mut self, text: &str) -> bool {
        let normalized = text::normalize(text);
        if normalized.is_empty() {
            return false;
        }

        let fingerprint = self.fingerprint(&normalized);

        if self.seen_hashes.contains(&fingerprint.hash) {
            return true;
        }

        if let Some(ref signature) = fingerprint.signature {
            for seen in &self.seen_signatures {
                if signature.similarity(seen) >= self.similarity_threshold {
                    return true;
                }
            }
        }

        self.register(fingerprint);
        false
    }

    /// Compute the fingerprint of already-normalized text
    fn fingerprint(&self, normalized: &str) -> ContentFingerprint {
        let hash = ContentHash::compute(normalized);
        let words = text::tokenize(normalized);
        let shingles = text::shingles(&words, self.shingle_size);
        let signature =
            MinhashSignature::compute(shingles.iter().map(String::as_str), self.num_bands);
        ContentFingerprint { hash, signature }
    }

    fn register(&mut self, fingerprint: ContentFingerprint) {
        self.seen_hashes.insert(fingerprint.hash);
        if let Some(signature) = fingerprint.signature {
            if self.seen_signatures.len() < self.max_signatures {
                self.seen_signatures.push(signature);
            } else {
                tracing::warn!(
                    "signature store at capacity ({}), near-duplicates of new pages \
                     may be recrawled",
                    self.max_signatures
                );
            }
        }
    }

    /// Number of exact hashes registered
    pub fn hash_count(&self) -> usize {
        self.seen_hashes.len()
    }

    /// Number of signatures retained for near-duplicate comparison
    pub fn signature_count(&self) -> usize {
        self.seen_signatures.len()
    }
}
