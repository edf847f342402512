//! Text normalization and tokenization shared by dedup and statistics

use regex::Regex;
use std::sync::LazyLock;

/// Token pattern shared by fingerprinting and word statistics
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("literal pattern compiles"));

/// Normalize page text: lowercase, collapse whitespace runs to a single
/// space, trim. Returns an empty string for whitespace-only input.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut result = String::with_capacity(lower.len());
    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

/// Extract alphanumeric tokens from text
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Build the set of distinct contiguous k-word shingles, space-joined.
///
/// Returns an empty set when fewer than `k` words exist.
pub fn shingles(words: &[&str], k: usize) -> std::collections::HashSet<String> {
    if k == 0 || words.len() < k {
        return std::collections::HashSet::new();
    }
    words.windows(k).map(|w| w.join(" ")).collect()
}
