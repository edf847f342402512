//! Crawl statistics accumulation
//!
//! Monotonic per-run counters, mutated only when the page processor accepts
//! a novel page. Snapshots are deterministic and serializable so the
//! reporting layer can persist them without reaching into live state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use url::Url;

use crate::crawl::text;

/// Common words excluded from word-frequency statistics (but counted toward
/// page length)
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn", "couldnt", "did", "didn", "didnt",
    "do", "does", "doesn", "doesnt", "doing", "don", "dont", "down", "during", "each", "few",
    "for", "from", "further", "had", "hadn", "hadnt", "has", "hasn", "hasnt", "have", "haven",
    "havent", "having", "he", "hed", "hell", "her", "here", "heres", "hers", "herself", "hes",
    "him", "himself", "his", "how", "hows", "i", "id", "if", "ill", "im", "in", "into", "is",
    "isn", "isnt", "it", "its", "itself", "ive", "let", "lets", "me", "more", "most", "mustn",
    "mustnt", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shan", "shant",
    "she", "shed", "shell", "shes", "should", "shouldn", "shouldnt", "so", "some", "such", "t",
    "than", "that", "thats", "the", "their", "theirs", "them", "themselves", "then", "there",
    "theres", "these", "they", "theyd", "theyll", "theyre", "theyve", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "wasn", "wasnt", "we", "wed", "well",
    "were", "weren", "werent", "weve", "what", "whats", "when", "whens", "where", "wheres",
    "which", "while", "who", "whom", "whos", "why", "whys", "with", "won", "wont", "would",
    "wouldn", "wouldnt", "you", "youd", "youll", "your", "youre", "yours", "yourself",
    "yourselves", "youve",
];

/// Longest page record: canonical URL and token count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongestPage {
    pub url: String,
    pub word_count: usize,
}

/// Process-wide crawl statistics, owned by the crawl state
pub struct CrawlStatistics {
    unique_pages: HashSet<String>,
    longest_page: Option<LongestPage>,
    word_counts: HashMap<String, u64>,
    subdomains: BTreeMap<String, HashSet<String>>,
    stop_words: HashSet<&'static str>,
}

impl CrawlStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            unique_pages: HashSet::new(),
            longest_page: None,
            word_counts: HashMap::new(),
            subdomains: BTreeMap::new(),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Record an accepted novel page.
    ///
    /// `normalized_text` must already be lowercased. Re-recording the same
    /// canonical URL leaves the unique-page set unchanged but still
    /// accumulates word counts; in practice the duplicate gate prevents
    /// identical content from arriving twice.
    pub fn record_page(&mut self, url: &Url, normalized_text: &str) {
        let key = url.as_str().to_string();
        self.unique_pages.insert(key.clone());

        let tokens = text::tokenize(normalized_text);

        // Page length includes stop words; only the frequency table
        // excludes them
        let word_count = tokens.len();
        let is_longest = self
            .longest_page
            .as_ref()
            .is_none_or(|current| word_count > current.word_count);
        if is_longest {
            self.longest_page = Some(LongestPage {
                url: key.clone(),
                word_count,
            });
        }

        for token in tokens {
            if !self.stop_words.contains(token) {
                *self.word_counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        if let Some(host) = url.host_str() {
            self.subdomains
                .entry(host.to_lowercase())
                .or_default()
                .insert(key);
        }
    }

    /// Number of distinct canonical URLs accepted
    pub fn unique_page_count(&self) -> usize {
        self.unique_pages.len()
    }

    /// Whether a canonical URL has been accepted
    pub fn contains_page(&self, url: &Url) -> bool {
        self.unique_pages.contains(url.as_str())
    }

    /// Occurrence count of a word (zero for stop words and unseen words)
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    /// Read-only snapshot for reporting
    pub fn snapshot(&self, top_words: usize) -> StatsSnapshot {
        let mut words: Vec<(String, u64)> = self
            .word_counts
            .iter()
            .map(|(w, c)| (w.clone(), *c))
            .collect();
        // Count descending, ties by ascending word
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(top_words);

        let subdomains = self
            .subdomains
            .iter()
            .map(|(host, pages)| SubdomainCount {
                subdomain: host.clone(),
                unique_pages: pages.len(),
            })
            .collect();

        StatsSnapshot {
            generated_at: Utc::now(),
            unique_pages: self.unique_pages.len(),
            longest_page: self.longest_page.clone(),
            top_words: words,
            subdomains,
        }
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique-page count for one subdomain
#[derive(Debug, Clone, Serialize)]
pub struct SubdomainCount {
    pub subdomain: String,
    pub unique_pages: usize,
}

/// Point-in-time view of crawl statistics
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub unique_pages: usize,
    pub longest_page: Option<LongestPage>,
    /// Top words by count descending, ties broken by ascending word
    pub top_words: Vec<(String, u64)>,
    /// Alphabetical by subdomain
    pub subdomains: Vec<SubdomainCount>,
}
