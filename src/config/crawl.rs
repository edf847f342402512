//! Crawl scope, trap filtering, and deduplication configuration

use serde::{Deserialize, Serialize};

/// Crawl scope: which hosts and ports are in bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Allowed registrable domains; a host is in scope when it equals one of
    /// these or ends with "." followed by one
    pub allowed_domains: Vec<String>,
    /// Explicit ports accepted in URLs (scheme-default ports always pass)
    pub allowed_ports: Vec<u16>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![
                "ics.uci.edu".to_string(),
                "cs.uci.edu".to_string(),
                "informatics.uci.edu".to_string(),
                "stat.uci.edu".to_string(),
            ],
            allowed_ports: vec![80, 443],
        }
    }
}

/// Trap heuristics applied after scope checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapConfig {
    /// File extensions (without dot) that mark non-HTML resources
    pub skip_extensions: Vec<String>,
    /// Lowercased substrings that mark a path as an admin or edit surface
    pub path_substrings: Vec<String>,
    /// Query parameters whose high numeric values indicate deep pagination
    pub pagination_params: Vec<String>,
    /// Minimum digit count for a pagination value to be considered a trap
    pub pagination_digit_threshold: usize,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            skip_extensions: [
                "css", "js", "bmp", "gif", "jpeg", "jpg", "ico", "png", "tiff", "tif", "mid",
                "mp2", "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg",
                "ogv", "pdf", "ps", "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx",
                "names", "data", "dat", "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg",
                "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar",
                "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            path_substrings: vec!["admin".to_string(), "wiki".to_string()],
            pagination_params: vec!["page".to_string(), "p".to_string()],
            pagination_digit_threshold: 4,
        }
    }
}

/// Near-duplicate detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Words per shingle
    pub shingle_size: usize,
    /// Minhash bands per signature
    pub num_bands: usize,
    /// Fraction of agreeing bands at or above which two pages are
    /// near-duplicates
    pub similarity_threshold: f64,
    /// Maximum signatures retained for comparison; exact hashes are
    /// unbounded
    pub max_signatures: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            shingle_size: 3,
            num_bands: 64,
            similarity_threshold: 0.8,
            max_signatures: 100_000,
        }
    }
}
