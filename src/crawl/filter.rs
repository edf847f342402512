//! Crawl trap filtering
//!
//! Decides whether a canonical URL is worth fetching. Rules guard against
//! unbounded URL spaces rather than guaranteeing page quality:
//! - Domain allow-list (scope of the crawl)
//! - Calendar/archive date segments in the path
//! - High-numbered pagination query parameters
//! - Admin and wiki edit surfaces
//! - Non-HTML file extensions
//!
//! All patterns are compiled once at construction; `is_eligible` is a pure
//! predicate with no side effects.

use anyhow::{Context, Result};
use regex::Regex;
use url::Url;

use crate::config::{ScopeConfig, TrapConfig};

/// Date-like path segment: a 4-digit year, a separator, a 1-2 digit
/// month/day, optionally another separator and 1-2 digits, starting at a
/// path-segment boundary. Calendar archives expand such paths without bound.
const DATE_SEGMENT_PATTERN: &str = r"(?:^|/)\d{4}[-_/]\d{1,2}(?:[-_/]\d{1,2})?(?:[^0-9]|$)";

/// URL eligibility filter with pre-compiled trap patterns
pub struct UrlFilter {
    allowed_hosts: Vec<String>,
    allowed_suffixes: Vec<String>,
    allowed_ports: Vec<u16>,
    date_segment: Regex,
    pagination: Regex,
    path_substrings: Vec<String>,
    extensions: Regex,
}

impl UrlFilter {
    /// Build a filter from scope and trap configuration
    pub fn new(scope: &ScopeConfig, traps: &TrapConfig) -> Result<Self> {
        let allowed_hosts: Vec<String> = scope
            .allowed_domains
            .iter()
            .map(|d| d.trim_end_matches('.').to_lowercase())
            .collect();
        let allowed_suffixes = allowed_hosts.iter().map(|d| format!(".{d}")).collect();

        let date_segment =
            Regex::new(DATE_SEGMENT_PATTERN).context("date segment pattern failed to compile")?;

        let params: Vec<String> = traps
            .pagination_params
            .iter()
            .map(|p| regex::escape(&p.to_lowercase()))
            .collect();
        let pagination = Regex::new(&format!(
            r"(?:^|&)(?:{})=[0-9]{{{},}}",
            params.join("|"),
            traps.pagination_digit_threshold
        ))
        .context("pagination pattern failed to compile")?;

        let extensions: Vec<String> = traps
            .skip_extensions
            .iter()
            .map(|e| regex::escape(&e.trim_start_matches('.').to_lowercase()))
            .collect();
        let extensions = Regex::new(&format!(r"\.(?:{})$", extensions.join("|")))
            .context("extension pattern failed to compile")?;

        let path_substrings = traps
            .path_substrings
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        Ok(Self {
            allowed_hosts,
            allowed_suffixes,
            allowed_ports: scope.allowed_ports.clone(),
            date_segment,
            pagination,
            path_substrings,
            extensions,
        })
    }

    /// Decide whether a canonical URL should be crawled.
    ///
    /// Rules are evaluated in order and short-circuit on the first failure.
    /// Callers must canonicalize before filtering; this never mutates state
    /// and never fails for well-formed input.
    pub fn is_eligible(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        let host = match url.host_str() {
            Some(h) => h.trim_end_matches('.').to_lowercase(),
            None => return false,
        };
        if host.is_empty() {
            return false;
        }

        if !self.allowed_hosts.iter().any(|d| host == *d)
            && !self.allowed_suffixes.iter().any(|s| host.ends_with(s))
        {
            return false;
        }

        // Url::port() is None for scheme-default ports
        if let Some(port) = url.port() {
            if !self.allowed_ports.contains(&port) {
                return false;
            }
        }

        let path = url.path().to_lowercase();
        if self.date_segment.is_match(&path) {
            return false;
        }

        if let Some(query) = url.query() {
            if self.pagination.is_match(&query.to_lowercase()) {
                return false;
            }
        }

        if self.path_substrings.iter().any(|s| path.contains(s)) {
            return false;
        }

        if self.extensions.is_match(&path) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> UrlFilter {
        UrlFilter::new(&ScopeConfig::default(), &TrapConfig::default()).unwrap()
    }

    fn eligible(url: &str) -> bool {
        filter().is_eligible(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_allowed_domain_page() {
        assert!(eligible("https://www.ics.uci.edu/people"));
        assert!(eligible("http://cs.uci.edu/"));
        assert!(eligible("https://luci.informatics.uci.edu/research"));
        assert!(eligible("https://stat.uci.edu/faculty"));
    }

    #[test]
    fn test_host_outside_scope_rejected() {
        assert!(!eligible("https://www.uci.edu/"));
        assert!(!eligible("https://example.com/ics.uci.edu"));
    }

    #[test]
    fn test_suffix_requires_dot_boundary() {
        assert!(eligible("https://foo.ics.uci.edu/x"));
        assert!(!eligible("https://evilics.uci.edu/x"));
    }

    #[test]
    fn test_trailing_dot_host_accepted() {
        assert!(eligible("https://www.ics.uci.edu./people"));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(!eligible("ftp://ftp.ics.uci.edu/pub"));
    }

    #[test]
    fn test_explicit_standard_ports_pass() {
        assert!(!eligible("http://www.ics.uci.edu:8080/x"));
        // Port 80 on https is explicit (non-default) but still allowed
        assert!(eligible("https://www.ics.uci.edu:80/x"));
        assert!(eligible("http://www.ics.uci.edu:443/x"));
    }

    #[test]
    fn test_date_segment_is_trap() {
        assert!(!eligible("https://calendar.ics.uci.edu/events/2024-03-15/"));
        assert!(!eligible("https://www.ics.uci.edu/archive/2023/01/02"));
        assert!(!eligible("https://www.ics.uci.edu/news/2022_7"));
    }

    #[test]
    fn test_bare_year_is_not_trap() {
        assert!(eligible("https://www.ics.uci.edu/class-of-2024"));
        assert!(eligible("https://www.ics.uci.edu/2024/"));
    }

    #[test]
    fn test_year_inside_segment_is_not_trap() {
        // Year does not start at a segment boundary
        assert!(eligible("https://www.ics.uci.edu/cs2024-5"));
    }

    #[test]
    fn test_pagination_trap() {
        assert!(!eligible("https://www.ics.uci.edu/archive?page=1234"));
        assert!(!eligible("https://www.ics.uci.edu/archive?sort=asc&p=99999"));
        // Small page numbers are fine
        assert!(eligible("https://www.ics.uci.edu/archive?page=12"));
        // Different parameter name entirely
        assert!(eligible("https://www.ics.uci.edu/archive?pages=1234"));
    }

    #[test]
    fn test_pagination_flips_eligible_url() {
        let base = "https://www.ics.uci.edu/people";
        assert!(eligible(base));
        assert!(!eligible(&format!("{base}?page=4821")));
    }

    #[test]
    fn test_admin_and_wiki_paths_rejected() {
        assert!(!eligible("https://www.ics.uci.edu/admin/login"));
        assert!(!eligible("https://swiki.ics.uci.edu/doku.php/wiki:start"));
    }

    #[test]
    fn test_non_html_extensions_rejected() {
        for url in [
            "https://www.ics.uci.edu/style.css",
            "https://www.ics.uci.edu/talk.pdf",
            "https://www.ics.uci.edu/photo.JPG",
            "https://www.ics.uci.edu/data.tar.gz",
            "https://www.ics.uci.edu/setup.exe",
        ] {
            assert!(!eligible(url), "expected extension rejection for {url}");
        }
        assert!(eligible("https://www.ics.uci.edu/index.html"));
        assert!(eligible("https://www.ics.uci.edu/paper"));
    }

    #[test]
    fn test_extension_query_does_not_mask_path() {
        // The extension rule applies to the path, not the query
        assert!(eligible("https://www.ics.uci.edu/view?file=x.pdf"));
    }

    #[test]
    fn test_narrowed_scope_configuration() {
        let scope = ScopeConfig {
            allowed_domains: vec!["example.org".to_string()],
            ..ScopeConfig::default()
        };
        let filter = UrlFilter::new(&scope, &TrapConfig::default()).unwrap();
        assert!(filter.is_eligible(&Url::parse("https://a.example.org/x").unwrap()));
        assert!(!filter.is_eligible(&Url::parse("https://www.ics.uci.edu/x").unwrap()));
    }
}
