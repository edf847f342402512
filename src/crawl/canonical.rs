//! URL canonicalization
//!
//! Turns raw hyperlink strings into absolute, fragment-free URLs suitable as
//! page identity keys, or rejects them with a typed error. Pure functions,
//! no owned state.

use thiserror::Error;
use url::Url;

/// Href schemes that never point at crawlable pages
const REJECTED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Errors from canonicalizing a hyperlink
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    #[error("empty href")]
    Empty,
    #[error("non-page scheme: {0}")]
    UnsupportedScheme(String),
    #[error("pure fragment reference")]
    FragmentOnly,
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
}

/// Resolve `href` against `base` into a canonical URL.
///
/// Trims whitespace, rejects empty strings, non-page schemes and pure
/// fragment references without attempting resolution, then resolves
/// relative references and strips any fragment. Canonicalizing an already
/// canonical URL against itself returns an identical value.
pub fn canonicalize(base: &Url, href: &str) -> Result<Url, CanonicalizeError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(CanonicalizeError::Empty);
    }

    let lower = href.to_lowercase();
    if lower.starts_with('#') {
        return Err(CanonicalizeError::FragmentOnly);
    }
    for scheme in REJECTED_SCHEMES {
        if lower.starts_with(scheme) {
            return Err(CanonicalizeError::UnsupportedScheme(
                scheme.trim_end_matches(':').to_string(),
            ));
        }
    }

    let mut resolved = base.join(href)?;
    resolved.set_fragment(None);
    Ok(resolved)
}

/// Canonical form of an already-absolute URL: the same URL minus fragment
pub fn canonical_base(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.ics.uci.edu/people").unwrap()
    }

    #[test]
    fn test_relative_href_resolves() {
        let url = canonicalize(&base(), "/about").unwrap();
        assert_eq!(url.as_str(), "https://www.ics.uci.edu/about");
    }

    #[test]
    fn test_fragment_is_stripped() {
        let url = canonicalize(&base(), "/about#team").unwrap();
        assert_eq!(url.as_str(), "https://www.ics.uci.edu/about");
    }

    #[test]
    fn test_fragment_variants_canonicalize_identically() {
        let a = canonicalize(&base(), "http://a.ics.uci.edu/x#foo").unwrap();
        let b = canonicalize(&base(), "http://a.ics.uci.edu/x#bar").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "http://a.ics.uci.edu/x");
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let canonical = canonicalize(&base(), "/research/labs").unwrap();
        let again = canonicalize(&canonical, canonical.as_str()).unwrap();
        assert_eq!(canonical, again);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let url = canonicalize(&base(), "  /about  ").unwrap();
        assert_eq!(url.as_str(), "https://www.ics.uci.edu/about");
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(matches!(
            canonicalize(&base(), "   "),
            Err(CanonicalizeError::Empty)
        ));
    }

    #[test]
    fn test_pure_fragment_rejected() {
        assert!(matches!(
            canonicalize(&base(), "#section-2"),
            Err(CanonicalizeError::FragmentOnly)
        ));
    }

    #[test]
    fn test_non_page_schemes_rejected() {
        for href in [
            "javascript:void(0)",
            "MAILTO:someone@ics.uci.edu",
            "tel:+19498246891",
            "data:text/plain;base64,aGk=",
        ] {
            assert!(
                matches!(
                    canonicalize(&base(), href),
                    Err(CanonicalizeError::UnsupportedScheme(_))
                ),
                "expected scheme rejection for {href}"
            );
        }
    }

    #[test]
    fn test_malformed_href_rejected() {
        // A base cannot resolve an authority-form href with no host
        assert!(matches!(
            canonicalize(&base(), "http://"),
            Err(CanonicalizeError::Malformed(_))
        ));
    }

    #[test]
    fn test_canonical_base_strips_fragment() {
        let url = Url::parse("https://www.ics.uci.edu/people#staff").unwrap();
        assert_eq!(
            canonical_base(&url).as_str(),
            "https://www.ics.uci.edu/people"
        );
    }
}
