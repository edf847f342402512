//! Fetch-layer boundary types
//!
//! The fetch layer (HTTP client, frontier, politeness) lives outside this
//! crate; it hands completed fetches across this boundary. Body decoding
//! honors the declared encoding and degrades to lossy replacement rather
//! than failing.

use encoding_rs::{Encoding, UTF_8};
use url::Url;

/// A completed fetch as delivered by the external fetch layer
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL that was requested
    pub requested_url: Url,
    /// Final URL after redirects, when it differs from the request
    pub final_url: Option<Url>,
    /// HTTP status code
    pub status: u16,
    /// Raw response body, if any
    pub body: Option<Vec<u8>>,
    /// Encoding label declared by the server, if any
    pub encoding: Option<String>,
}

impl FetchResult {
    /// The base URL for resolving this page's links: the post-redirect URL
    /// when available, otherwise the requested URL.
    pub fn base_url(&self) -> &Url {
        self.final_url.as_ref().unwrap_or(&self.requested_url)
    }

    /// Whether the fetch produced a processable page
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }
}

/// Body bytes decoded to text
#[derive(Debug)]
pub struct DecodedBody {
    /// Decoded text, with replacement characters for undecodable sequences
    pub text: String,
    /// Name of the encoding actually used
    pub encoding: &'static str,
    /// Whether any byte sequences were replaced during decoding
    pub lossy: bool,
}

/// Decode body bytes under the declared encoding label, falling back to
/// UTF-8 for unknown labels. Undecodable sequences become replacement
/// characters; decoding itself never fails.
pub fn decode_body(body: &[u8], declared: Option<&str>) -> DecodedBody {
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8);
    let (text, used, lossy) = encoding.decode(body);
    DecodedBody {
        text: text.into_owned(),
        encoding: used.name(),
        lossy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let decoded = decode_body("héllo".as_bytes(), Some("utf-8"));
        assert_eq!(decoded.text, "héllo");
        assert!(!decoded.lossy);
    }

    #[test]
    fn test_decode_declared_latin1() {
        // 0xE9 is 'é' in ISO-8859-1 but invalid UTF-8
        let decoded = decode_body(&[b'c', b'a', b'f', 0xE9], Some("ISO-8859-1"));
        assert_eq!(decoded.text, "café");
        assert!(!decoded.lossy);
    }

    #[test]
    fn test_decode_unknown_label_falls_back_to_utf8() {
        let decoded = decode_body(b"plain ascii", Some("x-no-such-encoding"));
        assert_eq!(decoded.text, "plain ascii");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_decode_invalid_bytes_is_lossy_not_fatal() {
        let decoded = decode_body(&[b'o', b'k', 0xFF, 0xFE], None);
        assert!(decoded.lossy);
        assert!(decoded.text.starts_with("ok"));
    }

    #[test]
    fn test_base_url_prefers_final() {
        let requested = Url::parse("http://ics.uci.edu/old").unwrap();
        let final_url = Url::parse("https://www.ics.uci.edu/new").unwrap();
        let fetch = FetchResult {
            requested_url: requested.clone(),
            final_url: Some(final_url.clone()),
            status: 200,
            body: None,
            encoding: None,
        };
        assert_eq!(fetch.base_url(), &final_url);

        let no_redirect = FetchResult {
            final_url: None,
            ..fetch
        };
        assert_eq!(no_redirect.base_url(), &requested);
    }

    #[test]
    fn test_has_body() {
        let mut fetch = FetchResult {
            requested_url: Url::parse("http://ics.uci.edu/").unwrap(),
            final_url: None,
            status: 200,
            body: None,
            encoding: None,
        };
        assert!(!fetch.has_body());
        fetch.body = Some(Vec::new());
        assert!(!fetch.has_body());
        fetch.body = Some(b"<html></html>".to_vec());
        assert!(fetch.has_body());
    }
}
