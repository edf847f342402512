//! Parsed page abstraction
//!
//! A flat view over an HTML body: the visible text joined with single
//! spaces, and the ordered raw anchor targets. Parsing is error-recovering;
//! a malformed body degrades to whatever could be salvaged rather than
//! failing the page.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("literal selector parses"));

/// Flat document view consumed by the page processor
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// Whitespace-joined text content
    pub text: String,
    /// Raw href values of anchor elements, in document order
    pub links: Vec<String>,
}

impl PageDocument {
    /// Parse an HTML body into its flat text and anchor targets
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let mut text = String::new();
        for node in document.root_element().text() {
            let trimmed = node.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(trimmed);
        }

        let links = document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Self { text, links }
    }
}
