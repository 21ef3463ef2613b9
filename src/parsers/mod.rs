pub mod listing;
pub mod product;

#[cfg(test)]
mod tests;

use crate::error::ScrapeError;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parsed HTML document with optional-returning queries.
///
/// Absence is never an error here; callers decide whether a missing element
/// matters.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching `selector`, in document order
    pub fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All elements matching `selector`, in document order
    pub fn find_all<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.find_first(selector).is_some()
    }
}

/// Visible text of an element with whitespace runs collapsed and the ends trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fetched page: where it came from, its rendered source and its parsed tree
pub struct PageContext {
    pub url: Url,
    pub rendered_html: String,
    pub document: Document,
}

impl PageContext {
    pub fn new(url: &str, rendered_html: String) -> Result<Self, ScrapeError> {
        let url = Url::parse(url).map_err(|source| ScrapeError::Url {
            url: url.to_string(),
            source,
        })?;
        let document = Document::parse(&rendered_html);
        Ok(Self {
            url,
            rendered_html,
            document,
        })
    }

    /// Resolves an `href` found on this page to an absolute URL
    pub fn resolve(&self, href: &str) -> Option<String> {
        crate::utils::resolve_link(&self.url, href)
    }
}
