//! Headline and body extraction from article pages.
//!
//! The body is built from the *direct* `<p>` children of every story
//! container, in document order. Paragraphs nested deeper (captions, asides,
//! embedded promos) are left out.

use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use crate::utils::class_selector;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Compiled selectors for one category's article layout.
#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    pub headline: Selector,
    pub story: Selector,
}

impl ArticleSelectors {
    /// `h1` carrying `headline_class`, `div` carrying `story_class`.
    pub fn new(headline_class: &str, story_class: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            headline: class_selector("h1", headline_class)?,
            story: class_selector("div", story_class)?,
        })
    }
}

/// Trimmed text of the first headline element, if any.
pub fn extract_headline(document: &Html, selectors: &ArticleSelectors) -> Option<String> {
    let element = document.select(&selectors.headline).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn direct_paragraphs<'a>(container: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "p")
}

/// Space-joined text of the direct paragraphs of every story container.
///
/// `None` when there is no container or the joined text is blank.
pub fn extract_body(document: &Html, selectors: &ArticleSelectors) -> Option<String> {
    let mut containers = 0usize;
    let mut paragraphs = Vec::new();

    for container in document.select(&selectors.story) {
        containers += 1;
        paragraphs.extend(direct_paragraphs(container).map(|p| p.text().collect::<String>()));
    }

    let body = paragraphs.join(" ");
    debug!(containers, paragraphs = paragraphs.len(), bytes = body.len(), "Extracted story text");
    (!body.trim().is_empty()).then_some(body)
}

/// Build the record for one article page.
///
/// A missing headline or body is reported through the `Option` fields, not
/// as an error.
pub fn extract_article(
    document: &Html,
    selectors: &ArticleSelectors,
    url: &str,
    category: &str,
) -> ArticleRecord {
    ArticleRecord {
        headline: extract_headline(document, selectors),
        body: extract_body(document, selectors),
        url: url.to_string(),
        category: category.to_string(),
    }
}
