//! Data models for scraped articles and the rows persisted to the corpus.
//!
//! - [`ArticleRecord`]: what the extractor recovered from one article page
//! - [`CorpusRow`]: the CSV projection of a record that has a body
//! - [`CategoryLinks`]: the link set gathered for one category

use crate::config::CategoryConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed CSV header, in column order.
pub const CORPUS_HEADER: [&str; 4] = ["Headline", "Paragraph", "URL", "Category"];

/// A scraped article before filtering.
///
/// `body` is `None` when no story container was found or the containers held
/// no paragraph text. Such records are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    /// Trimmed headline text, if the headline element exists and is non-empty.
    pub headline: Option<String>,
    /// Space-joined paragraph text from the story containers.
    pub body: Option<String>,
    /// Absolute URL the article was fetched from.
    pub url: String,
    /// Name of the category the link was found under.
    pub category: String,
}

impl ArticleRecord {
    /// Project into a persistable row, or `None` when there is no body.
    pub fn into_row(self) -> Option<CorpusRow> {
        let body = self.body.filter(|b| !b.trim().is_empty())?;
        Some(CorpusRow {
            headline: self.headline.unwrap_or_default(),
            paragraph: body,
            url: self.url,
            category: self.category,
        })
    }
}

/// One line of the output CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRow {
    #[serde(rename = "Headline")]
    pub headline: String,
    #[serde(rename = "Paragraph")]
    pub paragraph: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Category")]
    pub category: String,
}

/// Article links gathered for one category, paired with its configuration.
#[derive(Debug, Clone)]
pub struct CategoryLinks<'a> {
    pub category: &'a CategoryConfig,
    pub links: BTreeSet<String>,
}
