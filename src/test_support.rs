//! In-memory fetcher and pacer for exercising the crawl without a network.

use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::pacing::Pacer;
use scraper::Html;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves fixture HTML by URL and records every request.
///
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Html, ScrapeError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => Ok(Html::parse_document(html)),
            None => Err(ScrapeError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Listing page with the given hrefs and an optional total-page indicator.
pub fn listing_page(hrefs: &[&str], total_pages: Option<&str>) -> String {
    let anchors = hrefs
        .iter()
        .map(|h| format!(r#"<li><a href="{}">story</a></li>"#, h))
        .collect::<String>();
    let pager = total_pages
        .map(|n| {
            format!(
                r#"<nav><span class="lx-pagination__page-number qa-pagination-total-page-number">{}</span></nav>"#,
                n
            )
        })
        .unwrap_or_default();
    format!("<html><body><ul>{}</ul>{}</body></html>", anchors, pager)
}

/// Article page with a headline and one story container per entry in `paragraphs`.
pub fn article_page(headline: &str, paragraphs: &[&[&str]]) -> String {
    let divs = paragraphs
        .iter()
        .map(|ps| {
            let inner = ps.iter().map(|p| format!("<p>{}</p>", p)).collect::<String>();
            format!(r#"<div class="story-body">{}</div>"#, inner)
        })
        .collect::<String>();
    format!(
        r#"<html><body><h1 class="hl-main">{}</h1><main>{}</main></body></html>"#,
        headline, divs
    )
}

/// Site config matching the fixture builders above.
pub const SITE_YAML: &str = r#"
base_url: https://www.bbc.com
link_prefixes: [/pidgin/tori, /pidgin/world, /pidgin/sport]
page_count_class: lx-pagination__page-number qa-pagination-total-page-number
headline_class: hl-main
story_class: story-body
categories:
  nigeria:
    url: https://www.bbc.com/pidgin/topics/nigeria
  sport:
    url: https://www.bbc.com/pidgin/topics/sport
"#;
