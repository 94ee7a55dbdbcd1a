//! Article link discovery on listing pages.
//!
//! Listing pages link to far more than articles: navigation, topic indexes,
//! share buttons. An href counts as an article when it sits under one of the
//! site's section prefixes (e.g. `/pidgin/tori`) and ends in the numeric
//! article id, e.g. `/pidgin/tori-58312233`.

use crate::config::SiteConfig;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::{debug, trace};

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("static selector"));

/// True when `href` sits under one of `prefixes` and ends in a digit.
pub fn is_article_href(href: &str, prefixes: &[String]) -> bool {
    let under_section = prefixes.iter().any(|p| href.starts_with(p.as_str()));
    let numeric_tail = href
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    under_section && numeric_tail
}

/// Collect the absolute article URLs linked from a listing page.
///
/// Anchors without an `href` are skipped. Accepted hrefs are resolved
/// against the site's base URL.
pub fn extract_links(document: &Html, site: &SiteConfig) -> BTreeSet<String> {
    let mut links = BTreeSet::new();
    let mut anchors = 0usize;

    for a in document.select(&ANCHOR) {
        anchors += 1;
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if !is_article_href(href, &site.link_prefixes) {
            trace!(href, "Skipping non-article link");
            continue;
        }
        match site.base_url.join(href) {
            Ok(resolved) => {
                links.insert(resolved.to_string());
            }
            Err(e) => debug!(href, error = %e, "Could not resolve article link"),
        }
    }

    debug!(anchors, accepted = links.len(), "Extracted article links");
    links
}
