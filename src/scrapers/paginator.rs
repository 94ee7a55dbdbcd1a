//! Pagination across a category's listing pages.
//!
//! The first listing page may carry a total-page-count element. When it does,
//! pages `2..=total` (or up to the configured `max_pages`) are fetched from
//! `{category_url}/page/{n}` and their links merged into one set.

use crate::config::{CategoryConfig, SiteConfig};
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::pacing::Pacer;
use crate::scrapers::links::extract_links;
use crate::utils::class_selector;
use scraper::Html;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// Read the total page count from a listing page.
///
/// Returns `Ok(None)` when the page has no page-count element, which means
/// the category fits on one page.
///
/// # Errors
///
/// [`ScrapeError::Parse`] when the element's text is not a positive integer.
pub fn page_count(document: &Html, site: &SiteConfig) -> Result<Option<u32>, ScrapeError> {
    let selector = class_selector("span", &site.page_count_class)?;
    let Some(element) = document.select(&selector).next() else {
        return Ok(None);
    };

    let text = element.text().collect::<String>();
    match text.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ScrapeError::Parse {
            what: "total page count",
            text: text.trim().to_string(),
        }),
    }
}

/// Last page to visit given the detected total and an optional cap.
pub fn last_page(total: u32, max_pages: Option<u32>) -> u32 {
    match max_pages {
        Some(cap) => total.min(cap),
        None => total,
    }
}

/// Gather every article link of one category.
///
/// # Errors
///
/// Only a failure to fetch the first listing page is returned. A bad page
/// count or a failing later page stops the walk and keeps the links gathered
/// so far.
#[instrument(level = "info", skip_all, fields(category = %category.name))]
pub async fn collect_category_links<F, P>(
    fetcher: &F,
    pacer: &P,
    site: &SiteConfig,
    category: &CategoryConfig,
) -> Result<BTreeSet<String>, ScrapeError>
where
    F: PageFetcher,
    P: Pacer,
{
    let first = fetcher.fetch(&category.page_url(1)).await?;
    let mut links = extract_links(&first, site);
    let total = page_count(&first, site);
    drop(first);

    let total = match total {
        Ok(Some(total)) => total,
        Ok(None) => {
            info!(count = links.len(), "Only one page found; urls gathered");
            return Ok(links);
        }
        Err(e) => {
            warn!(error = %e, count = links.len(), "Could not read page count; keeping first page only");
            return Ok(links);
        }
    };

    let last = last_page(total, site.max_pages);
    info!(total, last, "Pages found");
    info!(page = 1, count = links.len(), "Urls gathered from page");

    for n in 2..=last {
        let url = category.page_url(n);
        let page_links = match fetcher.fetch(&url).await {
            Ok(doc) => extract_links(&doc, site),
            Err(e) => {
                warn!(page = n, %url, error = %e, gathered = links.len(), "Listing page failed; stopping pagination");
                break;
            }
        };
        let before = links.len();
        info!(page = n, count = page_links.len(), "Urls gathered from page");
        links.extend(page_links);
        info!(page = n, new = links.len() - before, total = links.len(), "Merged page links");

        pacer.pause().await;
    }

    info!(count = links.len(), "Stories found for category");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingPacer, FixtureFetcher, SITE_YAML, listing_page};

    const FIRST: &str = "https://www.bbc.com/pidgin/topics/nigeria";

    fn site(max_pages: Option<u32>) -> SiteConfig {
        let mut site = SiteConfig::from_yaml(SITE_YAML).unwrap();
        site.max_pages = max_pages;
        site
    }

    fn five_page_fetcher() -> FixtureFetcher {
        FixtureFetcher::new()
            .page(FIRST, listing_page(&["/pidgin/tori-1", "/pidgin/tori-2"], Some("5")))
            .page(&format!("{FIRST}/page/2"), listing_page(&["/pidgin/tori-2", "/pidgin/tori-3"], Some("5")))
            .page(&format!("{FIRST}/page/3"), listing_page(&["/pidgin/tori-3", "/pidgin/world-4"], Some("5")))
            .page(&format!("{FIRST}/page/4"), listing_page(&["/pidgin/sport-5"], Some("5")))
            .page(&format!("{FIRST}/page/5"), listing_page(&["/pidgin/sport-6", "/pidgin/tori-1"], Some("5")))
    }

    #[test]
    fn test_page_count_present_absent_and_bad() {
        let site = site(None);
        let with = Html::parse_document(&listing_page(&[], Some(" 12 ")));
        let without = Html::parse_document(&listing_page(&[], None));
        let bad = Html::parse_document(&listing_page(&[], Some("many")));
        assert_eq!(page_count(&with, &site).unwrap(), Some(12));
        assert_eq!(page_count(&without, &site).unwrap(), None);
        assert!(matches!(page_count(&bad, &site), Err(ScrapeError::Parse { .. })));
    }

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(5, None), 5);
        assert_eq!(last_page(5, Some(4)), 4);
        assert_eq!(last_page(2, Some(4)), 2);
    }

    #[tokio::test]
    async fn test_honours_true_total_by_default() {
        let site = site(None);
        let fetcher = five_page_fetcher();
        let pacer = CountingPacer::default();
        let links = collect_category_links(&fetcher, &pacer, &site, &site.categories[0])
            .await
            .unwrap();

        assert_eq!(
            fetcher.requested(),
            vec![
                FIRST.to_string(),
                format!("{FIRST}/page/2"),
                format!("{FIRST}/page/3"),
                format!("{FIRST}/page/4"),
                format!("{FIRST}/page/5"),
            ]
        );
        assert_eq!(links.len(), 6);
        assert_eq!(pacer.count(), 4);
    }

    #[tokio::test]
    async fn test_max_pages_caps_the_walk() {
        let site = site(Some(4));
        let fetcher = five_page_fetcher();
        let links = collect_category_links(&fetcher, &CountingPacer::default(), &site, &site.categories[0])
            .await
            .unwrap();

        assert_eq!(fetcher.requested().len(), 4);
        assert!(!fetcher.requested().contains(&format!("{FIRST}/page/5")));
        let expected = [
            "https://www.bbc.com/pidgin/sport-5",
            "https://www.bbc.com/pidgin/tori-1",
            "https://www.bbc.com/pidgin/tori-2",
            "https://www.bbc.com/pidgin/tori-3",
            "https://www.bbc.com/pidgin/world-4",
        ];
        assert_eq!(links.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn test_single_page_category() {
        let site = site(None);
        let fetcher = FixtureFetcher::new().page(FIRST, listing_page(&["/pidgin/tori-9"], None));
        let pacer = CountingPacer::default();
        let links = collect_category_links(&fetcher, &pacer, &site, &site.categories[0])
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(fetcher.requested().len(), 1);
        assert_eq!(pacer.count(), 0);
    }

    #[tokio::test]
    async fn test_bad_page_count_keeps_first_page_links() {
        let site = site(None);
        let fetcher = FixtureFetcher::new().page(FIRST, listing_page(&["/pidgin/tori-9"], Some("n/a")));
        let links = collect_category_links(&fetcher, &CountingPacer::default(), &site, &site.categories[0])
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_later_page_keeps_gathered_links() {
        let site = site(None);
        let fetcher = FixtureFetcher::new()
            .page(FIRST, listing_page(&["/pidgin/tori-1"], Some("4")))
            .page(&format!("{FIRST}/page/2"), listing_page(&["/pidgin/tori-2"], Some("4")));
        let links = collect_category_links(&fetcher, &CountingPacer::default(), &site, &site.categories[0])
            .await
            .unwrap();
        assert_eq!(links.len(), 2);
        // page 3 is missing, so page 4 is never requested
        assert_eq!(fetcher.requested().len(), 3);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_an_error() {
        let site = site(None);
        let fetcher = FixtureFetcher::new();
        let err = collect_category_links(&fetcher, &CountingPacer::default(), &site, &site.categories[0])
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
