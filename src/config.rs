//! Site configuration loaded from YAML at startup.
//!
//! The file describes one news site: its origin, the path prefixes that mark
//! article links, the class of the total-page-count element on listing pages,
//! and the categories to crawl. Category order in the file is preserved and
//! drives the order rows are written in.
//!
//! ```yaml
//! base_url: https://www.bbc.com
//! link_prefixes: [/pidgin/tori, /pidgin/world, /pidgin/sport]
//! page_count_class: lx-pagination__page-number qa-pagination-total-page-number
//! headline_class: bbc-1gvgk0z e1yj3cbb0
//! story_class: bbc-19j92fr ebmt73l0
//! categories:
//!   nigeria:
//!     url: https://www.bbc.com/pidgin/topics/c2dwqd1zr92t
//!   sport:
//!     url: https://www.bbc.com/pidgin/topics/cjgn7gv77vrt
//!     story_class: some-other-class
//! ```

use crate::error::ScrapeError;
use crate::scrapers::article::ArticleSelectors;
use crate::utils::class_selector;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};
use url::Url;

/// The file layout before defaults are resolved.
#[derive(Debug, Deserialize)]
struct RawSiteConfig {
    base_url: String,
    link_prefixes: Vec<String>,
    page_count_class: String,
    #[serde(default)]
    max_pages: Option<u32>,
    #[serde(default)]
    headline_class: Option<String>,
    #[serde(default)]
    story_class: Option<String>,
    categories: serde_yaml::Mapping,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    url: String,
    #[serde(default)]
    headline_class: Option<String>,
    #[serde(default)]
    story_class: Option<String>,
}

/// One crawlable category with every selector resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    /// Category name as written in the config file.
    pub name: String,
    /// First listing page. Later pages live at `{url}/page/{n}`.
    pub url: String,
    /// Class attribute of the `h1` headline.
    pub headline_class: String,
    /// Class attribute of the `div` story containers.
    pub story_class: String,
}

impl CategoryConfig {
    /// Compile the headline and story selectors for this category.
    pub fn selectors(&self) -> Result<ArticleSelectors, ScrapeError> {
        ArticleSelectors::new(&self.headline_class, &self.story_class)
    }

    /// URL of listing page `n` (1-based).
    pub fn page_url(&self, n: u32) -> String {
        if n <= 1 {
            self.url.clone()
        } else {
            format!("{}/page/{}", self.url.trim_end_matches('/'), n)
        }
    }
}

/// Immutable description of the site being crawled.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Origin that relative article links are resolved against.
    pub base_url: Url,
    /// An article href must start with one of these.
    pub link_prefixes: Vec<String>,
    /// Class attribute of the `span` holding the total page count.
    pub page_count_class: String,
    /// Optional cap on the highest listing page visited.
    pub max_pages: Option<u32>,
    /// Categories in file order.
    pub categories: Vec<CategoryConfig>,
}

impl SiteConfig {
    /// Read and validate a config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ScrapeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&text)?;
        info!(
            categories = config.categories.len(),
            prefixes = config.link_prefixes.len(),
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        let raw: RawSiteConfig = serde_yaml::from_str(text)?;

        let base_url = Url::parse(&raw.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ScrapeError::Config(format!(
                "base_url {} cannot be used to resolve links",
                raw.base_url
            )));
        }

        let link_prefixes = raw
            .link_prefixes
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        if link_prefixes.is_empty() {
            return Err(ScrapeError::Config("link_prefixes must not be empty".into()));
        }

        class_selector("span", &raw.page_count_class)?;

        if raw.max_pages == Some(0) {
            return Err(ScrapeError::Config("max_pages must be at least 1".into()));
        }

        let mut categories = Vec::with_capacity(raw.categories.len());
        for (key, value) in raw.categories {
            let name = key
                .as_str()
                .ok_or_else(|| ScrapeError::Config(format!("category key {:?} is not a string", key)))?
                .to_string();
            let entry: RawCategory = serde_yaml::from_value(value)?;

            Url::parse(&entry.url).map_err(|e| {
                ScrapeError::Config(format!("category {} has invalid url {}: {}", name, entry.url, e))
            })?;

            let headline_class = entry
                .headline_class
                .or_else(|| raw.headline_class.clone())
                .ok_or_else(|| ScrapeError::Config(format!("category {} has no headline_class", name)))?;
            let story_class = entry
                .story_class
                .or_else(|| raw.story_class.clone())
                .ok_or_else(|| ScrapeError::Config(format!("category {} has no story_class", name)))?;

            let category = CategoryConfig {
                name,
                url: entry.url,
                headline_class,
                story_class,
            };
            category.selectors()?;
            debug!(name = %category.name, url = %category.url, "Configured category");
            categories.push(category);
        }

        if categories.is_empty() {
            return Err(ScrapeError::Config("no categories configured".into()));
        }

        Ok(SiteConfig {
            base_url,
            link_prefixes,
            page_count_class: raw.page_count_class,
            max_pages: raw.max_pages,
            categories,
        })
    }

    /// Look up a category by name, ignoring ASCII case.
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a selection of names into configured categories.
    ///
    /// An empty selection, or the single name `all`, selects every category
    /// in file order. Otherwise the given order is kept, names are trimmed,
    /// and blank or repeated names are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] naming the first unknown category.
    pub fn select(&self, names: &[String]) -> Result<Vec<&CategoryConfig>, ScrapeError> {
        let names = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>();
        if names.is_empty() || (names.len() == 1 && names[0].eq_ignore_ascii_case("all")) {
            return Ok(self.categories.iter().collect());
        }

        let mut selected: Vec<&CategoryConfig> = Vec::with_capacity(names.len());
        for name in names {
            let category = self.category(name).ok_or_else(|| {
                let known = self.categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
                ScrapeError::Config(format!("unknown category {:?}; known: {}", name, known.join(", ")))
            })?;
            if !selected.iter().any(|c| c.name == category.name) {
                selected.push(category);
            }
        }
        Ok(selected)
    }
}
