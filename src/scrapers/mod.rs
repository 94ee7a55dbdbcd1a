//! Category crawling and article extraction.
//!
//! The crawl runs in two phases per category:
//!
//! 1. **Indexing** ([`paginator`] + [`links`]): walk the listing pages and
//!    collect the set of article URLs
//! 2. **Extraction** ([`article`]): pull the headline and story text out of
//!    each article page
//!
//! Failed fetches are logged and skipped; they never abort the run.

pub mod article;
pub mod links;
pub mod paginator;
