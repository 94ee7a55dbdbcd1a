//! # pidgin_corpus
//!
//! Builds a text corpus from a news site's category pages: walks each
//! category's paginated listing, collects article links, pulls the headline
//! and story text out of every article and writes them to a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! pidgin_corpus --config env.yml --categories nigeria,sport --no_of_articles 500
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: load the site YAML and resolve the selected categories
//! 2. **Indexing**: gather each category's article links across listing pages
//! 3. **Extraction + Output**: scrape articles in order and append rows until
//!    the requested count is reached
//!
//! Requests run one at a time with an optional fixed pause between them.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pacing;
mod scrapers;
#[cfg(test)]
mod test_support;
mod utils;

use cli::Cli;
use config::SiteConfig;
use fetch::{HttpFetcher, RetryFetch};
use models::CategoryLinks;
use outputs::corpus::write_corpus;
use scrapers::paginator::collect_category_links;
use utils::ensure_writable_parent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("--------------------------------------");
    info!("Starting scraping...");
    info!("--------------------------------------");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut site = match SiteConfig::load(&args.config) {
        Ok(site) => site,
        Err(e) => {
            error!(path = %args.config.display(), error = %e, "Could not load site configuration");
            return Err(e.into());
        }
    };
    if args.max_pages.is_some() {
        site.max_pages = args.max_pages;
    }
    let selected = site.select(&args.categories)?;
    info!(
        categories = ?selected.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        max_pages = ?site.max_pages,
        "Categories selected"
    );

    if let Err(e) = ensure_writable_parent(&args.output_file_name) {
        error!(
            path = %args.output_file_name.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let fetcher = RetryFetch::new(HttpFetcher::new(args.timeout())?, args.max_retries, args.retry_base());
    let pacer = args.pacing();
    debug!(?fetcher, ?pacer, "Network settings");

    // ---- Index links per category ----
    let mut categories = Vec::with_capacity(selected.len());
    for category in selected {
        info!(category = %category.name, "Getting all stories for category...");
        match collect_category_links(&fetcher, &pacer, &site, category).await {
            Ok(links) => {
                info!(category = %category.name, count = links.len(), "Stories found for category");
                categories.push(CategoryLinks { category, links });
            }
            Err(e) if e.is_network() => {
                warn!(category = %category.name, error = %e, "Category listing unreachable; skipping category");
            }
            Err(e) => {
                error!(category = %category.name, error = %e, "Category listing failed; skipping category");
            }
        }
    }

    let total_links = categories.iter().map(|c| c.links.len()).sum::<usize>();
    info!(total_links, "Indexing complete");

    // ---- Scrape and write ----
    let written = write_corpus(
        &args.output_file_name,
        args.max_rows(),
        &categories,
        &fetcher,
        &pacer,
    )
    .await?;

    let elapsed = start_time.elapsed();
    info!(
        written,
        path = %args.output_file_name.display(),
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
