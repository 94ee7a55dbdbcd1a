//! CSV corpus writer.
//!
//! Rows are written as they are scraped so a long run leaves a usable file
//! behind even when it is interrupted. The writer stops as soon as the
//! requested number of rows is reached.

use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::models::{CORPUS_HEADER, CategoryLinks};
use crate::pacing::Pacer;
use crate::scrapers::article::extract_article;
use crate::utils::truncate_for_log;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

fn finish(mut writer: Writer<File>, written: usize) -> Result<usize, ScrapeError> {
    writer.flush()?;
    Ok(written)
}

/// Scrape every link and write one row per article with a body.
///
/// Categories are processed in the given order. Links that fail to fetch or
/// yield no body are skipped. Returns the number of rows written, which never
/// exceeds `max_rows`.
///
/// # Errors
///
/// Creating or writing the output file, or compiling a category's selectors.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), max_rows = max_rows))]
pub async fn write_corpus<F, P>(
    path: impl AsRef<Path>,
    max_rows: usize,
    categories: &[CategoryLinks<'_>],
    fetcher: &F,
    pacer: &P,
) -> Result<usize, ScrapeError>
where
    F: PageFetcher,
    P: Pacer,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    writer.write_record(CORPUS_HEADER)?;
    info!("Writing articles to file...");

    let mut written = 0usize;
    if max_rows == 0 {
        return finish(writer, written);
    }

    for entry in categories {
        let category = entry.category;
        let selectors = category.selectors()?;
        info!(category = %category.name, links = entry.links.len(), "Writing articles for category");

        for url in &entry.links {
            let record = match fetcher.fetch(url).await {
                Ok(doc) => extract_article(&doc, &selectors, url, &category.name),
                Err(e) => {
                    error!(%url, error = %e, "Article fetch failed; skipping");
                    pacer.pause().await;
                    continue;
                }
            };

            match record.into_row() {
                Some(row) => {
                    debug!(%url, preview = %truncate_for_log(&row.paragraph, 120), "Extracted story");
                    writer.serialize(&row)?;
                    written += 1;
                    info!(story = written, "Successfully wrote story");
                }
                None => warn!(%url, "No story text found; skipping"),
            }

            if written == max_rows {
                info!(max_rows, "Requested total number of articles reached");
                info!(total = written, "Scraping done");
                return finish(writer, written);
            }

            pacer.pause().await;
        }
    }

    info!(total = written, "Scraping done");
    finish(writer, written)
}
