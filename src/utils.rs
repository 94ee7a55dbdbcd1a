//! Small helpers shared across the crawler.
//!
//! - Building CSS selectors out of the space-separated class strings the
//!   site configuration uses
//! - Truncating long strings for log lines
//! - Validating the output location before any network work starts

use crate::error::ScrapeError;
use itertools::Itertools;
use scraper::Selector;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Build a selector matching `tag` elements that carry every class in `classes`.
///
/// The configuration stores class attributes verbatim, e.g.
/// `"lx-pagination__page-number qa-pagination-total-page-number"`, which
/// becomes `span.lx-pagination__page-number.qa-pagination-total-page-number`.
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] when `classes` is blank or one of the
/// class names is not a valid CSS identifier.
///
/// # Examples
///
/// ```ignore
/// let sel = class_selector("h1", "bbc-1gvgk hl")?;
/// ```
pub fn class_selector(tag: &str, classes: &str) -> Result<Selector, ScrapeError> {
    let names = classes.split_whitespace().collect::<Vec<_>>();
    if names.is_empty() {
        return Err(ScrapeError::Selector {
            selector: tag.to_string(),
            reason: "no class names given".into(),
        });
    }

    let css = format!("{}.{}", tag, names.iter().join("."));
    Selector::parse(&css).map_err(|e| ScrapeError::Selector {
        selector: css.clone(),
        reason: e.to_string(),
    })
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Creates missing parent directories, then writes and removes a scratch file
/// next to the target.
///
/// # Errors
///
/// Returns the underlying IO error if the directory cannot be created or
/// written to.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ensure_writable_parent(path: &Path) -> Result<(), ScrapeError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir)?;

    let scratch = dir.join("..__write_check__");
    fs::File::create(&scratch)?;
    let _ = fs::remove_file(&scratch);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
