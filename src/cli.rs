//! Command-line interface definitions.
//!
//! Flag names use underscores (`--output_file_name`, `--no_of_articles`)
//! to stay compatible with existing invocations.

use crate::pacing::Pacing;
use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the corpus scraper.
///
/// # Examples
///
/// ```sh
/// # Everything with defaults: all categories, 100 articles, 10s delay
/// pidgin_corpus
///
/// # Two categories, no delay, 20 articles
/// pidgin_corpus --categories nigeria,sport --time_delay false --no_of_articles 20
///
/// # Visit at most four listing pages per category
/// pidgin_corpus --max_pages 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Name of the output CSV file
    #[arg(long = "output_file_name", default_value = "bbc_pidgin_corpus.csv")]
    pub output_file_name: PathBuf,

    /// Comma-separated category names, or `all`
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub categories: Vec<String>,

    /// Pause between requests to spare the origin server
    #[arg(
        long = "time_delay",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub time_delay: bool,

    /// Number of articles to write before stopping
    #[arg(
        long = "no_of_articles",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub no_of_articles: u64,

    /// Path to the site configuration YAML
    #[arg(short, long, default_value = "env.yml")]
    pub config: PathBuf,

    /// Length of the pause in seconds when `--time_delay` is on
    #[arg(long = "delay_secs", default_value_t = 10)]
    pub delay_secs: u64,

    /// Highest listing page to visit per category (default: every page)
    #[arg(long = "max_pages", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Extra attempts for a request that failed with a transient error
    #[arg(long = "max_retries", default_value_t = 2)]
    pub max_retries: usize,

    /// Initial retry backoff in milliseconds (doubles per attempt)
    #[arg(long = "retry_base_ms", default_value_t = 1000)]
    pub retry_base_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long = "timeout_secs", default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

impl Cli {
    /// Delay strategy selected by `--time_delay` and `--delay_secs`.
    pub fn pacing(&self) -> Pacing {
        Pacing::from_flag(self.time_delay, Duration::from_secs(self.delay_secs))
    }

    pub fn max_rows(&self) -> usize {
        usize::try_from(self.no_of_articles).unwrap_or(usize::MAX)
    }

    pub fn retry_base(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
