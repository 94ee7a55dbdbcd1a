//! Error type shared by the fetch, crawl and output stages.
//!
//! Missing headlines or bodies are not errors: an article without a usable
//! body comes back as an [`ArticleRecord`](crate::models::ArticleRecord)
//! whose `body` is `None` and is skipped by the writer.

use thiserror::Error;

/// All failures the crawler can report.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("expected a 2xx response from {url} but got {status}")]
    Status { url: String, status: u16 },

    /// A page element was found but its content could not be interpreted.
    #[error("could not parse {what} from {text:?}")]
    Parse { what: &'static str, text: String },

    /// A configured class string does not form a valid CSS selector.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    /// The site configuration is incomplete or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// True for the transport and status failures of a single request.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Http { .. } | ScrapeError::Status { .. })
    }

    /// True when repeating the same request could plausibly succeed.
    ///
    /// Transport failures and 5xx statuses qualify; 4xx statuses do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScrapeError::Http { .. } => true,
            ScrapeError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
