//! Courtesy delays between requests.
//!
//! The crawler calls [`Pacer::pause`] after each additional listing page and
//! after each article. Runs with `--time_delay false` and the tests use
//! [`Pacing::Off`].

use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Strategy for waiting between network calls.
pub trait Pacer {
    async fn pause(&self);
}

/// Built-in delay strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Never wait.
    Off,
    /// Sleep for a constant interval.
    Fixed(Duration),
}

impl Pacing {
    /// `Fixed(delay)` when `enabled` and `delay` is non-zero, `Off` otherwise.
    pub fn from_flag(enabled: bool, delay: Duration) -> Self {
        if enabled && !delay.is_zero() {
            Pacing::Fixed(delay)
        } else {
            Pacing::Off
        }
    }
}

impl Pacer for Pacing {
    async fn pause(&self) {
        if let Pacing::Fixed(delay) = self {
            debug!(?delay, "Pausing between requests");
            sleep(*delay).await;
        }
    }
}
