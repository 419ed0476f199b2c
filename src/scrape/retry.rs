//! Single-restaurant runner with whole-sequence retries
//!
//! Each attempt opens a fresh session, scrapes, and closes the session again,
//! so a browser left in a bad state by one attempt never leaks into the next.

use crate::browser::RenderingSession;
use crate::config::RetryConfig;
use crate::menu::MenuItem;
use crate::scrape::Coordinator;
use crate::{Result, ScrapeError, SetupError};
use std::time::Duration;

/// How many times to attempt a scrape and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(5),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_secs(config.backoff_secs),
        }
    }
}

/// Scrapes `name`, retrying the whole open -> navigate -> extract sequence
///
/// Records are saved only once an attempt succeeds. Names with no registered
/// extractor fail immediately, without opening a browser, and an error that
/// is not [retryable](ScrapeError::is_retryable) ends the run at once.
///
/// # Arguments
///
/// * `open` - Opens a fresh rendering session for each attempt
/// * `coordinator` - Resolves the name, scrapes, and saves
/// * `name` - Restaurant to scrape
/// * `policy` - Attempt bound and backoff
///
/// # Returns
///
/// * `Ok(Vec<MenuItem>)` - Records from the first successful attempt
/// * `Err(ScrapeError)` - The error from the last attempt once all attempts failed
pub fn scrape_with_retry<F>(
    mut open: F,
    coordinator: &Coordinator<'_>,
    name: &str,
    policy: &RetryPolicy,
) -> Result<Vec<MenuItem>>
where
    F: FnMut() -> std::result::Result<RenderingSession, SetupError>,
{
    if coordinator.registry().resolve(name).is_none() {
        let error = ScrapeError::UnknownRestaurant(name.to_string());
        tracing::error!("{}", error);
        return Err(error);
    }

    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        tracing::info!("Attempt {}/{} for {}", attempt, max_attempts, name);

        let outcome = open().map_err(ScrapeError::from).and_then(|mut session| {
            let scraped = coordinator.scrape_restaurant(&mut session, name);
            session.close();
            scraped
        });

        match outcome {
            Ok(items) => {
                tracing::info!(
                    "Scraped {} items from {} on attempt {}",
                    items.len(),
                    name,
                    attempt
                );
                coordinator.save(&items, name);
                return Ok(items);
            }
            Err(e) if attempt < max_attempts && e.is_retryable() => {
                tracing::warn!(
                    "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                    attempt,
                    max_attempts,
                    name,
                    e,
                    policy.backoff
                );
                if !policy.backoff.is_zero() {
                    std::thread::sleep(policy.backoff);
                }
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(
                    "Giving up on {} after {} attempt(s): {}",
                    name,
                    attempt,
                    e
                );
                return Err(e);
            }
        }
    }
}
