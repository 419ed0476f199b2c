//! Single-restaurant retry runner

use crate::common::*;
use menu_scraper::extract::ExtractorRegistry;
use menu_scraper::scrape::{scrape_with_retry, RetryPolicy};
use menu_scraper::{Coordinator, ScrapeError, SetupError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

fn no_backoff() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff: Duration::ZERO,
    }
}

#[test]
fn test_succeeds_on_second_attempt() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let flaky = Site::default().timeout(BURGER_KING_URL);
    let healthy = Site::default().page(BURGER_KING_URL, burger_king_page(3));
    let log = Rc::new(RefCell::new(Log::default()));
    let opens = Cell::new(0);

    let items = scrape_with_retry(
        || {
            opens.set(opens.get() + 1);
            let site = if opens.get() == 1 { &flaky } else { &healthy };
            Ok(scripted_session(site, &log))
        },
        &coordinator,
        "Burger King",
        &no_backoff(),
    )
    .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(opens.get(), 2);
    // Every attempt's session was closed
    assert_eq!(log.borrow().quits, 2);
    assert!(temp_dir.path().join("burger_king_menu.csv").exists());
}

#[test]
fn test_exhausted_retries_return_last_error() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default().timeout(AW_URL);
    let log = Rc::new(RefCell::new(Log::default()));
    let opens = Cell::new(0);

    let result = scrape_with_retry(
        || {
            opens.set(opens.get() + 1);
            Ok(scripted_session(&site, &log))
        },
        &coordinator,
        "A&W",
        &no_backoff(),
    );

    assert!(matches!(result, Err(ScrapeError::NavigationTimeout { .. })));
    assert_eq!(opens.get(), 3);
    assert_eq!(log.borrow().quits, 3);
    // Nothing is saved for a failed single run
    assert!(!temp_dir.path().join("aandw_menu.json").exists());
}

#[test]
fn test_setup_failures_are_retried() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let opens = Cell::new(0);

    let result = scrape_with_retry(
        || {
            opens.set(opens.get() + 1);
            Err(SetupError::Launch("no display".to_string()))
        },
        &coordinator,
        "McDonalds",
        &RetryPolicy {
            max_attempts: 2,
            backoff: Duration::ZERO,
        },
    );

    assert!(matches!(result, Err(ScrapeError::Setup(_))));
    assert_eq!(opens.get(), 2);
}

#[test]
fn test_unknown_restaurant_never_opens_a_session() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let opens = Cell::new(0);

    let result = scrape_with_retry(
        || {
            opens.set(opens.get() + 1);
            Err(SetupError::Launch("unreachable".to_string()))
        },
        &coordinator,
        "Wendy's",
        &no_backoff(),
    );

    assert!(matches!(result, Err(ScrapeError::UnknownRestaurant(_))));
    assert_eq!(opens.get(), 0);
}

#[test]
fn test_extraction_failure_is_not_retried() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    // Renders fine but has none of the menu structure
    let site = Site::default().page(
        MCDONALDS_URL,
        "<html><body><p>Menu unavailable</p></body></html>".to_string(),
    );
    let log = Rc::new(RefCell::new(Log::default()));
    let opens = Cell::new(0);

    let result = scrape_with_retry(
        || {
            opens.set(opens.get() + 1);
            Ok(scripted_session(&site, &log))
        },
        &coordinator,
        "McDonalds",
        &no_backoff(),
    );

    assert!(matches!(result, Err(ScrapeError::Extraction(_))));
    assert_eq!(opens.get(), 1);
    assert_eq!(log.borrow().quits, 1);
}
