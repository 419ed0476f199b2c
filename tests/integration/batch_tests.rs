//! Batch orchestration over a scripted session

use crate::common::*;
use menu_scraper::extract::ExtractorRegistry;
use menu_scraper::menu::MenuItem;
use menu_scraper::state::ExtractionState;
use menu_scraper::Coordinator;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_unknown_restaurant_does_not_affect_others() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default().page(AW_URL, aw_page(&[("Burgers", 2), ("Floats", 1)]));
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&site, &log);

    let result = coordinator.run_batch(&mut session, &names(&["A&W", "unknown-place"]));

    assert_eq!(result.state_of("A&W"), Some(ExtractionState::Succeeded));
    assert_eq!(
        result.state_of("unknown-place"),
        Some(ExtractionState::Failed)
    );
    assert_eq!(result.items_for("A&W").len(), 3);
    assert!(result.items_for("unknown-place").is_empty());

    // Combined output holds exactly the A&W items, in order
    let combined = result.combined.as_ref().unwrap();
    assert_eq!(combined.as_slice(), result.items_for("A&W"));

    // Only the known restaurant was navigated to
    assert_eq!(log.borrow().visits, vec![AW_URL.to_string()]);
    assert!(session.is_open());
}

#[test]
fn test_batch_writes_per_restaurant_and_combined_files() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("menu_data");
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), &out);
    let site = Site::default().page(AW_URL, aw_page(&[("Burgers", 2)]));
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&site, &log);

    coordinator.run_batch(&mut session, &names(&["A&W", "unknown-place"]));

    assert!(out.join("aandw_menu.json").exists());
    assert!(out.join("aandw_menu.csv").exists());
    assert!(out.join("all_restaurants_menu.json").exists());
    assert!(out.join("all_restaurants_menu.csv").exists());

    // The failed restaurant gets an empty JSON array and no CSV
    let failed = std::fs::read_to_string(out.join("unknown-place_menu.json")).unwrap();
    assert_eq!(failed.trim(), "[]");
    assert!(!out.join("unknown-place_menu.csv").exists());

    let saved: Vec<MenuItem> = serde_json::from_str(
        &std::fs::read_to_string(out.join("aandw_menu.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].image_url, "https://web.aw.ca/images/0.png");
    assert_eq!(
        saved[1].nutrition.get("Calories").map(String::as_str),
        Some("100")
    );
}

#[test]
fn test_navigation_timeout_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default()
        .page(AW_URL, aw_page(&[("Burgers", 1)]))
        .timeout(MCDONALDS_URL)
        .page(BURGER_KING_URL, burger_king_page(4));
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&site, &log);

    let result = coordinator.run_batch(
        &mut session,
        &names(&["a & w", "McDonalds", "Burger King"]),
    );

    assert_eq!(result.state_of("a & w"), Some(ExtractionState::Succeeded));
    assert_eq!(result.state_of("McDonalds"), Some(ExtractionState::Failed));
    assert_eq!(
        result.state_of("Burger King"),
        Some(ExtractionState::Succeeded)
    );
    assert_eq!(result.total_items(), 5);
    assert_eq!(result.combined.as_ref().map(Vec::len), Some(5));

    let mcdonalds = &result.runs[1];
    assert_eq!(mcdonalds.extractor_id, Some("mcdonalds"));
    assert!(mcdonalds.error.as_deref().unwrap().contains("Timed out"));
    assert_eq!(log.borrow().visits.len(), 3);
}

#[test]
fn test_menu_without_items_is_empty_not_failed() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default().page(BURGER_KING_URL, burger_king_page(0));
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&site, &log);

    let result = coordinator.run_batch(&mut session, &names(&["Burger King"]));

    assert_eq!(result.state_of("Burger King"), Some(ExtractionState::Empty));
    assert!(result.runs[0].error.is_none());
    // A single restaurant produces no combined output
    assert!(result.combined.is_none());
    assert!(!temp_dir.path().join("all_restaurants_menu.json").exists());
}

#[test]
fn test_page_missing_structure_fails() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default().page(
        MCDONALDS_URL,
        "<html><body><p>We're updating our menu</p></body></html>".to_string(),
    );
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&site, &log);

    let result = coordinator.run_batch(&mut session, &names(&["mcdonald's"]));

    assert_eq!(result.state_of("mcdonald's"), Some(ExtractionState::Failed));
    assert!(result.items_for("mcdonald's").is_empty());
}

#[test]
fn test_scrape_restaurant_unknown_name() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let log = Rc::new(RefCell::new(Log::default()));
    let mut session = scripted_session(&Site::default(), &log);

    let result = coordinator.scrape_restaurant(&mut session, "Taco Palace");

    assert!(matches!(
        result,
        Err(menu_scraper::ScrapeError::UnknownRestaurant(_))
    ));
    assert!(log.borrow().visits.is_empty());
}

#[test]
fn test_session_closed_once_when_dropped_after_batch() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ExtractorRegistry::with_defaults();
    let coordinator = Coordinator::new(&registry, loader_config(), temp_dir.path());
    let site = Site::default().timeout(AW_URL);
    let log = Rc::new(RefCell::new(Log::default()));

    {
        let mut session = scripted_session(&site, &log);
        coordinator.run_batch(&mut session, &names(&["A&W"]));
    }

    assert_eq!(log.borrow().quits, 1);
}
