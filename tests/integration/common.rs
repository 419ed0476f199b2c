//! Scripted browser engine and page fixtures shared by the integration tests

use menu_scraper::browser::BrowserEngine;
use menu_scraper::config::{LoaderConfig, SessionConfig};
use menu_scraper::{RenderingSession, ScrapeError};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

pub const AW_URL: &str = "https://web.aw.ca/en/our-menu";
pub const MCDONALDS_URL: &str = "https://www.mcdonalds.com/us/en-us/full-menu.html";
pub const BURGER_KING_URL: &str = "https://www.bk.com/menu";

/// What the scripted engine observed, shared across sessions
#[derive(Debug, Default)]
pub struct Log {
    pub visits: Vec<String>,
    pub quits: u32,
}

/// Serves fixed HTML per URL; URLs listed in `timeouts` never render
#[derive(Clone, Default)]
pub struct Site {
    pub pages: HashMap<String, String>,
    pub timeouts: HashSet<String>,
}

impl Site {
    pub fn page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.timeouts.insert(url.to_string());
        self
    }
}

struct ScriptedEngine {
    site: Site,
    log: Rc<RefCell<Log>>,
    current: Option<String>,
}

impl BrowserEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn goto(&mut self, url: &str) -> menu_scraper::Result<()> {
        self.log.borrow_mut().visits.push(url.to_string());
        self.current = Some(url.to_string());
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> menu_scraper::Result<()> {
        let url = self.current.clone().unwrap_or_default();
        if self.site.timeouts.contains(&url) || !self.site.pages.contains_key(&url) {
            return Err(ScrapeError::NavigationTimeout {
                url,
                marker: selector.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        Ok(())
    }

    fn evaluate(&mut self, _expression: &str) -> menu_scraper::Result<Value> {
        // Fixture pages never grow
        Ok(json!(1200))
    }

    fn page_source(&mut self) -> menu_scraper::Result<String> {
        let url = self.current.clone().unwrap_or_default();
        Ok(self
            .site
            .pages
            .get(&url)
            .cloned()
            .unwrap_or_else(|| "<html></html>".to_string()))
    }

    fn quit(&mut self) -> menu_scraper::Result<()> {
        self.log.borrow_mut().quits += 1;
        Ok(())
    }
}

/// Session settings with no settle delay
pub fn session_config() -> SessionConfig {
    SessionConfig {
        settle_delay_min_ms: 0,
        settle_delay_max_ms: 0,
        ..SessionConfig::default()
    }
}

pub fn loader_config() -> LoaderConfig {
    LoaderConfig {
        scroll_pause_ms: 0,
        max_scroll_passes: 5,
    }
}

/// Opens a session over `site`, recording into `log`
pub fn scripted_session(site: &Site, log: &Rc<RefCell<Log>>) -> RenderingSession {
    let engine = ScriptedEngine {
        site: site.clone(),
        log: Rc::clone(log),
        current: None,
    };
    RenderingSession::from_engine(Box::new(engine), &session_config())
}

/// A&W page in the category-container markup
pub fn aw_page(categories: &[(&str, usize)]) -> String {
    let mut html = String::from("<html><body>");
    for (title, count) in categories {
        html.push_str(r#"<div class="menu-category-container">"#);
        html.push_str(&format!(r#"<h2 class="menu-category-title">{}</h2>"#, title));
        for i in 0..*count {
            html.push_str(&format!(
                r#"<div class="menu-item">
                    <h3 class="menu-item-title">{title} {i}</h3>
                    <img src="/images/{i}.png">
                    <div class="nutrition-info">
                        <div class="nutrition-item"><span class="nutrition-key">Calories</span><span class="nutrition-value">{i}00</span></div>
                    </div>
                </div>"#
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

/// Burger King page with the given number of items in one category
pub fn burger_king_page(items: usize) -> String {
    let mut html = String::from(
        r#"<html><body><div class="menuPage_menuCategory__Qbda1"><h2>Whoppers</h2>"#,
    );
    for i in 0..items {
        html.push_str(&format!(
            r#"<div class="menuItem_wrapper__X_zY_"><span class="menuItem_name__on_cM">Whopper {i}</span></div>"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}
