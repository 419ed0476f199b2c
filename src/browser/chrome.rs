//! Chrome/Chromium engine over the DevTools protocol

use crate::browser::engine::BrowserEngine;
use crate::config::SessionConfig;
use crate::{Result, ScrapeError, SetupError};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Browser process kept alive between navigations
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(300);

/// Chrome launch flags beyond headless/sandbox/window size
fn launch_args(config: &SessionConfig) -> Vec<String> {
    vec![
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-notifications".to_string(),
        "--disable-popup-blocking".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        format!("--user-agent={}", config.user_agent),
    ]
}

/// Headless Chrome session holding one tab
pub struct ChromeEngine {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    url: String,
}

impl ChromeEngine {
    /// Launches Chrome and opens a tab
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration (headless, proxy, window, user agent)
    /// * `binary` - Executable to run; `None` lets the driver use its own lookup
    pub fn launch(config: &SessionConfig, binary: Option<PathBuf>) -> std::result::Result<Self, SetupError> {
        let args = launch_args(config);
        let arg_refs: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(false)
            .window_size(Some((config.window_width, config.window_height)))
            .path(binary)
            .proxy_server(config.proxy.as_deref())
            .idle_browser_timeout(IDLE_BROWSER_TIMEOUT)
            .args(arg_refs)
            .build()
            .map_err(|e| SetupError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| SetupError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SetupError::Launch(e.to_string()))?;
        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(|e| SetupError::Launch(e.to_string()))?;

        Ok(Self {
            browser: Some(browser),
            tab,
            url: String::new(),
        })
    }
}

impl BrowserEngine for ChromeEngine {
    fn name(&self) -> &'static str {
        "chrome"
    }

    fn goto(&mut self, url: &str) -> Result<()> {
        self.url = url.to_string();
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| {
                tracing::debug!("Wait for '{}' failed: {}", selector, e);
                ScrapeError::NavigationTimeout {
                    url: self.url.clone(),
                    marker: selector.to_string(),
                    seconds: timeout.as_secs(),
                }
            })?;
        Ok(())
    }

    fn evaluate(&mut self, expression: &str) -> Result<serde_json::Value> {
        let remote = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| ScrapeError::Script(e.to_string()))?;
        Ok(remote.value.unwrap_or(serde_json::Value::Null))
    }

    fn page_source(&mut self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::Script(e.to_string()))
    }

    fn quit(&mut self) -> Result<()> {
        // Dropping the Browser kills the child process
        self.browser.take();
        Ok(())
    }
}
