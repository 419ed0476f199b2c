//! Rendering session: one headless browser for the lifetime of a run
//!
//! The session owns whichever [`BrowserEngine`] was selected at construction
//! and is the only way the rest of the crate touches a browser. It is released
//! on [`RenderingSession::close`] and again, idempotently, on drop, so every
//! exit path from a run terminates the browser process.

use crate::browser::chrome::ChromeEngine;
use crate::browser::discovery::{find_engine_binary, find_geckodriver};
use crate::browser::engine::BrowserEngine;
use crate::browser::firefox::FirefoxEngine;
use crate::config::{EngineKind, SessionConfig};
use crate::{Result, ScrapeError, SetupError};
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

const SCROLL_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";
const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// Headless browser session used to obtain fully rendered pages
pub struct RenderingSession {
    engine: Option<Box<dyn BrowserEngine>>,
    page_load_timeout: Duration,
    settle_delay: (Duration, Duration),
}

impl RenderingSession {
    /// Launches the configured engine
    ///
    /// The executable comes from `browser-path` when set, otherwise from
    /// discovery. A failed discovery is logged and the engine's own default
    /// lookup is tried; only if that launch also fails is a [`SetupError`]
    /// returned.
    ///
    /// # Returns
    ///
    /// * `Ok(RenderingSession)` - Browser is running with one open tab
    /// * `Err(SetupError)` - No usable engine could be started
    pub fn open(config: &SessionConfig) -> std::result::Result<Self, SetupError> {
        tracing::info!(
            "Initializing {} session (headless: {}, proxy: {})",
            config.engine,
            config.headless,
            config.proxy.as_deref().unwrap_or("none")
        );

        let binary = resolve_binary(config);

        let engine: Box<dyn BrowserEngine> = match config.engine {
            EngineKind::Chrome => Box::new(ChromeEngine::launch(config, binary)?),
            EngineKind::Firefox => {
                let driver = find_geckodriver()?;
                Box::new(FirefoxEngine::launch(config, binary, &driver)?)
            }
        };

        tracing::info!("{} session initialized successfully", engine.name());
        Ok(Self::from_engine(engine, config))
    }

    /// Wraps an already running engine
    pub fn from_engine(engine: Box<dyn BrowserEngine>, config: &SessionConfig) -> Self {
        Self {
            engine: Some(engine),
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs),
            settle_delay: (
                Duration::from_millis(config.settle_delay_min_ms),
                Duration::from_millis(config.settle_delay_max_ms),
            ),
        }
    }

    /// Returns true until the session has been closed
    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    fn engine(&mut self) -> Result<&mut Box<dyn BrowserEngine>> {
        self.engine.as_mut().ok_or(ScrapeError::SessionClosed)
    }

    /// Loads `url` and waits for the `ready_marker` element
    ///
    /// After the marker appears the session pauses for a random settle delay
    /// so late scripts can finish rendering.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Marker is present
    /// * `Err(ScrapeError::NavigationTimeout)` - Marker never appeared within the page-load timeout
    pub fn navigate(&mut self, url: &str, ready_marker: &str) -> Result<()> {
        let timeout = self.page_load_timeout;
        let settle = self.pick_settle_delay();
        let engine = self.engine()?;

        tracing::info!("Navigating to {}", url);
        let loaded = engine
            .goto(url)
            .and_then(|_| engine.wait_for(ready_marker, timeout));

        match loaded {
            Ok(()) => {
                tracing::info!("Menu page loaded successfully: {}", url);
                if !settle.is_zero() {
                    std::thread::sleep(settle);
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Navigation to {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    fn pick_settle_delay(&self) -> Duration {
        let (min, max) = self.settle_delay;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    /// Evaluates a script expression in the current page
    pub fn evaluate(&mut self, expression: &str) -> Result<serde_json::Value> {
        self.engine()?.evaluate(expression)
    }

    /// Measures the current document height in pixels
    pub fn scroll_height(&mut self) -> Result<u64> {
        let value = self.evaluate(SCROLL_HEIGHT_SCRIPT)?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|h| h.max(0.0) as u64))
            .ok_or_else(|| ScrapeError::Script(format!("scrollHeight was not a number: {}", value)))
    }

    /// Scrolls the window to the current bottom of the document
    pub fn scroll_to_bottom(&mut self) -> Result<()> {
        self.evaluate(SCROLL_TO_BOTTOM_SCRIPT).map(|_| ())
    }

    /// Returns the current DOM serialization
    pub fn rendered_html(&mut self) -> Result<String> {
        self.engine()?.page_source()
    }

    /// Terminates the browser process
    ///
    /// Safe to call repeatedly; later calls do nothing.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            match engine.quit() {
                Ok(()) => tracing::info!("{} session closed", engine.name()),
                Err(e) => tracing::warn!("Error closing {} session: {}", engine.name(), e),
            }
        }
    }
}

impl Drop for RenderingSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Picks the executable for the configured engine, if one can be found
fn resolve_binary(config: &SessionConfig) -> Option<PathBuf> {
    if let Some(path) = &config.browser_path {
        return Some(path.clone());
    }

    match find_engine_binary(config.engine) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("{}; falling back to default engine discovery", e);
            None
        }
    }
}
