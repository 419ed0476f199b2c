//! Browser engine capability trait
//!
//! A rendering session only needs five things from a browser: load a URL,
//! wait for an element, evaluate a script expression, read back the DOM, and
//! shut down. Each engine implements exactly that, so nothing above this
//! layer branches on which browser is running.

use crate::Result;
use std::time::Duration;

/// Minimal browser capability set shared by all engines
pub trait BrowserEngine {
    /// Short engine name for log lines
    fn name(&self) -> &'static str;

    /// Loads `url` in the active tab
    fn goto(&mut self, url: &str) -> Result<()>;

    /// Blocks until an element matching the CSS `selector` exists
    ///
    /// Must fail with [`crate::ScrapeError::NavigationTimeout`] once `timeout` elapses.
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Evaluates a JavaScript expression and returns its JSON value
    ///
    /// `undefined` results come back as `Value::Null`.
    fn evaluate(&mut self, expression: &str) -> Result<serde_json::Value>;

    /// Serializes the current DOM
    fn page_source(&mut self) -> Result<String>;

    /// Terminates the browser process; called at most once
    fn quit(&mut self) -> Result<()>;
}
