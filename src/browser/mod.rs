//! Browser module for rendering JavaScript-driven menu pages
//!
//! This module contains everything that talks to a real browser:
//! - Executable discovery for each supported engine
//! - The Chrome (DevTools) and Firefox (WebDriver) engines
//! - The rendering session wrapping whichever engine was chosen
//! - The full-page loader that forces lazy content to render

mod chrome;
pub mod discovery;
mod engine;
mod firefox;
mod loader;
mod session;

pub use chrome::ChromeEngine;
pub use engine::BrowserEngine;
pub use firefox::{firefox_capabilities, FirefoxEngine};
pub use loader::load_full_page;
pub use session::RenderingSession;
