//! Menu Scraper: restaurant menus from JavaScript-rendered sites
//!
//! This crate drives a headless browser through a small, fixed set of known
//! restaurant sites, maps each rendered page onto a canonical [`MenuItem`]
//! schema, and writes the results as JSON and CSV.

pub mod browser;
pub mod config;
pub mod extract;
pub mod logging;
pub mod menu;
pub mod output;
pub mod scrape;
pub mod state;

use thiserror::Error;

/// Main error type for menu scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Browser setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Timed out after {seconds}s waiting for '{marker}' on {url}")]
    NavigationTimeout {
        url: String,
        marker: String,
        seconds: u64,
    },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("No extractor registered for restaurant '{0}'")]
    UnknownRestaurant(String),

    #[error("Rendering session is already closed")]
    SessionClosed,
}

impl ScrapeError {
    /// Returns true if a fresh attempt with a new session may succeed
    ///
    /// Browser and page-load failures are transient. A selector that no longer
    /// matches the page, or a name with no extractor, fails the same way every
    /// time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Setup(_)
                | Self::NavigationTimeout { .. }
                | Self::Navigation { .. }
                | Self::Script(_)
                | Self::SessionClosed
        )
    }
}

/// Errors raised while obtaining a browser engine
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No {engine} installation found (searched: {})", searched.join(", "))]
    EngineNotFound {
        engine: String,
        searched: Vec<String>,
    },

    #[error("WebDriver executable '{0}' not found")]
    DriverNotFound(String),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to start driver runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors raised when a page no longer matches a site's expected structure
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("{restaurant} page has no '{marker}' elements")]
    MissingStructure { restaurant: String, marker: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid proxy address: {0}")]
    InvalidProxy(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::{load_full_page, RenderingSession};
pub use config::Config;
pub use extract::{ExtractorRegistry, MenuExtractor};
pub use menu::MenuItem;
pub use scrape::{BatchResult, Coordinator};
pub use state::ExtractionState;
