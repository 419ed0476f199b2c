//! Configuration module for the menu scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file at all) yields the
//! defaults the scraper was tuned with.
//!
//! # Example
//!
//! ```no_run
//! use menu_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Page load timeout: {}s", config.session.page_load_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EngineKind, LoaderConfig, LoggingConfig, OutputConfig, RetryConfig, SessionConfig,
    DEFAULT_RESTAURANTS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{proxy_host_port, validate};
