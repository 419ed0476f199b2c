use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Restaurants scraped when none are requested explicitly
pub const DEFAULT_RESTAURANTS: &[&str] = &["A&W", "McDonalds", "Burger King"];

/// Desktop Chrome user agent presented to menu sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for the menu scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Restaurant names to scrape, free-form and case-insensitive
    #[serde(default)]
    pub restaurants: Vec<String>,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns the requested restaurants, or the default set when none are configured
    pub fn restaurants_or_default(&self) -> Vec<String> {
        if self.restaurants.is_empty() {
            DEFAULT_RESTAURANTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.restaurants.clone()
        }
    }
}

/// Browser engine backing a rendering session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Chrome or Chromium driven over the DevTools protocol
    #[default]
    Chrome,
    /// Firefox driven through geckodriver
    Firefox,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Firefox => write!(f, "firefox"),
        }
    }
}

/// Rendering session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub engine: EngineKind,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Upstream proxy, either a URL or a bare `host:port`
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "window-width", default = "default_window_width")]
    pub window_width: u32,

    #[serde(rename = "window-height", default = "default_window_height")]
    pub window_height: u32,

    /// Upper bound on the wait for a site's ready marker (seconds)
    #[serde(rename = "page-load-timeout-secs", default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,

    /// Lower bound of the random pause after the ready marker appears (milliseconds)
    #[serde(rename = "settle-delay-min-ms", default = "default_settle_min")]
    pub settle_delay_min_ms: u64,

    /// Upper bound of the random pause after the ready marker appears (milliseconds)
    #[serde(rename = "settle-delay-max-ms", default = "default_settle_max")]
    pub settle_delay_max_ms: u64,

    /// Port geckodriver listens on (Firefox only)
    #[serde(rename = "webdriver-port", default = "default_webdriver_port")]
    pub webdriver_port: u16,

    /// Explicit browser executable, skipping discovery
    #[serde(rename = "browser-path", default)]
    pub browser_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            headless: true,
            proxy: None,
            user_agent: default_user_agent(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            page_load_timeout_secs: default_page_load_timeout(),
            settle_delay_min_ms: default_settle_min(),
            settle_delay_max_ms: default_settle_max(),
            webdriver_port: default_webdriver_port(),
            browser_path: None,
        }
    }
}

/// Full-page loader configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Pause between scrolling and re-measuring the document (milliseconds)
    #[serde(rename = "scroll-pause-ms", default = "default_scroll_pause")]
    pub scroll_pause_ms: u64,

    /// Hard cap on scroll passes for pages that never stop growing
    #[serde(rename = "max-scroll-passes", default = "default_max_scroll_passes")]
    pub max_scroll_passes: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            scroll_pause_ms: default_scroll_pause(),
            max_scroll_passes: default_max_scroll_passes(),
        }
    }
}

/// Retry policy for the single-source runner
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts (seconds)
    #[serde(rename = "backoff-secs", default = "default_backoff")]
    pub backoff_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `<name>_menu.json` and `<name>_menu.csv`
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory receiving one timestamped log file per run
    #[serde(default = "default_log_dir")]
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_page_load_timeout() -> u64 {
    15
}

fn default_settle_min() -> u64 {
    2000
}

fn default_settle_max() -> u64 {
    4000
}

fn default_webdriver_port() -> u16 {
    4444
}

fn default_scroll_pause() -> u64 {
    1000
}

fn default_max_scroll_passes() -> u32 {
    50
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff() -> u64 {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("menu_data")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
