use crate::config::types::{Config, LoaderConfig, RetryConfig, SessionConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_session_config(&config.session)?;
    validate_loader_config(&config.loader)?;
    validate_retry_config(&config.retry)?;

    if config.output.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.logging.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "logging directory cannot be empty".to_string(),
        ));
    }

    if config.restaurants.iter().any(|r| r.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "restaurant names cannot be blank".to_string(),
        ));
    }

    Ok(())
}

/// Validates rendering session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.page_load_timeout_secs < 1 || config.page_load_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "page_load_timeout_secs must be between 1 and 120, got {}",
            config.page_load_timeout_secs
        )));
    }

    if config.settle_delay_min_ms > config.settle_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "settle_delay_min_ms ({}) must not exceed settle_delay_max_ms ({})",
            config.settle_delay_min_ms, config.settle_delay_max_ms
        )));
    }

    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if let Some(proxy) = &config.proxy {
        proxy_host_port(proxy)?;
    }

    Ok(())
}

/// Validates full-page loader configuration
fn validate_loader_config(config: &LoaderConfig) -> Result<(), ConfigError> {
    if config.max_scroll_passes < 1 {
        return Err(ConfigError::Validation(format!(
            "max_scroll_passes must be >= 1, got {}",
            config.max_scroll_passes
        )));
    }
    Ok(())
}

/// Validates the retry policy
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }
    Ok(())
}

/// Reduces a proxy address to the `host:port` form WebDriver proxy capabilities expect
///
/// Accepts either a URL (`http://proxy.local:3128`) or a bare `host:port` pair.
///
/// # Examples
///
/// ```
/// use menu_scraper::config::proxy_host_port;
///
/// assert_eq!(proxy_host_port("http://10.0.0.5:3128").unwrap(), "10.0.0.5:3128");
/// assert_eq!(proxy_host_port("proxy.local:8080").unwrap(), "proxy.local:8080");
/// ```
pub fn proxy_host_port(proxy: &str) -> Result<String, ConfigError> {
    let proxy = proxy.trim();

    if proxy.contains("://") {
        let url = Url::parse(proxy)
            .map_err(|e| ConfigError::InvalidProxy(format!("'{}': {}", proxy, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| ConfigError::InvalidProxy(format!("'{}' has no host", proxy)))?;
        return Ok(match url.port_or_known_default() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        });
    }

    match proxy.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
            Ok(proxy.to_string())
        }
        _ => Err(ConfigError::InvalidProxy(format!(
            "'{}' is neither a URL nor host:port",
            proxy
        ))),
    }
}
