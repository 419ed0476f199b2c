//! Firefox engine over WebDriver
//!
//! geckodriver is spawned as a child process and driven with `fantoccini`.
//! The client is async; a private current-thread runtime turns every call
//! into a blocking one so the session stays strictly sequential.

use crate::browser::engine::BrowserEngine;
use crate::config::{proxy_host_port, SessionConfig};
use crate::{Result, ScrapeError, SetupError};
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::runtime::Runtime;

/// How long to keep retrying the initial WebDriver connection
const DRIVER_STARTUP_ATTEMPTS: u32 = 20;
const DRIVER_STARTUP_INTERVAL: Duration = Duration::from_millis(250);

/// geckodriver child process, killed on drop
struct DriverProcess {
    child: Child,
}

impl DriverProcess {
    fn spawn(driver: &Path, port: u16) -> std::result::Result<Self, SetupError> {
        let child = Command::new(driver)
            .arg("--port")
            .arg(port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SetupError::Launch(format!("{}: {}", driver.display(), e)))?;
        Ok(Self { child })
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Builds the WebDriver capabilities for a Firefox session
pub fn firefox_capabilities(
    config: &SessionConfig,
    binary: Option<&Path>,
) -> std::result::Result<Map<String, Value>, SetupError> {
    let mut args = vec![
        format!("--width={}", config.window_width),
        format!("--height={}", config.window_height),
    ];
    if config.headless {
        args.insert(0, "-headless".to_string());
    }

    let mut firefox_options = json!({
        "args": args,
        "prefs": {
            "dom.webdriver.enabled": false,
            "useAutomationExtension": false,
            "general.useragent.override": config.user_agent,
            "dom.webnotifications.enabled": false,
            "dom.disable_open_during_load": false,
        }
    });
    if let Some(binary) = binary {
        firefox_options["binary"] = json!(binary.to_string_lossy());
    }

    let mut caps = Map::new();
    caps.insert("moz:firefoxOptions".to_string(), firefox_options);

    if let Some(proxy) = &config.proxy {
        let host_port = proxy_host_port(proxy).map_err(|e| SetupError::Launch(e.to_string()))?;
        caps.insert(
            "proxy".to_string(),
            json!({
                "proxyType": "manual",
                "httpProxy": host_port,
                "sslProxy": host_port,
            }),
        );
    }

    Ok(caps)
}

/// Firefox session behind a locally spawned geckodriver
pub struct FirefoxEngine {
    client: Option<Client>,
    runtime: Runtime,
    url: String,
    // Declared last so the driver outlives the client during drop
    _driver: DriverProcess,
}

impl FirefoxEngine {
    /// Starts geckodriver and opens a Firefox session through it
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration (headless, proxy, window, user agent, port)
    /// * `binary` - Firefox executable; `None` lets geckodriver find one
    /// * `driver` - geckodriver executable
    pub fn launch(
        config: &SessionConfig,
        binary: Option<PathBuf>,
        driver: &Path,
    ) -> std::result::Result<Self, SetupError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let driver_process = DriverProcess::spawn(driver, config.webdriver_port)?;
        let caps = firefox_capabilities(config, binary.as_deref())?;
        let endpoint = format!("http://127.0.0.1:{}", config.webdriver_port);

        let client = runtime.block_on(async {
            let mut last_error = String::new();
            for _ in 0..DRIVER_STARTUP_ATTEMPTS {
                let mut builder = ClientBuilder::native();
                builder.capabilities(caps.clone());
                match builder.connect(&endpoint).await {
                    Ok(client) => return Ok(client),
                    Err(e) => {
                        last_error = e.to_string();
                        tokio::time::sleep(DRIVER_STARTUP_INTERVAL).await;
                    }
                }
            }
            Err(SetupError::Launch(format!(
                "could not connect to geckodriver at {}: {}",
                endpoint, last_error
            )))
        })?;

        Ok(Self {
            client: Some(client),
            runtime,
            url: String::new(),
            _driver: driver_process,
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(ScrapeError::SessionClosed)
    }
}

fn script_error(e: CmdError) -> ScrapeError {
    ScrapeError::Script(e.to_string())
}

impl BrowserEngine for FirefoxEngine {
    fn name(&self) -> &'static str {
        "firefox"
    }

    fn goto(&mut self, url: &str) -> Result<()> {
        self.url = url.to_string();
        let client = self.client()?;
        self.runtime
            .block_on(client.goto(url))
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let client = self.client()?;
        let waited = self.runtime.block_on(
            client
                .wait()
                .at_most(timeout)
                .for_element(Locator::Css(selector)),
        );

        match waited {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(ScrapeError::NavigationTimeout {
                url: self.url.clone(),
                marker: selector.to_string(),
                seconds: timeout.as_secs(),
            }),
            Err(e) => Err(ScrapeError::Navigation {
                url: self.url.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn evaluate(&mut self, expression: &str) -> Result<Value> {
        let client = self.client()?;
        let script = format!("return ({});", expression);
        self.runtime
            .block_on(client.execute(&script, vec![]))
            .map_err(script_error)
    }

    fn page_source(&mut self) -> Result<String> {
        let client = self.client()?;
        self.runtime.block_on(client.source()).map_err(script_error)
    }

    fn quit(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            self.runtime.block_on(client.close()).map_err(script_error)?;
        }
        Ok(())
    }
}
