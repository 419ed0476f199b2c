//! Browser and driver executable discovery
//!
//! Each engine has a ranked list of well-known install locations covering
//! Linux, macOS and Windows. Those are probed first; if none exists the
//! executable names are looked up on `PATH`.

use crate::config::EngineKind;
use crate::SetupError;
use std::env;
use std::path::{Path, PathBuf};

const CHROME_PATHS: &[&str] = &[
    // Linux
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium-browser",
    "/usr/bin/chromium",
    // macOS
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    // Windows
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
];

const CHROME_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

const FIREFOX_PATHS: &[&str] = &[
    // Linux
    "/usr/bin/firefox",
    "/usr/bin/firefox-esr",
    "/usr/lib/firefox/firefox",
    "/snap/bin/firefox",
    // macOS
    "/Applications/Firefox.app/Contents/MacOS/firefox",
    // Windows
    r"C:\Program Files\Mozilla Firefox\firefox.exe",
    r"C:\Program Files (x86)\Mozilla Firefox\firefox.exe",
];

const FIREFOX_NAMES: &[&str] = &["firefox", "firefox-esr"];

const GECKODRIVER_PATHS: &[&str] = &[
    "/usr/local/bin/geckodriver",
    "/usr/bin/geckodriver",
    "/opt/homebrew/bin/geckodriver",
];

/// Returns the ranked install paths probed for an engine
pub fn known_install_paths(engine: EngineKind) -> &'static [&'static str] {
    match engine {
        EngineKind::Chrome => CHROME_PATHS,
        EngineKind::Firefox => FIREFOX_PATHS,
    }
}

/// Returns the executable names looked up on `PATH` for an engine
pub fn path_names(engine: EngineKind) -> &'static [&'static str] {
    match engine {
        EngineKind::Chrome => CHROME_NAMES,
        EngineKind::Firefox => FIREFOX_NAMES,
    }
}

/// Locates the browser executable for an engine
///
/// # Returns
///
/// * `Ok(PathBuf)` - First known install path that exists, else first `PATH` hit
/// * `Err(SetupError::EngineNotFound)` - Nothing was found
pub fn find_engine_binary(engine: EngineKind) -> Result<PathBuf, SetupError> {
    find_binary_in(
        known_install_paths(engine),
        path_names(engine),
        env::var_os("PATH").as_deref(),
    )
    .map(|path| {
        tracing::info!("Found {} binary at {}", engine, path.display());
        path
    })
    .ok_or_else(|| SetupError::EngineNotFound {
        engine: engine.to_string(),
        searched: known_install_paths(engine)
            .iter()
            .chain(path_names(engine))
            .map(|s| s.to_string())
            .collect(),
    })
}

/// Locates the geckodriver executable that fronts Firefox
pub fn find_geckodriver() -> Result<PathBuf, SetupError> {
    find_binary_in(
        GECKODRIVER_PATHS,
        &["geckodriver"],
        env::var_os("PATH").as_deref(),
    )
    .ok_or_else(|| SetupError::DriverNotFound("geckodriver".to_string()))
}

/// Probes `candidates` in order, then each of `names` in every `path_var` entry
pub fn find_binary_in(
    candidates: &[&str],
    names: &[&str],
    path_var: Option<&std::ffi::OsStr>,
) -> Option<PathBuf> {
    if let Some(found) = candidates
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
    {
        return Some(found.to_path_buf());
    }

    let path_var = path_var?;
    for name in names {
        for dir in env::split_paths(path_var) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            if cfg!(windows) {
                let exe = candidate.with_extension("exe");
                if exe.is_file() {
                    return Some(exe);
                }
            }
        }
    }

    None
}
