//! Full-page loader
//!
//! Menu sites lazily render sections as they scroll into view. The loader
//! scrolls to the bottom, waits, and re-measures the document until two
//! consecutive heights match.

use crate::browser::session::RenderingSession;
use crate::config::LoaderConfig;
use crate::Result;
use std::time::Duration;

/// Scrolls the active page until its height stops changing
///
/// # Arguments
///
/// * `session` - Session with a page already loaded
/// * `config` - Pause between passes and the pass cap
///
/// # Returns
///
/// * `Ok(passes)` - Number of scroll-and-measure passes performed; a page
///   without dynamic content converges after exactly one
/// * `Err(ScrapeError)` - A script call failed
pub fn load_full_page(session: &mut RenderingSession, config: &LoaderConfig) -> Result<u32> {
    let pause = Duration::from_millis(config.scroll_pause_ms);
    let mut last_height = session.scroll_height()?;
    let mut passes = 0;

    loop {
        session.scroll_to_bottom()?;
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
        passes += 1;

        let new_height = session.scroll_height()?;
        if new_height == last_height {
            tracing::debug!(
                "Page height converged at {}px after {} pass(es)",
                new_height,
                passes
            );
            return Ok(passes);
        }

        if passes >= config.max_scroll_passes {
            tracing::warn!(
                "Page still growing after {} scroll passes ({}px), extracting what is loaded",
                passes,
                new_height
            );
            return Ok(passes);
        }

        last_height = new_height;
    }
}
