//! Site extractors
//!
//! Each supported restaurant gets an extractor that knows its menu URL, the
//! element that signals the menu has rendered, and how to turn the rendered
//! HTML into [`MenuItem`] records. Extractors never touch the browser; they
//! only parse HTML.

pub mod aw;
pub mod burger_king;
mod layout;
pub mod mcdonalds;
mod registry;
pub mod select;

pub use aw::AwExtractor;
pub use layout::{LayoutExtractor, NutritionLayout, SiteLayout};
pub use registry::ExtractorRegistry;

use crate::menu::MenuItem;
use crate::ExtractionError;

/// Turns one site's rendered menu page into records
pub trait MenuExtractor: Send + Sync {
    /// Display name stamped on every record
    fn restaurant(&self) -> &'static str;

    /// Page holding the full menu
    fn menu_url(&self) -> &'static str;

    /// CSS selector whose presence means the menu has rendered
    fn ready_marker(&self) -> &'static str;

    /// Parses rendered HTML into records
    ///
    /// Missing sub-elements never fail an item; they take the documented
    /// sentinel values instead. An error means the page had none of the
    /// expected structure at all.
    fn extract(&self, html: &str) -> Result<Vec<MenuItem>, ExtractionError>;
}
