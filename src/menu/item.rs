use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Name used when an item has no readable title
pub const UNKNOWN_NAME: &str = "Unknown";

/// Category used when a category block has no readable title
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Price used by sites that publish prices only in-store or in-app
pub const PRICE_NOT_ONLINE: &str = "Price not available online";

/// Price used by sites whose price element is simply missing
pub const PRICE_NA: &str = "N/A";

/// Description used when an item has none
pub const NO_DESCRIPTION: &str = "";

/// Image URL used when an item has no image
pub const NO_IMAGE: &str = "";

/// File stem for the concatenated all-restaurants output
pub const COMBINED_STEM: &str = "all_restaurants";

/// A single dish as published on a restaurant's menu page
///
/// Prices are displayed strings, not parsed currency, and may hold a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub restaurant: String,
    pub category: String,
    pub name: String,
    pub price: String,
    pub description: String,
    /// Always absolute, or empty
    pub image_url: String,
    /// Flattened nutrition table, label -> value
    #[serde(default)]
    pub nutrition: BTreeMap<String, String>,
}

/// Makes an image `src` attribute absolute against the site's origin
///
/// Root-relative paths (`/img/x.png`) and other relative forms are joined onto
/// `origin`; URLs that already carry a scheme, and `data:` URIs, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use menu_scraper::menu::resolve_image_url;
///
/// assert_eq!(
///     resolve_image_url("/images/burger.png", "https://web.aw.ca"),
///     "https://web.aw.ca/images/burger.png"
/// );
/// assert_eq!(
///     resolve_image_url("https://cdn.example.com/a.png", "https://web.aw.ca"),
///     "https://cdn.example.com/a.png"
/// );
/// ```
pub fn resolve_image_url(src: &str, origin: &str) -> String {
    let src = src.trim();

    if src.is_empty() {
        return NO_IMAGE.to_string();
    }

    if src.starts_with("data:") || Url::parse(src).is_ok() {
        return src.to_string();
    }

    match Url::parse(origin).and_then(|base| base.join(src)) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => format!("{}{}", origin.trim_end_matches('/'), src),
    }
}

/// Derives the output file stem from a requested restaurant name
///
/// Lowercases, turns spaces into underscores and `&` into `and`,
/// so `"A&W"` becomes `"aandw"` and `"Burger King"` becomes `"burger_king"`.
/// Path separators and `..` become underscores, keeping the file inside the
/// output directory.
pub fn output_stem(restaurant: &str) -> String {
    restaurant
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('&', "and")
        .replace(['/', '\\'], "_")
        .replace("..", "_")
}
