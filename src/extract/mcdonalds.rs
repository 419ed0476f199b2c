//! McDonald's US full menu

use crate::extract::layout::{LayoutExtractor, SiteLayout};
use crate::menu::PRICE_NA;

pub const RESTAURANT: &str = "McDonald's";
pub const MENU_URL: &str = "https://www.mcdonalds.com/us/en-us/full-menu.html";
pub const ORIGIN: &str = "https://www.mcdonalds.com";

pub const LAYOUT: SiteLayout = SiteLayout {
    category: ".category-wrapper",
    category_title: "h2",
    item: ".cmp-category-item",
    name: ".item-title",
    price: ".item-price",
    description: ".item-description",
    image: "img",
    nutrition: None,
};

/// Builds the McDonald's extractor
pub fn extractor() -> LayoutExtractor {
    LayoutExtractor::new(RESTAURANT, MENU_URL, ORIGIN, LAYOUT, PRICE_NA)
}
