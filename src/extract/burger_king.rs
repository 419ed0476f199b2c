//! Burger King US menu
//!
//! The class names carry build hashes (`__Qbda1`) and change whenever the
//! site is redeployed.

use crate::extract::layout::{LayoutExtractor, SiteLayout};
use crate::menu::PRICE_NA;

pub const RESTAURANT: &str = "Burger King";
pub const MENU_URL: &str = "https://www.bk.com/menu";
pub const ORIGIN: &str = "https://www.bk.com";

pub const LAYOUT: SiteLayout = SiteLayout {
    category: ".menuPage_menuCategory__Qbda1",
    category_title: "h2",
    item: ".menuItem_wrapper__X_zY_",
    name: ".menuItem_name__on_cM",
    price: ".menuItem_price__TPsSC",
    description: ".menuItem_description__i5zkV",
    image: "img",
    nutrition: None,
};

/// Builds the Burger King extractor
pub fn extractor() -> LayoutExtractor {
    LayoutExtractor::new(RESTAURANT, MENU_URL, ORIGIN, LAYOUT, PRICE_NA)
}
