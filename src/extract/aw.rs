//! A&W Canada
//!
//! The menu page at web.aw.ca has shipped two markups. The category-container
//! markup (titled blocks of `.menu-item` cards, with a nutrition table per
//! item) is the authoritative contract. Older builds of the page instead list
//! category names in a `.category-menu` nav and tag each section with a CSS
//! class derived from that name; that markup is only consulted when no
//! category container exists, and the two are never merged.
//!
//! The derived class is a known fragility: if the site renames a category
//! without renaming its class, that category silently yields no items.

use crate::extract::layout::{ItemSelectors, LayoutExtractor, NutritionLayout, SiteLayout};
use crate::extract::select::{compile, element_text};
use crate::extract::MenuExtractor;
use crate::menu::{MenuItem, PRICE_NOT_ONLINE};
use crate::ExtractionError;
use scraper::{ElementRef, Html};

pub const RESTAURANT: &str = "A&W";
pub const MENU_URL: &str = "https://web.aw.ca/en/our-menu";
pub const ORIGIN: &str = "https://web.aw.ca";

pub const LAYOUT: SiteLayout = SiteLayout {
    category: ".menu-category-container",
    category_title: ".menu-category-title",
    item: ".menu-item",
    name: ".menu-item-title",
    price: ".menu-item-price",
    description: ".menu-item-desc",
    image: "img",
    nutrition: Some(NutritionLayout {
        table: ".nutrition-info",
        row: ".nutrition-item",
        key: ".nutrition-key",
        value: ".nutrition-value",
    }),
};

/// Category labels in the older navigation markup
const NAV_LABELS: &str = ".category-menu a";
const NAV_ITEM: &str = ".item";
const NAV_NAME: &str = ".item-name h3";
const NAV_PRICE: &str = ".item-price";
const NAV_DESCRIPTION: &str = ".item-description";

/// Matches either markup, so navigation succeeds for both
const READY_MARKER: &str = ".menu-category-container, .category-menu";

/// Derives the section class the nav markup uses for a category label
///
/// Spaces become hyphens, `&` becomes `and`, apostrophes are dropped and the
/// result is lowercased: `"Burgers & Chicken"` -> `"burgers-and-chicken"`.
pub fn category_class(label: &str) -> String {
    label
        .replace(' ', "-")
        .replace('&', "and")
        .replace('\'', "")
        .to_lowercase()
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Elements carrying `class` that are not nested inside another such element
///
/// Cards below nested same-class sections are then visited exactly once.
fn outermost_with_class<'a>(candidates: &[ElementRef<'a>], class: &str) -> Vec<ElementRef<'a>> {
    candidates
        .iter()
        .filter(|el| has_class(el, class))
        .filter(|el| {
            !el.ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| has_class(&ancestor, class))
        })
        .copied()
        .collect()
}

/// A&W extractor
#[derive(Debug, Clone)]
pub struct AwExtractor {
    primary: LayoutExtractor,
}

impl AwExtractor {
    pub fn new() -> Self {
        Self {
            primary: LayoutExtractor::new(RESTAURANT, MENU_URL, ORIGIN, LAYOUT, PRICE_NOT_ONLINE),
        }
    }

    fn extract_nav_markup(&self, document: &Html) -> Result<Vec<MenuItem>, ExtractionError> {
        let label_sel = compile(NAV_LABELS)?;
        let item_sel = compile(NAV_ITEM)?;
        let section_sel = compile("[class]")?;
        let fields = ItemSelectors::compile(NAV_NAME, NAV_PRICE, NAV_DESCRIPTION, "img", None)?;

        let labels: Vec<String> = document
            .select(&label_sel)
            .filter_map(element_text)
            .collect();
        if labels.is_empty() {
            return Err(ExtractionError::MissingStructure {
                restaurant: RESTAURANT.to_string(),
                marker: READY_MARKER.to_string(),
            });
        }
        tracing::info!("Found {} menu categories: {:?}", labels.len(), labels);

        // Every classed element is a candidate section; selected once for all labels
        let candidates: Vec<ElementRef<'_>> = document.select(&section_sel).collect();

        let mut items = Vec::new();
        for label in &labels {
            let class = category_class(label);
            let before = items.len();

            for section in outermost_with_class(&candidates, &class) {
                for card in section.select(&item_sel) {
                    items.push(fields.read_item(card, RESTAURANT, label, ORIGIN, PRICE_NOT_ONLINE));
                }
            }
            tracing::info!(
                "Category '{}' (.{}): {} items",
                label,
                class,
                items.len() - before
            );
        }

        Ok(items)
    }
}

impl Default for AwExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuExtractor for AwExtractor {
    fn restaurant(&self) -> &'static str {
        RESTAURANT
    }

    fn menu_url(&self) -> &'static str {
        MENU_URL
    }

    fn ready_marker(&self) -> &'static str {
        READY_MARKER
    }

    fn extract(&self, html: &str) -> Result<Vec<MenuItem>, ExtractionError> {
        let document = Html::parse_document(html);
        match self.primary.extract_document(&document) {
            Err(ExtractionError::MissingStructure { .. }) => {
                tracing::debug!("No category containers on A&W page, reading nav markup");
                self.extract_nav_markup(&document)
            }
            other => other,
        }
    }
}
