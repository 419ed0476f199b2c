//! Selector-table driven extraction
//!
//! Most menu sites nest item cards inside titled category blocks. A
//! [`SiteLayout`] names the selectors for one such site and
//! [`LayoutExtractor`] walks any page with that shape.

use crate::extract::select::{attr_of, compile, text_of, text_or};
use crate::extract::MenuExtractor;
use crate::menu::{resolve_image_url, MenuItem, NO_DESCRIPTION, UNCATEGORIZED, UNKNOWN_NAME};
use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Key/value nutrition table nested in an item card
#[derive(Debug, Clone, Copy)]
pub struct NutritionLayout {
    /// Table container within the item
    pub table: &'static str,
    /// One row within the table
    pub row: &'static str,
    /// Label cell within a row
    pub key: &'static str,
    /// Value cell within a row
    pub value: &'static str,
}

/// CSS selectors describing one site's menu markup
#[derive(Debug, Clone, Copy)]
pub struct SiteLayout {
    /// Top-level category blocks
    pub category: &'static str,
    /// Category title within a block
    pub category_title: &'static str,
    /// Item cards within a block
    pub item: &'static str,
    /// Item name within a card
    pub name: &'static str,
    /// Item price within a card
    pub price: &'static str,
    /// Item description within a card
    pub description: &'static str,
    /// Item image within a card (its `src` is read)
    pub image: &'static str,
    pub nutrition: Option<NutritionLayout>,
}

/// Compiled item-level selectors, shared with extractors that find
/// categories some other way
pub(crate) struct ItemSelectors {
    name: Selector,
    price: Selector,
    description: Selector,
    image: Selector,
    nutrition: Option<(Selector, Selector, Selector, Selector)>,
}

impl ItemSelectors {
    pub(crate) fn compile(
        name: &str,
        price: &str,
        description: &str,
        image: &str,
        nutrition: Option<&NutritionLayout>,
    ) -> Result<Self, ExtractionError> {
        let nutrition = match nutrition {
            Some(n) => Some((
                compile(n.table)?,
                compile(n.row)?,
                compile(n.key)?,
                compile(n.value)?,
            )),
            None => None,
        };

        Ok(Self {
            name: compile(name)?,
            price: compile(price)?,
            description: compile(description)?,
            image: compile(image)?,
            nutrition,
        })
    }

    /// Builds one record from an item card, defaulting every missing field
    pub(crate) fn read_item(
        &self,
        item: ElementRef<'_>,
        restaurant: &str,
        category: &str,
        origin: &str,
        price_sentinel: &str,
    ) -> MenuItem {
        let image_url = attr_of(item, &self.image, "src")
            .map(|src| resolve_image_url(&src, origin))
            .unwrap_or_default();

        MenuItem {
            restaurant: restaurant.to_string(),
            category: category.to_string(),
            name: text_or(item, &self.name, UNKNOWN_NAME),
            price: text_or(item, &self.price, price_sentinel),
            description: text_or(item, &self.description, NO_DESCRIPTION),
            image_url,
            nutrition: self.read_nutrition(item),
        }
    }

    fn read_nutrition(&self, item: ElementRef<'_>) -> BTreeMap<String, String> {
        let mut facts = BTreeMap::new();
        let Some((table, row, key, value)) = &self.nutrition else {
            return facts;
        };

        if let Some(table) = item.select(table).next() {
            for fact in table.select(row) {
                // Rows missing either cell are skipped, not guessed
                if let (Some(k), Some(v)) = (text_of(fact, key), text_of(fact, value)) {
                    facts.insert(k, v);
                }
            }
        }
        facts
    }
}

/// Extractor for any site whose markup matches a [`SiteLayout`]
#[derive(Debug, Clone)]
pub struct LayoutExtractor {
    restaurant: &'static str,
    menu_url: &'static str,
    origin: &'static str,
    layout: SiteLayout,
    price_sentinel: &'static str,
}

impl LayoutExtractor {
    /// # Arguments
    ///
    /// * `restaurant` - Display name stamped on every record
    /// * `menu_url` - Page holding the full menu
    /// * `origin` - Scheme and host used to absolutize image paths
    /// * `layout` - The site's selectors
    /// * `price_sentinel` - Price recorded when an item shows none
    pub const fn new(
        restaurant: &'static str,
        menu_url: &'static str,
        origin: &'static str,
        layout: SiteLayout,
        price_sentinel: &'static str,
    ) -> Self {
        Self {
            restaurant,
            menu_url,
            origin,
            layout,
            price_sentinel,
        }
    }

    /// Extracts from an already parsed document
    pub fn extract_document(&self, document: &Html) -> Result<Vec<MenuItem>, ExtractionError> {
        let layout = &self.layout;
        let category_sel = compile(layout.category)?;
        let title_sel = compile(layout.category_title)?;
        let item_sel = compile(layout.item)?;
        let fields = ItemSelectors::compile(
            layout.name,
            layout.price,
            layout.description,
            layout.image,
            layout.nutrition.as_ref(),
        )?;

        let categories: Vec<ElementRef<'_>> = document.select(&category_sel).collect();
        if categories.is_empty() {
            return Err(ExtractionError::MissingStructure {
                restaurant: self.restaurant.to_string(),
                marker: layout.category.to_string(),
            });
        }
        tracing::info!(
            "Found {} menu categories for {}",
            categories.len(),
            self.restaurant
        );

        let mut items = Vec::new();
        for category in categories {
            let label = text_of(category, &title_sel).unwrap_or_else(|| UNCATEGORIZED.to_string());
            let before = items.len();

            for card in category.select(&item_sel) {
                items.push(fields.read_item(
                    card,
                    self.restaurant,
                    &label,
                    self.origin,
                    self.price_sentinel,
                ));
            }

            tracing::info!(
                "Category '{}': {} items",
                label,
                items.len() - before
            );
        }

        Ok(items)
    }
}

impl MenuExtractor for LayoutExtractor {
    fn restaurant(&self) -> &'static str {
        self.restaurant
    }

    fn menu_url(&self) -> &'static str {
        self.menu_url
    }

    fn ready_marker(&self) -> &'static str {
        self.layout.category
    }

    fn extract(&self, html: &str) -> Result<Vec<MenuItem>, ExtractionError> {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }
}
