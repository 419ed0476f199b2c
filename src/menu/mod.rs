//! Canonical menu item schema
//!
//! Every extractor produces [`MenuItem`] records regardless of how the source
//! site lays out its markup. Fields that cannot be read from the page are
//! filled with the sentinels defined here instead of being omitted.

mod item;

pub use item::{
    output_stem, resolve_image_url, MenuItem, COMBINED_STEM, NO_DESCRIPTION, NO_IMAGE, PRICE_NA,
    PRICE_NOT_ONLINE, UNCATEGORIZED, UNKNOWN_NAME,
};
