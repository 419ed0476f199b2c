//! CSV record sink
//!
//! Records are flattened to string maps first: the scalar fields keep their
//! names and each nutrition fact becomes a `nutrition_<label>` column. The
//! header is the sorted union of every flattened key, so items without
//! nutrition data still fit the same table with blank cells.

use crate::menu::MenuItem;
use crate::output::traits::{SinkError, SinkResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Column prefix for flattened nutrition facts
pub const NUTRITION_PREFIX: &str = "nutrition_";

/// Flattens one record into column -> value
pub fn flatten(item: &MenuItem) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("restaurant".to_string(), item.restaurant.clone());
    row.insert("category".to_string(), item.category.clone());
    row.insert("name".to_string(), item.name.clone());
    row.insert("price".to_string(), item.price.clone());
    row.insert("description".to_string(), item.description.clone());
    row.insert("image_url".to_string(), item.image_url.clone());
    for (label, value) in &item.nutrition {
        row.insert(format!("{}{}", NUTRITION_PREFIX, label), value.clone());
    }
    row
}

/// Writes `items` as a CSV table
///
/// # Returns
///
/// * `Ok(())` - Header and one row per item were written
/// * `Err(SinkError::Empty)` - `items` was empty; the file was not touched
pub fn save_csv(items: &[MenuItem], path: &Path) -> SinkResult<()> {
    if items.is_empty() {
        return Err(SinkError::Empty {
            path: path.to_path_buf(),
        });
    }

    let rows: Vec<BTreeMap<String, String>> = items.iter().map(flatten).collect();
    let header: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(
            header
                .iter()
                .map(|column| row.get(*column).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush()?;
    Ok(())
}
