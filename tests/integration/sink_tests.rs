//! Record sink behavior on realistic record mixes

use menu_scraper::menu::MenuItem;
use menu_scraper::output::{save_csv, save_json, SinkError};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn item(name: &str, nutrition: &[(&str, &str)]) -> MenuItem {
    MenuItem {
        restaurant: "A&W".to_string(),
        category: "Burgers".to_string(),
        name: name.to_string(),
        price: "Price not available online".to_string(),
        description: String::new(),
        image_url: String::new(),
        nutrition: nutrition
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn test_heterogeneous_csv_has_sorted_union_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("aandw_menu.csv");
    let items = vec![
        item("Teen Burger", &[("Calories", "550"), ("Fat", "31 g")]),
        item("Onion Rings", &[]),
        item("Root Beer", &[("Sugar", "40 g")]),
    ];

    save_csv(&items, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        header,
        vec![
            "category",
            "description",
            "image_url",
            "name",
            "nutrition_Calories",
            "nutrition_Fat",
            "nutrition_Sugar",
            "price",
            "restaurant",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.len(), header.len());
    }
    // Onion Rings has no nutrition facts: blank cells
    assert_eq!(&rows[1][3], "Onion Rings");
    assert_eq!(&rows[1][4], "");
    assert_eq!(&rows[1][6], "");
    assert_eq!(&rows[2][6], "40 g");
}

#[test]
fn test_empty_csv_reports_failure_without_creating_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nothing_menu.csv");

    let result = save_csv(&[], &path);

    assert!(matches!(result, Err(SinkError::Empty { .. })));
    assert!(!path.exists());
}

#[test]
fn test_json_keeps_nutrition_nested() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("aandw_menu.json");

    save_json(&[item("Teen Burger", &[("Calories", "550")])], &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value[0]["nutrition"]["Calories"], "550");
    assert!(value[0].get("nutrition_Calories").is_none());
}

#[test]
fn test_outputs_are_overwritten_each_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("aandw_menu.json");

    save_json(&[item("Old", &[]), item("Older", &[])], &path).unwrap();
    save_json(&[item("New", &[])], &path).unwrap();

    let saved: Vec<MenuItem> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "New");
}
