//! End-of-run statistics
//!
//! This module summarizes a finished batch and prints the summary to stdout.

use crate::scrape::BatchResult;
use crate::state::ExtractionState;
use std::collections::HashMap;

/// Batch statistics summary
#[derive(Debug, Clone)]
pub struct BatchStatistics {
    /// Number of restaurants requested
    pub total_restaurants: u64,

    /// Records extracted across all restaurants
    pub total_items: u64,

    /// Count of restaurants by final state
    pub restaurants_by_state: HashMap<ExtractionState, u64>,

    /// (name, state, item count, error) per restaurant, in request order
    pub per_restaurant: Vec<(String, ExtractionState, usize, Option<String>)>,

    /// Size of the combined output, when one was produced
    pub combined_items: Option<usize>,
}

impl BatchStatistics {
    /// Builds statistics from a finished batch
    pub fn from_batch(result: &BatchResult) -> Self {
        let mut restaurants_by_state = HashMap::new();
        for run in &result.runs {
            *restaurants_by_state.entry(run.state).or_insert(0) += 1;
        }

        Self {
            total_restaurants: result.runs.len() as u64,
            total_items: result.total_items() as u64,
            restaurants_by_state,
            per_restaurant: result
                .runs
                .iter()
                .map(|run| (run.name.clone(), run.state, run.items.len(), run.error.clone()))
                .collect(),
            combined_items: result.combined.as_ref().map(Vec::len),
        }
    }

    /// Percentage of restaurants that yielded at least one record
    pub fn success_rate(&self) -> f64 {
        if self.total_restaurants == 0 {
            return 0.0;
        }
        let succeeded = self
            .restaurants_by_state
            .get(&ExtractionState::Succeeded)
            .copied()
            .unwrap_or(0);
        (succeeded as f64 / self.total_restaurants as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Scrape Summary ===\n");

    println!("Restaurants:");
    for (name, state, items, error) in &stats.per_restaurant {
        match error {
            Some(message) => println!("  {}: {} ({})", name, state, message),
            None => println!("  {}: {} ({} items)", name, state, items),
        }
    }
    println!();

    println!("Overview:");
    println!("  Restaurants requested: {}", stats.total_restaurants);
    println!("  Total items: {}", stats.total_items);
    if let Some(combined) = stats.combined_items {
        println!("  Combined output: {} items", combined);
    }
    println!();

    let succeeded = stats
        .restaurants_by_state
        .get(&ExtractionState::Succeeded)
        .unwrap_or(&0);
    println!(
        "Success Rate: {:.1}% ({} / {} restaurants with items)",
        stats.success_rate(),
        succeeded,
        stats.total_restaurants
    );
}
