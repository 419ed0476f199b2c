//! Scrape module: batch orchestration over one rendering session
//!
//! This module contains:
//! - The batch coordinator (navigate, load, extract, save per restaurant)
//! - The single-restaurant retry runner

mod coordinator;
mod retry;

pub use coordinator::{run, BatchResult, Coordinator, RestaurantRun};
pub use retry::{scrape_with_retry, RetryPolicy};
