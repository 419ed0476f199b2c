//! State module for tracking per-restaurant progress through a batch
//!
//! An empty menu and a failed one are both "no records" to callers of the
//! scrape functions; the batch keeps them apart here so the summary and the
//! logs can tell them apart.

mod extraction_state;

pub use extraction_state::ExtractionState;
