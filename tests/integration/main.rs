//! Integration tests for the menu scraper
//!
//! No real browser is started: the orchestrator runs against a scripted
//! in-memory engine serving fixture HTML, and output goes to temp dirs.

mod batch_tests;
mod common;
mod retry_tests;
mod sink_tests;
