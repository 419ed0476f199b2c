//! Record sink traits and types
//!
//! A sink persists one sequence of [`MenuItem`] records to a path. Sink
//! failures are reported to the caller but never touch the in-memory records
//! already returned by extraction.

use crate::menu::MenuItem;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("No records to write to {}", path.display())]
    Empty { path: PathBuf },
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// A persisted format for menu records
pub trait RecordSink {
    /// File extension written by this sink, without the dot
    fn extension(&self) -> &'static str;

    /// Writes `items` to `path`, replacing any previous content
    ///
    /// # Arguments
    ///
    /// * `items` - Records to write
    /// * `path` - Target file; its parent directory must exist
    fn save(&self, items: &[MenuItem], path: &Path) -> SinkResult<()>;
}

/// Indented JSON array, nested nutrition kept as an object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

/// Flat CSV table with one `nutrition_<label>` column per nutrition fact
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl RecordSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn save(&self, items: &[MenuItem], path: &Path) -> SinkResult<()> {
        super::json::save_json(items, path)
    }
}

impl RecordSink for CsvSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn save(&self, items: &[MenuItem], path: &Path) -> SinkResult<()> {
        super::csv::save_csv(items, path)
    }
}
