//! Output module: the record sink and the end-of-run summary
//!
//! This module handles:
//! - Writing records as JSON and as flattened CSV
//! - Naming and placing the per-restaurant and combined output files
//! - Printing a per-restaurant summary after a batch

mod csv;
mod json;
pub mod stats;
mod traits;

pub use self::csv::{flatten, save_csv, NUTRITION_PREFIX};
pub use self::json::save_json;
pub use stats::{print_statistics, BatchStatistics};
pub use traits::{CsvSink, JsonSink, RecordSink, SinkError, SinkResult};

use crate::menu::MenuItem;
use std::path::{Path, PathBuf};

/// Outcome of writing one record sequence in every format
#[derive(Debug)]
pub struct SaveReport {
    /// One entry per sink, in the order the sinks ran
    pub outcomes: Vec<(PathBuf, SinkResult<()>)>,
}

impl SaveReport {
    /// Paths that were written successfully
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|(_, result)| result.is_ok())
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Returns true if every sink succeeded
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, result)| result.is_ok())
    }
}

/// Path of the `<stem>_menu.<extension>` file inside `dir`
pub fn menu_output_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}_menu.{}", stem, extension))
}

/// Writes `items` as `<stem>_menu.json` and `<stem>_menu.csv` in `dir`
///
/// The directory is created if missing. Each format is attempted
/// independently and its outcome logged; a failing sink does not stop the
/// other one.
///
/// # Returns
///
/// * `Ok(SaveReport)` - Per-sink outcomes
/// * `Err(SinkError)` - The output directory could not be created
pub fn write_menu_outputs(items: &[MenuItem], dir: &Path, stem: &str) -> SinkResult<SaveReport> {
    std::fs::create_dir_all(dir)?;

    let sinks: [&dyn RecordSink; 2] = [&JsonSink, &CsvSink];
    let mut outcomes = Vec::with_capacity(sinks.len());

    for sink in sinks {
        let path = menu_output_path(dir, stem, sink.extension());
        let result = sink.save(items, &path);
        match &result {
            Ok(()) => tracing::info!("Saved {} items to {}", items.len(), path.display()),
            Err(SinkError::Empty { .. }) => {
                tracing::warn!("No items to save to {}", path.display())
            }
            Err(e) => tracing::error!("Failed to save {}: {}", path.display(), e),
        }
        outcomes.push((path, result));
    }

    Ok(SaveReport { outcomes })
}
