//! Batch coordinator - per-restaurant scrape orchestration
//!
//! Restaurants are processed strictly one after another on a single
//! rendering session. A failure for one restaurant is logged and recorded
//! as an empty result; it never stops the rest of the batch.

use crate::browser::{load_full_page, RenderingSession};
use crate::config::{Config, LoaderConfig};
use crate::extract::{ExtractorRegistry, MenuExtractor};
use crate::menu::{output_stem, MenuItem, COMBINED_STEM};
use crate::output::write_menu_outputs;
use crate::state::ExtractionState;
use crate::{Result, ScrapeError, SetupError};
use std::path::{Path, PathBuf};

/// Outcome for one requested restaurant
#[derive(Debug, Clone)]
pub struct RestaurantRun {
    /// Name exactly as requested
    pub name: String,

    /// Registry id the name resolved to
    pub extractor_id: Option<&'static str>,

    pub state: ExtractionState,

    /// Extracted records; empty when the restaurant failed
    pub items: Vec<MenuItem>,

    /// Failure message for `Failed` runs
    pub error: Option<String>,
}

impl RestaurantRun {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extractor_id: None,
            state: ExtractionState::Pending,
            items: Vec::new(),
            error: None,
        }
    }

    fn advance(&mut self, next: ExtractionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!("{}: {} -> {}", self.name, self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: &ScrapeError) {
        tracing::error!("Failed to scrape {}: {}", self.name, error);
        self.error = Some(error.to_string());
        self.items.clear();
        self.advance(ExtractionState::Failed);
    }
}

/// Results of a batch, in request order
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub runs: Vec<RestaurantRun>,

    /// All restaurants' items concatenated, present when more than one
    /// restaurant was requested
    pub combined: Option<Vec<MenuItem>>,
}

impl BatchResult {
    /// Items extracted for `name`; empty for failed or unknown names
    pub fn items_for(&self, name: &str) -> &[MenuItem] {
        self.run_for(name)
            .map(|run| run.items.as_slice())
            .unwrap_or(&[])
    }

    /// Final state for `name`, if it was part of the batch
    pub fn state_of(&self, name: &str) -> Option<ExtractionState> {
        self.run_for(name).map(|run| run.state)
    }

    fn run_for(&self, name: &str) -> Option<&RestaurantRun> {
        self.runs.iter().find(|run| run.name == name)
    }

    /// Total number of records across all restaurants
    pub fn total_items(&self) -> usize {
        self.runs.iter().map(|run| run.items.len()).sum()
    }

    /// Number of restaurants that ended in `state`
    pub fn count_in(&self, state: ExtractionState) -> usize {
        self.runs.iter().filter(|run| run.state == state).count()
    }
}

/// Drives extractors through a rendering session and saves their output
pub struct Coordinator<'a> {
    registry: &'a ExtractorRegistry,
    loader: LoaderConfig,
    output_dir: PathBuf,
}

impl<'a> Coordinator<'a> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `registry` - Extractors available to the batch
    /// * `loader` - Scroll settings for the full-page loader
    /// * `output_dir` - Directory receiving the JSON and CSV files
    pub fn new(
        registry: &'a ExtractorRegistry,
        loader: LoaderConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            loader,
            output_dir: output_dir.into(),
        }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        self.registry
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Scrapes one restaurant without saving
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<MenuItem>)` - Records extracted from the rendered menu page
    /// * `Err(ScrapeError::UnknownRestaurant)` - No extractor matches `name`
    /// * `Err(ScrapeError)` - Navigation, loading or extraction failed
    pub fn scrape_restaurant(
        &self,
        session: &mut RenderingSession,
        name: &str,
    ) -> Result<Vec<MenuItem>> {
        let (_, extractor) = self
            .registry
            .resolve(name)
            .ok_or_else(|| ScrapeError::UnknownRestaurant(name.to_string()))?;
        self.scrape_with(session, extractor)
    }

    fn scrape_with(
        &self,
        session: &mut RenderingSession,
        extractor: &dyn MenuExtractor,
    ) -> Result<Vec<MenuItem>> {
        session.navigate(extractor.menu_url(), extractor.ready_marker())?;
        load_full_page(session, &self.loader)?;
        let html = session.rendered_html()?;
        let items = extractor.extract(&html)?;
        tracing::info!(
            "Extracted {} items from {}",
            items.len(),
            extractor.restaurant()
        );
        Ok(items)
    }

    /// Writes `items` under the file stem derived from `name`
    ///
    /// Sink failures are logged by the output layer and do not propagate.
    pub fn save(&self, items: &[MenuItem], name: &str) {
        let stem = output_stem(name);
        if let Err(e) = write_menu_outputs(items, &self.output_dir, &stem) {
            tracing::error!(
                "Failed to prepare output directory {}: {}",
                self.output_dir.display(),
                e
            );
        }
    }

    /// Scrapes and saves every restaurant in `names`, in order
    ///
    /// Each restaurant gets its own output pair, written even when it failed
    /// (an empty JSON array, and no CSV). When more than one restaurant is
    /// requested the concatenated records are also saved as
    /// `all_restaurants_menu.*`.
    pub fn run_batch(&self, session: &mut RenderingSession, names: &[String]) -> BatchResult {
        tracing::info!("Starting batch of {} restaurants", names.len());
        let mut result = BatchResult::default();

        for name in names {
            let mut run = RestaurantRun::pending(name);
            tracing::info!("Scraping {}", name);

            match self.registry.resolve(name) {
                None => run.fail(&ScrapeError::UnknownRestaurant(name.clone())),
                Some((id, extractor)) => {
                    run.extractor_id = Some(id);
                    run.advance(ExtractionState::Extracting);
                    match self.scrape_with(session, extractor) {
                        Ok(items) => {
                            run.advance(ExtractionState::from_item_count(items.len()));
                            run.items = items;
                        }
                        Err(e) => run.fail(&e),
                    }
                }
            }

            self.save(&run.items, name);
            result.runs.push(run);
        }

        if names.len() > 1 {
            let combined: Vec<MenuItem> = result
                .runs
                .iter()
                .flat_map(|run| run.items.iter().cloned())
                .collect();
            tracing::info!("Combined output holds {} items", combined.len());
            self.save(&combined, COMBINED_STEM);
            result.combined = Some(combined);
        }

        tracing::info!(
            "Batch complete: {} succeeded, {} empty, {} failed, {} items",
            result.count_in(ExtractionState::Succeeded),
            result.count_in(ExtractionState::Empty),
            result.count_in(ExtractionState::Failed),
            result.total_items()
        );

        result
    }
}

/// Runs a complete batch
///
/// This is the main entry point for a scrape. It will:
/// 1. Open one rendering session for the configured engine
/// 2. Scrape, extract and save each restaurant in turn
/// 3. Save the combined output
/// 4. Close the session, whatever happened along the way
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `registry` - Extractors available to the batch
/// * `names` - Restaurants to scrape
///
/// # Returns
///
/// * `Ok(BatchResult)` - The batch ran; individual restaurants may still have failed
/// * `Err(SetupError)` - No browser session could be opened
pub fn run(
    config: &Config,
    registry: &ExtractorRegistry,
    names: &[String],
) -> std::result::Result<BatchResult, SetupError> {
    let mut session = RenderingSession::open(&config.session)?;
    let coordinator = Coordinator::new(
        registry,
        config.loader.clone(),
        config.output.directory.clone(),
    );

    let result = coordinator.run_batch(&mut session, names);
    session.close();
    Ok(result)
}
