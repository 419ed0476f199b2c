//! Lookup of site extractors by restaurant name

use crate::extract::{aw::AwExtractor, burger_king, mcdonalds, MenuExtractor};

struct Entry {
    id: &'static str,
    aliases: Vec<String>,
    extractor: Box<dyn MenuExtractor>,
}

/// Maps user supplied restaurant names onto site extractors
///
/// Names are matched case-insensitively: a name resolves to the first
/// registered extractor one of whose aliases appears anywhere in it, so
/// `"McDonalds"`, `"mcdonald's"` and `"McDonald's USA"` all find the same
/// extractor.
#[derive(Default)]
pub struct ExtractorRegistry {
    entries: Vec<Entry>,
}

impl ExtractorRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the A&W, McDonald's and Burger King extractors
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("a&w", &["a&w", "a & w"], Box::new(AwExtractor::new()));
        registry.register("mcdonalds", &["mcdonald"], Box::new(mcdonalds::extractor()));
        registry.register(
            "burger_king",
            &["burger king", "burgerking"],
            Box::new(burger_king::extractor()),
        );
        registry
    }

    /// Adds an extractor under `id`, matched by any of `aliases`
    ///
    /// Later registrations never shadow earlier ones for names both match.
    pub fn register(
        &mut self,
        id: &'static str,
        aliases: &[&str],
        extractor: Box<dyn MenuExtractor>,
    ) {
        self.entries.push(Entry {
            id,
            aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
            extractor,
        });
    }

    /// Finds the extractor for `name`
    ///
    /// # Returns
    ///
    /// The extractor's id and the extractor, or `None` when no alias matches
    pub fn resolve(&self, name: &str) -> Option<(&'static str, &dyn MenuExtractor)> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.aliases.iter().any(|alias| needle.contains(alias.as_str())))
            .map(|entry| (entry.id, entry.extractor.as_ref()))
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
