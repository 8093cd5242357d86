//! Staged filename to category label mapping

use std::collections::HashMap;

/// Category label for assets found directly in the input root.
pub const ROOT_CATEGORY: &str = "root";

/// Fallback label for staged files with no recorded origin.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Maps staged `.wav` filenames to the source subfolder they came from.
///
/// Built once by the extract stage and read-only afterwards. A lookup for
/// a filename that was never recorded resolves to [`UNKNOWN_CATEGORY`]
/// rather than erroring, so the rename stage can always place a file.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: HashMap<String, String>,
}

impl CategoryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the originating category for a staged filename.
    pub fn insert(&mut self, staged_name: impl Into<String>, category: impl Into<String>) {
        self.entries.insert(staged_name.into(), category.into());
    }

    /// Category for a staged filename, or [`UNKNOWN_CATEGORY`] if absent.
    #[must_use]
    pub fn category_for(&self, staged_name: &str) -> &str {
        self.entries
            .get(staged_name)
            .map_or(UNKNOWN_CATEGORY, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
