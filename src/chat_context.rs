//! Read-only view of the selection for a chat assistant layer.
//!
//! No requests are made here; this only shapes what an assistant would be
//! told about the user's palette.

use crate::catalog::{Catalog, ColorInfo};
use crate::selection::ColorId;

/// Colors needed before a palette analysis makes sense.
const MIN_ANALYZE: usize = 2;

/// Snapshot of the selected colors with their metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionContext {
    ids: Vec<ColorId>,
    known: Vec<ColorInfo>,
}

impl SelectionContext {
    pub fn new(selection: &[ColorId], catalog: Option<&Catalog>) -> Self {
        let known = catalog
            .map(|c| {
                selection
                    .iter()
                    .filter_map(|id| c.find(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            ids: selection.to_vec(),
            known,
        }
    }

    pub fn ids(&self) -> &[ColorId] {
        &self.ids
    }

    /// Names of selected colors that have metadata, in click order.
    pub fn names(&self) -> Vec<&str> {
        self.known.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether enough colors are selected for a palette analysis.
    pub fn can_analyze(&self) -> bool {
        self.ids.len() >= MIN_ANALYZE
    }

    /// Append the selection to a user prompt. Unchanged when no selected
    /// color has metadata.
    pub fn enrich(&self, prompt: &str) -> String {
        let names = self.names();
        if names.is_empty() {
            return prompt.to_string();
        }
        format!(
            "{prompt}\n\n[context: the user has selected these colors: {}]",
            names.join(", ")
        )
    }

    /// One `- Name (mood): description` line per known color.
    pub fn palette_brief(&self) -> String {
        self.known
            .iter()
            .map(|c| {
                if c.mood.is_empty() {
                    format!("- {}: {}", c.name, c.description)
                } else {
                    format!("- {} ({}): {}", c.name, c.mood, c.description)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
