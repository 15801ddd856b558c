//! Selectable swatches: the content of the page.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::gradient::Gradient;
use crate::selection::ColorId;

/// One selectable color element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: ColorId,
    /// Gradient stops, any CSS color format
    pub colors: Vec<String>,
}

impl Swatch {
    pub fn new(id: impl Into<ColorId>, colors: &[&str]) -> Self {
        Self {
            id: id.into(),
            colors: colors.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Rendered gradient snapshot for this swatch.
    pub fn gradient(&self) -> Gradient {
        Gradient::from_stops(&self.colors)
    }

    /// Human-readable label, preferring catalog metadata.
    pub fn label<'a>(&'a self, catalog: Option<&'a Catalog>) -> &'a str {
        catalog
            .and_then(|c| c.name_of(&self.id))
            .unwrap_or(self.id.as_str())
    }
}

/// Swatches of the default page, one per built-in catalog color.
pub fn default_swatches() -> Vec<Swatch> {
    Catalog::builtin()
        .colors
        .into_iter()
        .map(|info| Swatch {
            id: ColorId::new(info.id),
            colors: info.colors,
        })
        .collect()
}
