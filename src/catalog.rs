//! Color metadata: names, moods and descriptions shown alongside swatches.
//!
//! Loaded from a `colors-data.json` file. The metadata is optional: when it
//! cannot be read the page still works and notices fall back to swatch ids.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::selection::ColorId;

/// Prefix used by page element ids that wrap a catalog id.
const ELEMENT_PREFIX: &str = "product-";

/// Error type for catalog loading.
#[derive(Debug)]
pub enum CatalogError {
    /// IO error reading the file
    Io(std::io::Error),
    /// JSON parsing error
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Metadata for one color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mood: String,
    /// Gradient stops, any CSS color format
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub associations: Vec<String>,
}

/// All known colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub colors: Vec<ColorInfo>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load the catalog, logging and discarding any failure.
    pub fn load_optional(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), colors = catalog.colors.len(), "color metadata loaded");
                Some(catalog)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "color metadata unavailable");
                None
            }
        }
    }

    /// Look up a color by catalog id or by `product-<id>` element id.
    pub fn find(&self, id: &ColorId) -> Option<&ColorInfo> {
        let raw = id.as_str();
        let bare = raw.strip_prefix(ELEMENT_PREFIX).unwrap_or(raw);
        self.colors.iter().find(|c| c.id == raw || c.id == bare)
    }

    /// Display name for `id`, if known.
    pub fn name_of(&self, id: &ColorId) -> Option<&str> {
        self.find(id).map(|c| c.name.as_str())
    }

    /// The ten colors of the default page.
    pub fn builtin() -> Self {
        let entry = |id: &str,
                     name: &str,
                     mood: &str,
                     colors: [&str; 2],
                     associations: [&str; 2],
                     description: &str| ColorInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            mood: mood.to_string(),
            colors: colors.iter().map(|s| s.to_string()).collect(),
            associations: associations.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            colors: vec![
                entry(
                    "pastel-blue",
                    "Pastel Blue",
                    "relaxing",
                    ["#a1c4fd", "#c2e9fb"],
                    ["serenity", "freshness"],
                    "A soft sky tone that calms and opens up a space.",
                ),
                entry(
                    "sunset-orange",
                    "Sunset Orange",
                    "energizing",
                    ["#ff7e5f", "#feb47b"],
                    ["warmth", "passion"],
                    "The last warm light of the day, lively and welcoming.",
                ),
                entry(
                    "mint-green",
                    "Mint Green",
                    "refreshing",
                    ["#a8e6cf", "#dcedc1"],
                    ["nature", "harmony"],
                    "A cool green that feels clean and balanced.",
                ),
                entry(
                    "lavender-sky",
                    "Lavender Sky",
                    "contemplative",
                    ["#c3cfe2", "#e0c3fc"],
                    ["spirituality", "wisdom"],
                    "A quiet violet haze suited to calm, reflective spaces.",
                ),
                entry(
                    "coral-reef",
                    "Coral Reef",
                    "welcoming",
                    ["#ff9a9e", "#fecfef"],
                    ["conviviality", "joy"],
                    "A friendly pink-orange that invites people in.",
                ),
                entry(
                    "ocean-breeze",
                    "Ocean Breeze",
                    "meditative",
                    ["#2193b0", "#6dd5ed"],
                    ["freedom", "trust"],
                    "Open-water blues with a steady, confident depth.",
                ),
                entry(
                    "rose-gold",
                    "Rose Gold",
                    "sophisticated",
                    ["#b76e79", "#f7cac9"],
                    ["elegance", "femininity"],
                    "A metallic blush that reads as refined and modern.",
                ),
                entry(
                    "purple-haze",
                    "Purple Haze",
                    "inspiring",
                    ["#7f00ff", "#e100ff"],
                    ["creativity", "imagination"],
                    "Saturated violets that spark bold ideas.",
                ),
                entry(
                    "peachy-keen",
                    "Peachy Keen",
                    "comforting",
                    ["#ffecd2", "#fcb69f"],
                    ["softness", "tenderness"],
                    "A gentle peach that wraps a room in warmth.",
                ),
                entry(
                    "lime-twist",
                    "Lime Twist",
                    "stimulating",
                    ["#d4fc79", "#96e6a1"],
                    ["vitality", "dynamism"],
                    "A zesty green-yellow full of energy.",
                ),
            ],
        }
    }
}
