//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// Terminal color-swatch picker with a persisted palette and a timed carousel.
#[derive(Parser, Debug)]
#[command(name = "chromatix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from TOML file (default: chromatix.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to a TOML file and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// File holding the persisted selection
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Color metadata JSON file (colors-data.json format)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Milliseconds between two carousel steps (default: 5000)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Colors required before the carousel starts (default: 2)
    #[arg(long, value_name = "N")]
    pub min_colors: Option<usize>,

    /// Log file path (default: chromatix.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Clear the persisted selection and exit
    #[arg(long)]
    pub reset: bool,

    /// Print the swatches with their metadata and selection state, then exit
    #[arg(long)]
    pub list: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

/// Config values set explicitly on the command line.
///
/// Unset fields are skipped when serialized, so merging this on top of the
/// file and environment layers only overrides what the user passed.
#[derive(Debug, Default, Serialize)]
pub struct ConfigOverrides {
    carousel: CarouselOverrides,
    storage: StorageOverrides,
    catalog: CatalogOverrides,
    logging: LoggingOverrides,
}

#[derive(Debug, Default, Serialize)]
struct CarouselOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_colors: Option<usize>,
}

#[derive(Debug, Default, Serialize)]
struct StorageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct CatalogOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct LoggingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
}

impl Cli {
    /// Collect the flags that override configuration values.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            carousel: CarouselOverrides {
                interval_ms: self.interval_ms,
                min_colors: self.min_colors,
            },
            storage: StorageOverrides {
                path: self.state_file.clone(),
            },
            catalog: CatalogOverrides {
                path: self.catalog.clone(),
            },
            logging: LoggingOverrides {
                file: self.log_file.clone(),
                level: self.log_level.clone(),
            },
        }
    }
}
