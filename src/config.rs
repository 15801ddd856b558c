//! Layered configuration: defaults, TOML file, environment, CLI flags.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::gradient::parse_color;
use crate::persistence::DEFAULT_NAMESPACE;
use crate::rotation::{DEFAULT_INTERVAL, MIN_COLORS, RotationPolicy};
use crate::swatch::{Swatch, default_swatches};
use crate::toast::{DEFAULT_MAX_VISIBLE, DEFAULT_TOAST_DURATION};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chromatix.toml";

/// Environment variable prefix; `__` separates sections.
pub const ENV_PREFIX: &str = "CHROMATIX_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Layered extraction error
    Figment(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Values that parse but make no sense
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Figment(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Invalid(s) => write!(f, "Invalid config: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Carousel timing and threshold
    pub carousel: CarouselConfig,
    /// Notification settings
    pub toast: ToastConfig,
    /// Persisted state location
    pub storage: StorageConfig,
    /// Color metadata location
    pub catalog: CatalogConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Selectable swatches, in display order
    pub swatches: Vec<Swatch>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            toast: ToastConfig::default(),
            storage: StorageConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
            swatches: default_swatches(),
        }
    }
}

/// Carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Milliseconds between two steps
    pub interval_ms: u64,
    /// Colors required before the carousel starts
    pub min_colors: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            min_colors: MIN_COLORS,
        }
    }
}

/// Toast settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
    pub max_visible: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

/// Where the selection is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
    /// Prefix of every key written
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("chromatix-state.json"),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Color metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON metadata; the built-in catalog is used when unset
    pub path: Option<PathBuf>,
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("chromatix.log"),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Merge defaults, the TOML file, `CHROMATIX_*` variables and `overrides`,
    /// then validate.
    ///
    /// An explicit `path` must exist; without one, `chromatix.toml` in the
    /// working directory is used if present.
    pub fn load<T: Serialize>(path: Option<&Path>, overrides: &T) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) if !p.exists() => {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", p.display()),
                )));
            }
            Some(p) => Toml::file(p),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the coordinator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "carousel.interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.carousel.min_colors == 0 {
            return Err(ConfigError::Invalid(
                "carousel.min_colors must be at least 1".to_string(),
            ));
        }
        if self.storage.namespace.is_empty() {
            return Err(ConfigError::Invalid(
                "storage.namespace must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for swatch in &self.swatches {
            if swatch.id.as_str().trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "swatch id must not be empty".to_string(),
                ));
            }
            if !seen.insert(&swatch.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate swatch id '{}'",
                    swatch.id
                )));
            }
            if swatch.colors.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "swatch '{}' has no colors",
                    swatch.id
                )));
            }
            for color in &swatch.colors {
                parse_color(color).map_err(ConfigError::Invalid)?;
            }
        }
        Ok(())
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy {
            min_colors: self.carousel.min_colors,
            interval: Duration::from_millis(self.carousel.interval_ms),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.duration_ms)
    }
}
