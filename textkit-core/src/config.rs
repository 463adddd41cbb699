//! Configuration for window building, extraction and rendering
//!
//! Every section deserializes from TOML with defaults for missing keys and
//! is checked with `validate()` before use.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default configuration values
pub mod defaults {
    /// Sliding window size in characters
    pub const WINDOW_SIZE: usize = 100;
    /// Distance between window centres in characters
    pub const WINDOW_STEP: usize = 50;
    /// Radius around a matched term in characters
    pub const TERM_RADIUS: usize = 50;
    /// Radius around a matched date in characters
    pub const DATE_RADIUS: usize = 15;
    /// Highlight background colour
    pub const HIGHLIGHT_COLOR: &str = "#6cbbf7";
    /// Highlight document title
    pub const HIGHLIGHT_TITLE: &str = "Highlights";
    /// Jaccard similarity at which a text counts as a repeat
    pub const JACCARD_THRESHOLD: f64 = 0.95;
    /// Relative length difference allowed before comparing token sets
    pub const LENGTH_TOLERANCE: f64 = 0.05;
    /// Minimum run of consecutive repeated pages
    pub const MIN_CLUSTER_SIZE: usize = 1;
    /// Timeline window in characters
    pub const TIMELINE_WINDOW: usize = 1000;
}

/// Smallest window that can hold a centre and one character either side
pub const MIN_WINDOW_SIZE: usize = 3;

/// Sliding window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window size in characters
    pub size: usize,
    /// Step between window centres in characters
    pub step: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: defaults::WINDOW_SIZE,
            step: defaults::WINDOW_STEP,
        }
    }
}

impl WindowConfig {
    /// Creates a validated configuration
    pub fn new(size: usize, step: usize) -> Result<Self> {
        let config = Self { size, step };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new builder for WindowConfig
    pub fn builder() -> WindowConfigBuilder {
        WindowConfigBuilder::new()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_WINDOW_SIZE {
            return Err(Error::Configuration(format!(
                "window size must be at least {MIN_WINDOW_SIZE}, got {}",
                self.size
            )));
        }
        if self.step == 0 {
            return Err(Error::Configuration(
                "window step must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for WindowConfig with fluent API
#[derive(Debug, Clone, Default)]
pub struct WindowConfigBuilder {
    config: WindowConfig,
}

impl WindowConfigBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window size in characters
    pub fn size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    /// Sets the step between window centres
    pub fn step(mut self, step: usize) -> Self {
        self.config.step = step;
        self
    }

    /// Builds the configuration, validating parameters
    pub fn build(self) -> Result<WindowConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Term and date extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Radius around each term match
    pub radius: usize,
    /// Radius around each date
    pub date_radius: usize,
    /// Match vocabulary case-insensitively
    pub ignore_case: bool,
    /// Pivot for two-digit years; `None` skips them
    pub two_digit_pivot: Option<u32>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            radius: defaults::TERM_RADIUS,
            date_radius: defaults::DATE_RADIUS,
            ignore_case: false,
            two_digit_pivot: None,
        }
    }
}

impl ExtractionConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(pivot) = self.two_digit_pivot {
            if pivot > 99 {
                return Err(Error::Configuration(format!(
                    "two-digit year pivot must be between 0 and 99, got {pivot}"
                )));
            }
        }
        Ok(())
    }
}

/// Highlight rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub color: String,
    pub title: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: defaults::HIGHLIGHT_COLOR.to_string(),
            title: defaults::HIGHLIGHT_TITLE.to_string(),
        }
    }
}

impl HighlightConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let valid = self.color.starts_with('#')
            && matches!(self.color.len(), 4 | 7)
            && self.color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(Error::Configuration(format!(
                "highlight color must be a hex colour like #6cbbf7, got {:?}",
                self.color
            )));
        }
        Ok(())
    }
}

/// Near-duplicate detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub jaccard_threshold: f64,
    pub length_tolerance: f64,
    pub min_cluster_size: usize,
    /// Blank repeated pages instead of removing them
    pub whiteout: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            jaccard_threshold: defaults::JACCARD_THRESHOLD,
            length_tolerance: defaults::LENGTH_TOLERANCE,
            min_cluster_size: defaults::MIN_CLUSTER_SIZE,
            whiteout: true,
        }
    }
}

impl SimilarityConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.jaccard_threshold) {
            return Err(Error::Configuration(format!(
                "jaccard threshold must be between 0 and 1, got {}",
                self.jaccard_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.length_tolerance) {
            return Err(Error::Configuration(format!(
                "length tolerance must be between 0 and 1, got {}",
                self.length_tolerance
            )));
        }
        if self.min_cluster_size == 0 {
            return Err(Error::Configuration(
                "min cluster size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub window: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            window: defaults::TIMELINE_WINDOW,
        }
    }
}

impl TimelineConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::Configuration(
                "timeline window must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete toolkit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextkitConfig {
    pub windows: WindowConfig,
    pub extraction: ExtractionConfig,
    pub highlight: HighlightConfig,
    pub similarity: SimilarityConfig,
    pub timeline: TimelineConfig,
}

impl TextkitConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: TextkitConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section
    pub fn validate(&self) -> Result<()> {
        self.windows.validate()?;
        self.extraction.validate()?;
        self.highlight.validate()?;
        self.similarity.validate()?;
        self.timeline.validate()
    }
}
