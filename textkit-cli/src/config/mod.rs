//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use textkit_core::TextkitConfig;

/// CLI configuration: the core sections plus CLI-only ones
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// `[windows]`, `[extraction]`, `[highlight]`, `[similarity]`, `[timeline]`
    #[serde(flatten)]
    pub core: TextkitConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = one per CPU)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { worker_threads: 0 }
    }
}

impl CliConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(source).map_err(|e| CliError::Config(e.to_string()))?;
        config
            .core
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.core, TextkitConfig::default());
        assert_eq!(config.output.default_format, "text");
        assert_eq!(config.performance.worker_threads, 0);
    }

    #[test]
    fn test_flattened_sections() {
        let config = CliConfig::from_toml_str(
            r#"
            [windows]
            size = 30
            step = 10

            [output]
            default_format = "json"

            [performance]
            worker_threads = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.core.windows.size, 30);
        assert_eq!(config.output.default_format, "json");
        assert!(config.output.pretty_json);
        assert_eq!(config.performance.worker_threads, 2);
    }

    #[test]
    fn test_invalid_core_section() {
        let err = CliConfig::from_toml_str("[windows]\nsize = 1\n").unwrap_err();
        assert!(err.to_string().contains("window size"));
    }

    #[test]
    fn test_generated_template_round_trips() {
        let config = CliConfig::default();
        let source = toml::to_string(&config).unwrap();
        assert_eq!(CliConfig::from_toml_str(&source).unwrap(), config);
    }
}
