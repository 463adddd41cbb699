//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use textkit_core::config::defaults;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it with any command:");
        println!("   textkit windows -i notes.txt --config {}", self.output.display());

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r##"# textkit configuration
#
# Every key is optional; missing keys take the values shown here.
# Sizes and radii count characters, not bytes.

[windows]
# Characters per window (at least 3; even sizes are reduced by one)
size = {window_size}
# Characters between window centres
step = {window_step}

[extraction]
# Context either side of a term match
radius = {term_radius}
# Context either side of a date
date_radius = {date_radius}
# Match vocabulary regardless of case
ignore_case = false
# Expand two-digit years: above the pivot is 19xx, otherwise 20xx.
# Leave unset to ignore two-digit years.
# two_digit_pivot = 30

[highlight]
color = "{color}"
title = "{title}"

[similarity]
# Token-set Jaccard similarity at which a page is a repeat
jaccard_threshold = {jaccard}
# Largest relative length difference still compared
length_tolerance = {tolerance}
# Minimum run of consecutive exact repeats
min_cluster_size = {min_cluster}
whiteout = true

[timeline]
# Characters each entity mention covers
window = {timeline_window}

[output]
# text, json or markdown
default_format = "text"
pretty_json = true

[performance]
# Worker threads (0 = one per CPU)
worker_threads = 0
"##,
            window_size = defaults::WINDOW_SIZE,
            window_step = defaults::WINDOW_STEP,
            term_radius = defaults::TERM_RADIUS,
            date_radius = defaults::DATE_RADIUS,
            color = defaults::HIGHLIGHT_COLOR,
            title = defaults::HIGHLIGHT_TITLE,
            jaccard = defaults::JACCARD_THRESHOLD,
            tolerance = defaults::LENGTH_TOLERANCE,
            min_cluster = defaults::MIN_CLUSTER_SIZE,
            timeline_window = defaults::TIMELINE_WINDOW,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("textkit.toml"),
            force: false,
        };

        let config = CliConfig::from_toml_str(&args.generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("textkit.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[windows]"));

        // A second run refuses to overwrite without --force
        assert!(args.execute().is_err());
        let forced = GenerateConfigArgs {
            output: output_path,
            force: true,
        };
        assert!(forced.execute().is_ok());
    }
}
