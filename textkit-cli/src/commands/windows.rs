//! Windows command implementation

use super::CommonArgs;
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use textkit_core::{Window, WindowBuilder, WindowConfig};

/// Arguments for the windows command
#[derive(Debug, Args)]
pub struct WindowsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Window size in characters (overrides `windows.size`)
    #[arg(short, long, value_name = "CHARS")]
    pub size: Option<usize>,

    /// Step between window centres in characters (overrides `windows.step`)
    #[arg(long, value_name = "CHARS")]
    pub step: Option<usize>,
}

impl WindowsArgs {
    /// Execute the windows command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let window_config = WindowConfig::builder()
            .size(self.size.unwrap_or(config.core.windows.size))
            .step(self.step.unwrap_or(config.core.windows.step))
            .build()?;
        let builder = WindowBuilder::new(window_config)?;

        let groups = self
            .common
            .documents(&config, |document| Ok(window_records(document, &builder)))?;
        self.common.emit(&config, groups)
    }
}

fn window_records(document: &Document, builder: &WindowBuilder) -> Vec<Record> {
    let name = document.name();
    builder
        .windows(&document.pages())
        .into_iter()
        .filter(|window| !window.is_sentinel())
        .map(|window| record(&name, window))
        .collect()
}

fn record(source: &str, window: Window) -> Record {
    Record::new(source, window.text)
        .at(format!(
            "page {}, tokens {}-{}",
            window.page, window.start_token, window.end_token
        ))
        .field("start", window.span.start)
        .field("end", window.span.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_window_records() {
        let document = Document {
            path: PathBuf::from("note.txt"),
            text: "the quick brown fox jumps".to_string(),
        };
        let builder = WindowBuilder::with_size(9, 5).unwrap();
        let records = window_records(&document, &builder);
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["the", "brown", "fox"]);
        assert_eq!(records[0].location.as_deref(), Some("page 1, tokens 1-1"));
    }

    #[test]
    fn test_blank_document_has_no_records() {
        let document = Document {
            path: PathBuf::from("blank.txt"),
            text: "  \x0c \n".to_string(),
        };
        let builder = WindowBuilder::with_size(9, 5).unwrap();
        assert!(window_records(&document, &builder).is_empty());
    }
}
