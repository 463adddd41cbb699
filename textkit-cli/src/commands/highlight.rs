//! Highlight command implementation

use super::{CommonArgs, TermArgs};
use crate::error::CliError;
use crate::input::Document;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use textkit_core::{HighlightConfig, HighlightRenderer, TokenHighlight, VocabRegex};

/// Arguments for the highlight command
///
/// Writes HTML rather than records, so `--format` is ignored. With several
/// inputs, `--output` names a directory that receives one `.html` file per
/// input.
#[derive(Debug, Args)]
pub struct HighlightArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub terms: TermArgs,

    /// Token range to highlight, 1-based and inclusive: START-END or START-END:TAG
    #[arg(long = "tokens", value_name = "RANGE", value_parser = parse_token_range)]
    pub tokens: Vec<TokenHighlight>,

    /// Background colour (overrides `highlight.color`)
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Document title (overrides `highlight.title`)
    #[arg(long)]
    pub title: Option<String>,

    /// Match terms regardless of case
    #[arg(long)]
    pub ignore_case: bool,
}

/// Parse `START-END` or `START-END:TAG`
pub fn parse_token_range(value: &str) -> Result<TokenHighlight, CliError> {
    let invalid = || CliError::InvalidTokenRange(value.to_string());
    let (range, tag) = match value.split_once(':') {
        Some((range, tag)) => (range, Some(tag)),
        None => (value, None),
    };
    let (start, end) = range.split_once('-').ok_or_else(invalid)?;
    let start: usize = start.trim().parse().map_err(|_| invalid())?;
    let end: usize = end.trim().parse().map_err(|_| invalid())?;
    if start == 0 || start > end {
        return Err(invalid());
    }
    Ok(match tag {
        Some(tag) => TokenHighlight::tagged(start, end, tag),
        None => TokenHighlight::new(start, end),
    })
}

impl HighlightArgs {
    /// Execute the highlight command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let highlight = HighlightConfig {
            color: self.color.clone().unwrap_or(config.core.highlight.color.clone()),
            title: self.title.clone().unwrap_or(config.core.highlight.title.clone()),
        };
        highlight
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        let renderer = HighlightRenderer::from_config(&highlight);

        let vocab = if self.tokens.is_empty() {
            let terms = self.terms.load()?;
            let ignore_case = self.ignore_case || config.core.extraction.ignore_case;
            Some(VocabRegex::compile(&terms, ignore_case)?)
        } else {
            None
        };

        let pages = self.common.documents(&config, |document| {
            Ok((document.path.clone(), self.render(document, &renderer, vocab.as_ref())))
        })?;
        self.write_pages(&pages)
    }

    fn render(&self, document: &Document, renderer: &HighlightRenderer, vocab: Option<&VocabRegex>) -> String {
        match vocab {
            Some(vocab) => renderer.render_terms(&document.text, vocab),
            None => renderer.render_tokens(&document.text, &self.tokens),
        }
    }

    fn write_pages(&self, pages: &[(PathBuf, String)]) -> Result<()> {
        match (&self.common.output, pages) {
            (Some(dir), pages) if pages.len() > 1 => {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
                for (source, html) in pages {
                    let target = html_path(dir, source);
                    fs::write(&target, html)
                        .with_context(|| format!("Failed to write {}", target.display()))?;
                    log::info!("Wrote {}", target.display());
                }
                Ok(())
            }
            _ => {
                let mut writer = self.common.writer()?;
                for (_, html) in pages {
                    writer.write_all(html.as_bytes())?;
                }
                writer.flush()?;
                Ok(())
            }
        }
    }
}

fn html_path(dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    dir.join(format!("{stem}.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_range() {
        assert_eq!(parse_token_range("3-5").unwrap(), TokenHighlight::new(3, 5));
        assert_eq!(
            parse_token_range("1-2:symptom").unwrap(),
            TokenHighlight::tagged(1, 2, "symptom")
        );
        for bad in ["", "3", "0-2", "5-3", "a-b", "1-x:tag"] {
            assert!(parse_token_range(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_html_path() {
        assert_eq!(
            html_path(Path::new("out"), Path::new("notes/visit.txt")),
            PathBuf::from("out/visit.html")
        );
    }
}
