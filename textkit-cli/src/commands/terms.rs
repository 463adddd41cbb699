//! Terms command implementation

use super::{CommonArgs, TermArgs};
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use textkit_core::{windows_by_pattern, VocabRegex};

/// Arguments for the terms command
#[derive(Debug, Args)]
pub struct TermsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub terms: TermArgs,

    /// Characters of context either side of a match (overrides `extraction.radius`)
    #[arg(short, long, value_name = "CHARS")]
    pub radius: Option<usize>,

    /// Match terms regardless of case
    #[arg(long)]
    pub ignore_case: bool,
}

impl TermsArgs {
    /// Execute the terms command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let terms = self.terms.load()?;
        let ignore_case = self.ignore_case || config.core.extraction.ignore_case;
        let vocab = VocabRegex::compile(&terms, ignore_case)?;
        let radius = self.radius.unwrap_or(config.core.extraction.radius);

        let groups = self
            .common
            .documents(&config, |document| Ok(term_records(document, &vocab, radius)))?;
        self.common.emit(&config, groups)
    }
}

fn term_records(document: &Document, vocab: &VocabRegex, radius: usize) -> Vec<Record> {
    let name = document.name();
    windows_by_pattern(&document.pages(), vocab, radius)
        .into_iter()
        .map(|excerpt| {
            let span = excerpt.span();
            Record::new(name.as_str(), excerpt.text.trim())
                .at(format!("page {}, bytes {}-{}", excerpt.source + 1, span.start, span.end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_term_records_per_page() {
        let document = Document {
            path: PathBuf::from("note.txt"),
            text: "John went to the doctor on Monday.\x0cThe doctor called back.".to_string(),
        };
        let vocab = VocabRegex::compile(&["doctor"], false).unwrap();
        let records = term_records(&document, &vocab, 5);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "the doctor on");
        assert!(records[0].location.as_deref().unwrap().starts_with("page 1,"));
        assert!(records[1].location.as_deref().unwrap().starts_with("page 2,"));
    }
}
