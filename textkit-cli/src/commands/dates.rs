//! Dates command implementation

use super::CommonArgs;
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use textkit_core::{most_common_date_near, windows_by_dates, PatternDateResolver};

/// Arguments for the dates command
#[derive(Debug, Args)]
pub struct DatesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Characters of context either side of a date (overrides `extraction.date_radius`)
    #[arg(short, long, value_name = "CHARS")]
    pub radius: Option<usize>,

    /// Accept two-digit years: above the pivot is 19xx, otherwise 20xx
    #[arg(long, value_name = "YY", value_parser = clap::value_parser!(u32).range(0..=99))]
    pub pivot: Option<u32>,

    /// Report only the most common date whose window mentions one of these terms
    #[arg(long, value_name = "PHRASE")]
    pub near: Vec<String>,
}

impl DatesArgs {
    /// Execute the dates command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let resolver = match self.pivot.or(config.core.extraction.two_digit_pivot) {
            Some(pivot) => PatternDateResolver::with_pivot(pivot),
            None => PatternDateResolver::new(),
        };
        let radius = self.radius.unwrap_or(config.core.extraction.date_radius);

        let groups = self.common.documents(&config, |document| {
            if self.near.is_empty() {
                Ok(date_records(document, &resolver, radius))
            } else {
                anchored_date(document, &resolver, &self.near, radius)
            }
        })?;
        self.common.emit(&config, groups)
    }
}

fn date_records(document: &Document, resolver: &PatternDateResolver, radius: usize) -> Vec<Record> {
    let name = document.name();
    windows_by_dates(&document.pages(), resolver, radius)
        .into_iter()
        .map(|window| {
            Record::new(name.as_str(), window.excerpt.text.trim())
                .at(format!("page {}", window.excerpt.source + 1))
                .field("date", window.date.to_string())
        })
        .collect()
}

fn anchored_date(
    document: &Document,
    resolver: &PatternDateResolver,
    near: &[String],
    radius: usize,
) -> Result<Vec<Record>> {
    let date = most_common_date_near(&document.pages(), near, resolver, radius)?;
    if date.is_none() {
        log::info!("No date near {:?} in {}", near, document.name());
    }
    Ok(date
        .map(|date| Record::new(document.name(), date.to_string()))
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(text: &str) -> Document {
        Document {
            path: PathBuf::from("note.txt"),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_date_records() {
        let doc = document("Admitted 2011-09-30.\x0cDischarged 10/02/2011 home.");
        let records = date_records(&doc, &PatternDateResolver::new(), 15);
        let dates: Vec<String> = records
            .iter()
            .map(|r| r.fields["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(dates, vec!["2011-09-30", "2011-10-02"]);
        assert_eq!(records[1].location.as_deref(), Some("page 2"));
    }

    #[test]
    fn test_anchored_date() {
        let doc = document("Seen 2011-09-30. Surgery on 2011-10-14 went well. Surgery follow up 2011-10-14.");
        let records =
            anchored_date(&doc, &PatternDateResolver::new(), &["Surgery".to_string()], 30).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "2011-10-14");

        let none = anchored_date(&doc, &PatternDateResolver::new(), &["absent".to_string()], 20).unwrap();
        assert!(none.is_empty());
    }
}
