//! Stats command implementation

use super::CommonArgs;
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use textkit_core::TextProfile;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// One record per page instead of per document
    #[arg(long)]
    pub per_page: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let groups = self
            .common
            .documents(&config, |document| profile_records(document, self.per_page))?;
        self.common.emit(&config, groups)
    }
}

fn profile_record(source: &str, text: &str, profile: &TextProfile) -> Result<Record> {
    let mut record = Record::new(source, text);
    if let Value::Object(fields) = serde_json::to_value(profile)? {
        record.fields.extend(fields);
    }
    Ok(record)
}

fn profile_records(document: &Document, per_page: bool) -> Result<Vec<Record>> {
    let name = document.name();
    if !per_page {
        let profile = TextProfile::of(&document.text);
        return Ok(vec![profile_record(&name, &name, &profile)?]);
    }

    document
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let profile = TextProfile::of(page);
            Ok(profile_record(&name, &name, &profile)?.at(format!("page {}", i + 1)))
        })
        .collect()
}
