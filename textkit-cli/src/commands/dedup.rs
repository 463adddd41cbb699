//! Dedup command implementation

use super::CommonArgs;
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use textkit_core::application::similarity::{repeated_delete, unique_by_jaccard_within};
use textkit_core::SimilarityConfig;

/// Arguments for the dedup command
#[derive(Debug, Args)]
pub struct DedupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only drop exact repeats of earlier pages
    #[arg(long)]
    pub exact: bool,

    /// Jaccard similarity at which a page counts as a repeat (overrides `similarity.jaccard_threshold`)
    #[arg(long, value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Minimum run of consecutive exact repeats to drop (overrides `similarity.min_cluster_size`)
    #[arg(long, value_name = "PAGES", requires = "exact")]
    pub min_cluster: Option<usize>,

    /// Keep dropped pages as empty records so page numbers stay aligned
    #[arg(long, requires = "exact")]
    pub whiteout: bool,
}

impl DedupArgs {
    /// Execute the dedup command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let similarity = SimilarityConfig {
            jaccard_threshold: self.threshold.unwrap_or(config.core.similarity.jaccard_threshold),
            min_cluster_size: self.min_cluster.unwrap_or(config.core.similarity.min_cluster_size),
            whiteout: self.whiteout,
            ..config.core.similarity.clone()
        };
        similarity.validate()?;

        let groups = self
            .common
            .documents(&config, |document| Ok(dedup_records(document, &similarity, self.exact)))?;
        self.common.emit(&config, groups)
    }
}

fn dedup_records(document: &Document, similarity: &SimilarityConfig, exact: bool) -> Vec<Record> {
    let name = document.name();
    let pages = document.pages();
    let kept: Vec<String> = if exact {
        repeated_delete(&pages, similarity.min_cluster_size, similarity.whiteout)
    } else {
        unique_by_jaccard_within(&pages, similarity.jaccard_threshold, similarity.length_tolerance)
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    log::debug!("{}: kept {} of {} page(s)", name, kept.len(), pages.len());

    kept.into_iter()
        .map(|page| Record::new(name.as_str(), page.trim()))
        .collect()
}
