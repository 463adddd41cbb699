//! Entities command implementation

use super::CommonArgs;
use crate::input::Document;
use crate::output::Record;
use anyhow::Result;
use clap::Args;
use textkit_core::application::timeline::{entity_timelines, timeline_ranking};
use textkit_core::{capitalized_chains, Lexicon};

/// Arguments for the entities command
#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Rank entities by how much of the document their timeline covers
    #[arg(long)]
    pub rank: bool,

    /// Timeline window in characters (overrides `timeline.window`)
    #[arg(long, value_name = "CHARS", requires = "rank")]
    pub window: Option<usize>,
}

impl EntitiesArgs {
    /// Execute the entities command
    pub fn execute(&self) -> Result<()> {
        let config = self.common.setup()?;
        let lexicon = Lexicon::english()?;
        let window = self.window.unwrap_or(config.core.timeline.window);

        let groups = self.common.documents(&config, |document| {
            if self.rank {
                ranked_entities(document, &lexicon, window)
            } else {
                Ok(entity_records(document, &lexicon))
            }
        })?;
        self.common.emit(&config, groups)
    }
}

fn entity_records(document: &Document, lexicon: &Lexicon) -> Vec<Record> {
    let name = document.name();
    capitalized_chains(&document.text, lexicon)
        .into_iter()
        .map(|entity| Record::new(name.as_str(), entity))
        .collect()
}

fn ranked_entities(document: &Document, lexicon: &Lexicon, window: usize) -> Result<Vec<Record>> {
    let name = document.name();
    let timelines = entity_timelines(&document.text, lexicon, window)?;
    Ok(timeline_ranking(&timelines)
        .into_iter()
        .map(|(entity, score)| Record::new(name.as_str(), entity).field("score", score))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document() -> Document {
        Document {
            path: PathBuf::from("story.txt"),
            text: "Alice met Bob in New York. Alice stayed.".to_string(),
        }
    }

    #[test]
    fn test_entity_records_sorted() {
        let lexicon = Lexicon::english().unwrap();
        let texts: Vec<String> = entity_records(&document(), &lexicon)
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, vec!["Alice", "Bob", "New York"]);
    }

    #[test]
    fn test_ranked_entities() {
        let lexicon = Lexicon::english().unwrap();
        let records = ranked_entities(&document(), &lexicon, 9).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "Alice");
        assert!(records[0].fields["score"].as_f64().unwrap() > 0.0);
        assert!(ranked_entities(&document(), &lexicon, 0).is_err());
    }
}
