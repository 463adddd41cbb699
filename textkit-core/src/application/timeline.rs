//! Occurrence timelines
//!
//! A timeline has one slot per character of the text. Each match adds one
//! to every slot within half a window of the match centre, so peaks show
//! where in a document a name is discussed.

use crate::application::entities::capitalized_chains;
use crate::domain::lexicon::Lexicon;
use crate::domain::vocab::VocabRegex;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Coverage counts of `vocab` matches over `text`.
///
/// An even `window` is reduced by one so it has a centre.
pub fn timeline(text: &str, vocab: &VocabRegex, window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::Configuration(
            "timeline window must be greater than 0".to_string(),
        ));
    }
    let window = if window % 2 == 0 { window - 1 } else { window };
    let radius = window.saturating_sub(1) / 2;

    let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let len = char_starts.len();
    let mut vector = vec![0.0; len];

    for m in vocab.find_iter(text) {
        let start = char_starts.partition_point(|&b| b < m.start());
        let end = char_starts.partition_point(|&b| b < m.end());
        let centre = start + (end - start) / 2;
        let lo = centre.saturating_sub(radius);
        let hi = (centre + radius + 1).min(len);
        for slot in &mut vector[lo..hi] {
            *slot += 1.0;
        }
    }
    Ok(vector)
}

/// Timelines of every capitalised chain, normalised per position.
///
/// At each character the values across entities sum to one wherever any
/// entity is present, and are zero elsewhere.
pub fn entity_timelines(text: &str, lexicon: &Lexicon, window: usize) -> Result<BTreeMap<String, Vec<f64>>> {
    let mut timelines = BTreeMap::new();
    for entity in capitalized_chains(text, lexicon) {
        let vocab = VocabRegex::compile(&[entity.as_str()], false)?;
        let line = timeline(text, &vocab, window)?;
        timelines.insert(entity, line);
    }

    let len = text.chars().count();
    let mut totals = vec![0.0; len];
    for line in timelines.values() {
        for (total, value) in totals.iter_mut().zip(line) {
            *total += value;
        }
    }
    for line in timelines.values_mut() {
        for (value, total) in line.iter_mut().zip(&totals) {
            if *total > 0.0 {
                *value /= total;
            }
        }
    }

    tracing::debug!(entities = timelines.len(), window, "built entity timelines");
    Ok(timelines)
}

/// Entities ranked by mean timeline value, highest first.
///
/// Ties keep the map's alphabetical order.
pub fn timeline_ranking(timelines: &BTreeMap<String, Vec<f64>>) -> Vec<(String, f64)> {
    let mut ranking: Vec<(String, f64)> = timelines
        .iter()
        .map(|(entity, line)| {
            let mean = if line.is_empty() {
                0.0
            } else {
                line.iter().sum::<f64>() / line.len() as f64
            };
            (entity.clone(), mean)
        })
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranking
}
