//! Capitalised entity chains
//!
//! A chain is a run of capitalised words joined only by spaces, such as
//! "New York City". Stop words break a chain.

use crate::application::preprocess::remove_false_periods;
use crate::domain::lexicon::Lexicon;
use crate::domain::words;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

fn capitalized_word() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z][a-zA-Z]+\b").expect("capitalized pattern is valid"))
}

fn starts_upper(text: &str, offset: usize) -> bool {
    text[offset..].chars().next().is_some_and(char::is_uppercase)
}

/// Unique capitalised chains in `text`, sorted.
///
/// ```
/// use textkit_core::application::entities::capitalized_chains;
/// use textkit_core::domain::lexicon::Lexicon;
///
/// let lexicon = Lexicon::english().unwrap();
/// let chains = capitalized_chains("John Smith went to New York City. He met Mary.", &lexicon);
/// assert_eq!(chains, vec!["John Smith", "Mary", "New York City"]);
/// ```
pub fn capitalized_chains(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let text = remove_false_periods(text, lexicon);
    let text = text.as_str();

    let candidates: Vec<usize> = capitalized_word()
        .find_iter(text)
        .filter(|m| !lexicon.is_stop_word(m.as_str()))
        .map(|m| m.start())
        .collect();
    let candidate_set: HashSet<usize> = candidates.iter().copied().collect();

    let mut chains = BTreeSet::new();
    for &start in &candidates {
        if words::prev_word_start(text, start).is_some_and(|p| candidate_set.contains(&p)) {
            continue;
        }
        let Some(first) = words::full_word(text, start) else {
            continue;
        };

        let mut phrase = first.to_string();
        let mut cursor = words::next_word_start(text, start);
        while let Some(next) = cursor {
            let Some(word) = words::full_word(text, next) else {
                break;
            };
            if !starts_upper(text, next) || lexicon.is_stop_word(word) {
                break;
            }
            phrase.push(' ');
            phrase.push_str(word);
            cursor = words::next_word_start(text, next);
        }
        chains.insert(phrase);
    }

    tracing::trace!(chains = chains.len(), "found capitalized chains");
    chains.into_iter().collect()
}
