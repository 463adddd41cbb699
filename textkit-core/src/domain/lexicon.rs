//! Word lists used by preprocessing and entity detection
//!
//! A [`Lexicon`] is loaded once and passed by reference to the functions
//! that need it. The English lexicon is embedded in the binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

const ENGLISH_TOML: &str = include_str!("../../configs/lexicons/english.toml");

/// Lexicon metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Stop words and abbreviation prefixes for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub metadata: Metadata,
    #[serde(default)]
    pub stop_words: HashSet<String>,
    #[serde(default)]
    pub abbreviation_prefixes: HashSet<String>,
    /// Short form to spelled-out expansion
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
}

impl Lexicon {
    /// Parse a lexicon from a TOML document.
    ///
    /// Entries are lower-cased so lookups only need to lower-case the query.
    /// A lexicon without stop words is rejected, which also catches list
    /// keys that ended up inside the `[metadata]` table.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut lexicon: Lexicon = toml::from_str(source)?;
        if lexicon.stop_words.is_empty() {
            return Err(Error::Configuration(format!(
                "lexicon '{}' has no stop words",
                lexicon.metadata.code
            )));
        }
        lexicon.stop_words = lexicon.stop_words.iter().map(|w| w.to_lowercase()).collect();
        lexicon.abbreviation_prefixes = lexicon
            .abbreviation_prefixes
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        lexicon.abbreviations = std::mem::take(&mut lexicon.abbreviations)
            .into_iter()
            .map(|(short, long)| (short.to_lowercase(), long))
            .filter(|(short, _)| !short.is_empty())
            .collect();

        tracing::debug!(
            code = %lexicon.metadata.code,
            stop_words = lexicon.stop_words.len(),
            prefixes = lexicon.abbreviation_prefixes.len(),
            expansions = lexicon.abbreviations.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    /// The embedded English lexicon.
    pub fn english() -> Result<Self> {
        Self::from_toml_str(ENGLISH_TOML)
    }

    /// Case-insensitive stop word lookup
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Case-insensitive lookup of words that take a non-terminal period
    pub fn is_abbreviation_prefix(&self, word: &str) -> bool {
        self.abbreviation_prefixes.contains(&word.to_lowercase())
    }

    /// Expansion of a lower-case short form
    pub fn expansion(&self, short: &str) -> Option<&str> {
        self.abbreviations.get(short).map(String::as_str)
    }

    /// Stop words sorted by descending length, then alphabetically
    pub fn stop_words_longest_first(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.stop_words.iter().map(String::as_str).collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words
    }
}
