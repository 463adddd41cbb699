//! Vocabulary alternation regex
//!
//! Regex alternation takes the first alternative that matches, not the
//! longest one. Ordering phrases by descending length makes the first
//! match also the longest, so "new york" wins over "new".

use crate::domain::spans::Span;
use crate::error::{Error, Result};
use regex::{Matches, Regex, RegexBuilder};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Compiled `\b(?:phrase|...)\b` pattern over a vocabulary.
#[derive(Debug, Clone)]
pub struct VocabRegex {
    regex: Regex,
    phrases: Vec<String>,
    ignore_case: bool,
}

impl VocabRegex {
    /// Compile a vocabulary into a single alternation.
    ///
    /// Fails on an empty vocabulary, an empty phrase, or a repeated phrase.
    /// Phrases are escaped, so punctuation in a phrase matches literally.
    ///
    /// ```
    /// use textkit_core::domain::vocab::VocabRegex;
    ///
    /// let vocab = VocabRegex::compile(&["new", "new york"], false).unwrap();
    /// let found: Vec<&str> = vocab.find_iter("new york city").map(|m| m.as_str()).collect();
    /// assert_eq!(found, vec!["new york"]);
    /// ```
    pub fn compile<S: AsRef<str>>(vocabulary: &[S], ignore_case: bool) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(Error::Configuration("vocabulary is empty".into()));
        }

        let mut seen = HashSet::with_capacity(vocabulary.len());
        let mut phrases = Vec::with_capacity(vocabulary.len());
        for phrase in vocabulary {
            let phrase = phrase.as_ref();
            if phrase.is_empty() {
                return Err(Error::Configuration(
                    "vocabulary contains an empty phrase".into(),
                ));
            }
            if !seen.insert(phrase) {
                return Err(Error::DuplicatePhrase(phrase.to_string()));
            }
            phrases.push(phrase.to_string());
        }

        // Stable: equal lengths keep their input order
        phrases.sort_by_key(|p| Reverse(p.chars().count()));

        let alternation = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(ignore_case)
            .build()?;

        tracing::trace!(phrases = phrases.len(), ignore_case, "compiled vocabulary regex");

        Ok(Self {
            regex,
            phrases,
            ignore_case,
        })
    }

    /// The underlying regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Phrases in match-priority order (longest first)
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Whether matching ignores case
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Returns true if any phrase occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Non-overlapping matches, left to right
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.regex.find_iter(text)
    }

    /// Spans of all non-overlapping matches
    pub fn find_spans(&self, text: &str) -> Vec<Span> {
        self.regex
            .find_iter(text)
            .map(|m| Span::new(m.start(), m.end()))
            .collect()
    }
}
