//! Sorted delimiter offsets with binary-search lookup
//!
//! A [`DelimiterIndex`] is built once per page and answers "nearest
//! delimiter" and "which token starts here" queries in O(log n).

use crate::domain::spans::Span;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn word_boundary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b").expect("word boundary pattern is valid"))
}

/// Strictly increasing token-start offsets over one text.
///
/// Every offset lies on a char boundary. Indexes from [`Self::build`] also
/// start at `0` and end at the text length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterIndex {
    offsets: Vec<usize>,
}

impl DelimiterIndex {
    /// Build an index from the matches of `pattern`.
    ///
    /// Each match contributes the offset just past its first character, so
    /// a whitespace run starts a new token after its first blank. An empty
    /// match contributes its own position.
    pub fn build(text: &str, pattern: &Regex) -> Self {
        let mut offsets = Vec::with_capacity(text.len() / 6 + 2);
        offsets.push(0);

        for m in pattern.find_iter(text) {
            let first_len = m.as_str().chars().next().map_or(0, char::len_utf8);
            let offset = m.start() + first_len;
            if offsets.last().is_some_and(|&last| offset > last) {
                offsets.push(offset);
            }
        }

        if offsets.last() != Some(&text.len()) {
            offsets.push(text.len());
        }

        Self { offsets }
    }

    /// Token starts separated by whitespace runs.
    pub fn whitespace(text: &str) -> Self {
        Self::build(text, whitespace_pattern())
    }

    /// Every `\b` word boundary, plus both ends of the text.
    pub fn word_boundaries(text: &str) -> Self {
        Self::build(text, word_boundary_pattern())
    }

    /// `\b` positions only. A text edge next to punctuation or blanks is
    /// not included, and a text without words yields an empty index.
    pub fn word_boundary_starts(text: &str) -> Self {
        let offsets = word_boundary_pattern()
            .find_iter(text)
            .map(|m| m.start())
            .collect();
        Self { offsets }
    }

    /// The sorted offsets
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of tokens delimited by the offsets
    pub fn token_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Largest delimiter `<= offset`.
    pub fn floor(&self, offset: usize) -> Option<usize> {
        let idx = self.offsets.partition_point(|&d| d <= offset);
        idx.checked_sub(1).map(|i| self.offsets[i])
    }

    /// Smallest delimiter `>= offset`.
    pub fn ceil(&self, offset: usize) -> Option<usize> {
        let idx = self.offsets.partition_point(|&d| d < offset);
        self.offsets.get(idx).copied()
    }

    /// 1-based rank of `offset` among the delimiters.
    ///
    /// Returns `None` when `offset` is not itself a delimiter.
    pub fn token_index_of(&self, offset: usize) -> Option<usize> {
        self.offsets.binary_search(&offset).ok().map(|i| i + 1)
    }

    /// Byte span covered by the inclusive 1-based token range.
    pub fn token_span(&self, start_token: usize, end_token: usize) -> Option<Span> {
        if start_token == 0 || start_token > end_token {
            return None;
        }
        let start = *self.offsets.get(start_token - 1)?;
        let end = *self.offsets.get(end_token)?;
        Some(Span::new(start, end))
    }
}
