//! Term and date centred excerpts
//!
//! Each extractor widens a hit by a character radius and then snaps the
//! result inward to the nearest `\b` word boundaries of that text, so an
//! excerpt never starts or ends in the middle of a word. The boundary index
//! is rebuilt for every input text.

use crate::application::dates::DateResolver;
use crate::domain::delimiters::DelimiterIndex;
use crate::domain::spans::Span;
use crate::domain::vocab::VocabRegex;
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// A word-aligned slice of one input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Excerpt<'a> {
    /// Position of the source text in the input slice
    pub source: usize,
    /// Byte offset of the excerpt in its source text
    pub start: usize,
    pub text: &'a str,
}

impl Excerpt<'_> {
    /// Byte span of the excerpt in its source text
    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.text.len())
    }
}

/// An excerpt centred on a recognised date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow<'a> {
    pub excerpt: Excerpt<'a>,
    pub date: NaiveDate,
}

/// Offset `count` characters before `offset`, clamped at 0
fn chars_before(text: &str, offset: usize, count: usize) -> usize {
    if count == 0 {
        return offset;
    }
    text[..offset]
        .char_indices()
        .rev()
        .take(count)
        .last()
        .map_or(offset, |(i, _)| i)
}

/// Offset `count` characters after `offset`, clamped at the text length
fn chars_after(text: &str, offset: usize, count: usize) -> usize {
    offset
        + text[offset..]
            .chars()
            .take(count)
            .map(char::len_utf8)
            .sum::<usize>()
}

/// Widen `[start, end)` by `radius` characters and snap inward to word
/// boundaries. `None` when nothing is left.
fn snap(text: &str, bounds: &DelimiterIndex, start: usize, end: usize, radius: usize) -> Option<Span> {
    let raw_start = chars_before(text, start, radius);
    let raw_end = chars_after(text, end, radius);
    let start = bounds.ceil(raw_start).unwrap_or(text.len());
    let end = bounds.floor(raw_end).unwrap_or(0);
    (start < end).then(|| Span::new(start, end))
}

fn excerpt(source: usize, text: &str, span: Span) -> Excerpt<'_> {
    Excerpt {
        source,
        start: span.start,
        text: &text[span.start..span.end],
    }
}

/// Excerpts of `radius` characters either side of each index.
///
/// Indices past the end of the text or inside a multi-byte character are
/// skipped.
pub fn windows_by_indices<'a>(text: &'a str, indices: &[usize], radius: usize) -> Vec<Excerpt<'a>> {
    let bounds = DelimiterIndex::word_boundary_starts(text);
    indices
        .iter()
        .copied()
        .filter(|&i| i < text.len() && text.is_char_boundary(i))
        .filter_map(|i| snap(text, &bounds, i, i, radius))
        .map(|span| excerpt(0, text, span))
        .collect()
}

/// Excerpts around every match of a compiled vocabulary, text by text.
pub fn windows_by_pattern<'a>(texts: &[&'a str], vocab: &VocabRegex, radius: usize) -> Vec<Excerpt<'a>> {
    let mut output = Vec::new();
    for (source, &text) in texts.iter().enumerate() {
        let bounds = DelimiterIndex::word_boundary_starts(text);
        output.extend(
            vocab
                .find_iter(text)
                .filter_map(|m| snap(text, &bounds, m.start(), m.end(), radius))
                .map(|span| excerpt(source, text, span)),
        );
    }
    tracing::debug!(texts = texts.len(), excerpts = output.len(), radius, "extracted term windows");
    output
}

/// Excerpts around every occurrence of any of `terms`.
///
/// Fails if `terms` is empty or repeats a phrase.
///
/// ```
/// use textkit_core::application::extraction::windows_by_terms;
///
/// let found = windows_by_terms(&["John went to the doctor on Monday."], &["doctor"], 5, false).unwrap();
/// assert_eq!(found[0].text.trim(), "the doctor on");
/// ```
pub fn windows_by_terms<'a, S: AsRef<str>>(
    texts: &[&'a str],
    terms: &[S],
    radius: usize,
    ignore_case: bool,
) -> Result<Vec<Excerpt<'a>>> {
    let vocab = VocabRegex::compile(terms, ignore_case)?;
    Ok(windows_by_pattern(texts, &vocab, radius))
}

/// Excerpts centred on each date the resolver finds, paired with the date.
pub fn windows_by_dates<'a>(
    texts: &[&'a str],
    resolver: &dyn DateResolver,
    radius: usize,
) -> Vec<DateWindow<'a>> {
    let mut output = Vec::new();
    for (source, &text) in texts.iter().enumerate() {
        let bounds = DelimiterIndex::word_boundary_starts(text);
        for resolved in resolver.resolve(text) {
            if resolved.center > text.len() || !text.is_char_boundary(resolved.center) {
                continue;
            }
            if let Some(span) = snap(text, &bounds, resolved.center, resolved.center, radius) {
                output.push(DateWindow {
                    excerpt: excerpt(source, text, span),
                    date: resolved.date,
                });
            }
        }
    }
    tracing::debug!(texts = texts.len(), windows = output.len(), radius, "extracted date windows");
    output
}

/// The most frequent date whose window mentions one of `terms`.
///
/// Ties go to the date seen first.
pub fn most_common_date_near<S: AsRef<str>>(
    texts: &[&str],
    terms: &[S],
    resolver: &dyn DateResolver,
    radius: usize,
) -> Result<Option<NaiveDate>> {
    let vocab = VocabRegex::compile(terms, false)?;
    let mut counts: Vec<(NaiveDate, usize)> = Vec::new();

    for window in windows_by_dates(texts, resolver, radius) {
        if !vocab.is_match(window.excerpt.text) {
            continue;
        }
        match counts.iter_mut().find(|(date, _)| *date == window.date) {
            Some((_, count)) => *count += 1,
            None => counts.push((window.date, 1)),
        }
    }

    let mut best: Option<(NaiveDate, usize)> = None;
    for (date, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((date, count));
        }
    }
    Ok(best.map(|(date, _)| date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dates::PatternDateResolver;

    #[test]
    fn test_term_window_is_word_aligned() {
        let texts = ["John went to the doctor on Monday."];
        let found = windows_by_terms(&texts, &["doctor"], 5, false).unwrap();
        assert_eq!(found.len(), 1);
        // Boundaries sit on both sides of each word, so the edges may be blank
        assert_eq!(found[0].text, " the doctor on ");
        assert_eq!(found[0].start, 12);
    }

    #[test]
    fn test_text_edge_punctuation_is_dropped() {
        let found = windows_by_terms(&["(doctor)"], &["doctor"], 10, false).unwrap();
        assert_eq!(found[0].text, "doctor");
        assert_eq!(found[0].start, 1);

        let found = windows_by_terms(&["saw doctor."], &["doctor"], 20, false).unwrap();
        assert_eq!(found[0].text, "saw doctor");

        assert!(windows_by_indices("?!", &[1], 5).is_empty());
    }

    #[test]
    fn test_terms_across_texts() {
        let texts = ["a cat sat", "no match", "cat"];
        let found = windows_by_terms(&texts, &["cat"], 2, false).unwrap();
        let sources: Vec<usize> = found.iter().map(|e| e.source).collect();
        assert_eq!(sources, vec![0, 2]);
        assert_eq!(found[1].text, "cat");
    }

    #[test]
    fn test_ignore_case_is_honoured() {
        let texts = ["The DOCTOR is in"];
        assert!(windows_by_terms(&texts, &["doctor"], 3, false).unwrap().is_empty());
        assert_eq!(windows_by_terms(&texts, &["doctor"], 3, true).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_terms_rejected() {
        assert!(windows_by_terms(&["text"], &["a", "a"], 3, false).is_err());
    }

    #[test]
    fn test_windows_by_indices() {
        let text = "the cat sat on the mat";
        let found = windows_by_indices(text, &[5, 100], 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, " cat ");
        assert_eq!(found[0].span(), Span::new(3, 8));
    }

    #[test]
    fn test_zero_radius_inside_word_is_dropped() {
        assert!(windows_by_indices("abcdef", &[3], 0).is_empty());
    }

    #[test]
    fn test_windows_by_dates() {
        let texts = ["Admitted 2020-01-03 for surgery"];
        let found = windows_by_dates(&texts, &PatternDateResolver::new(), 8);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date, NaiveDate::from_ymd_opt(2020, 1, 3).unwrap());
        assert!(found[0].excerpt.text.contains("2020"));
    }

    #[test]
    fn test_most_common_date_near() {
        let texts = [
            "DOB 1980-02-01. Seen 2020-05-05.",
            "dob: 1980-02-01",
            "DOB 1975-03-04",
        ];
        let resolver = PatternDateResolver::new();
        let date = most_common_date_near(&texts, &["DOB", "dob"], &resolver, 10).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1980, 2, 1));

        let none = most_common_date_near(&["no dates"], &["DOB"], &resolver, 10).unwrap();
        assert_eq!(none, None);
    }
}
