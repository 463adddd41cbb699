//! Lexical statistics
//!
//! Cheap descriptive measures of a text, used as features for downstream
//! classifiers and for spotting OCR noise. Ratios over an empty population
//! return `0.0` unless noted otherwise.

use serde::Serialize;
use std::collections::HashMap;

/// Punctuation counted by [`punct_ratio`]
const PUNCT: &str = "~|\\!*\"'()+,./`[]^;:{}<>?’-";
/// Punctuation counted by [`clustering_coefficient`]
const CLUSTER_PUNCT: &str = "~|_\\!*\"'()+,./`[]^;:{}<>?\n\t\r\x0c";
/// Columns of [`punct_frequencies`]
pub const PUNCT_COLUMNS: [char; 9] = ['!', '?', ',', '(', ')', '\'', '-', '.', '"'];
/// Columns of [`letter_frequencies`]
pub const LETTER_COLUMNS: &str = "abcdefghijklmnopqrstuvwxyz_";
/// Average English word length, used when a text has no words
pub const DEFAULT_WORD_LENGTH: f64 = 5.1;

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Maximal `[A-Za-z_]` runs bounded by non-word characters.
///
/// A run touching a digit is not a word, matching `\b[a-zA-Z_]+\b`.
pub fn words(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut touches_digit = false;
    let mut prev: Option<char> = None;

    for (i, ch) in text.char_indices() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(i);
                touches_digit = prev.is_some_and(|p| p.is_alphanumeric());
            }
        } else if let Some(s) = start.take() {
            if !touches_digit && !ch.is_alphanumeric() {
                out.push(&text[s..i]);
            }
        }
        prev = Some(ch);
    }
    if let Some(s) = start {
        if !touches_digit {
            out.push(&text[s..]);
        }
    }
    out
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn char_ratio(text: &str, pred: impl Fn(char) -> bool) -> f64 {
    let (mut hits, mut total) = (0, 0);
    for ch in text.chars() {
        total += 1;
        if pred(ch) {
            hits += 1;
        }
    }
    ratio(hits, total)
}

/// Upper-case share of ASCII letters
pub fn upper_ratio(text: &str) -> f64 {
    let letters = text.chars().filter(char::is_ascii_alphabetic).count();
    ratio(text.chars().filter(char::is_ascii_uppercase).count(), letters)
}

pub fn space_ratio(text: &str) -> f64 {
    char_ratio(text, char::is_whitespace)
}

pub fn alpha_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

pub fn alpha_ratio(text: &str) -> f64 {
    char_ratio(text, char::is_alphabetic)
}

/// Share of `[0-9A-Za-z_]` characters
pub fn alphanumeric_ratio(text: &str) -> f64 {
    char_ratio(text, |c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn numeric_ratio(text: &str) -> f64 {
    char_ratio(text, char::is_numeric)
}

pub fn punct_ratio(text: &str) -> f64 {
    char_ratio(text, |c| PUNCT.contains(c))
}

pub fn word_count(text: &str) -> usize {
    words(text).len()
}

pub fn unique_word_count(text: &str) -> usize {
    let mut seen: Vec<&str> = words(text);
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Share of words shorter than four letters
pub fn short_word_ratio(text: &str) -> f64 {
    let words = words(text);
    ratio(words.iter().filter(|w| w.len() < 4).count(), words.len())
}

pub fn one_letter_word_ratio(text: &str) -> f64 {
    let words = words(text);
    ratio(words.iter().filter(|w| w.len() == 1).count(), words.len())
}

/// Mean word length, or [`DEFAULT_WORD_LENGTH`] without words
pub fn average_word_length(text: &str) -> f64 {
    let words = words(text);
    if words.is_empty() {
        return DEFAULT_WORD_LENGTH;
    }
    words.iter().map(|w| w.len()).sum::<usize>() as f64 / words.len() as f64
}

/// Share of words of each length `1..=max_len`
pub fn word_length_frequencies(text: &str, max_len: usize) -> Vec<f64> {
    let words = words(text);
    (1..=max_len)
        .map(|n| ratio(words.iter().filter(|w| w.len() == n).count(), words.len()))
        .collect()
}

/// Frequency of each of [`LETTER_COLUMNS`] among lower-cased letters
pub fn letter_frequencies(text: &str) -> Vec<f64> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in lower.chars().filter(|&c| c.is_ascii_lowercase() || c == '_') {
        *counts.entry(ch).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    LETTER_COLUMNS
        .chars()
        .map(|c| ratio(counts.get(&c).copied().unwrap_or(0), total))
        .collect()
}

/// Frequency of each of [`PUNCT_COLUMNS`] among all characters
pub fn punct_frequencies(text: &str) -> Vec<f64> {
    let total = text.chars().count();
    PUNCT_COLUMNS
        .iter()
        .map(|&p| ratio(text.chars().filter(|&c| c == p).count(), total))
        .collect()
}

/// Share of word tokens whose word occurs exactly `n` times
pub fn hapax_ratio(text: &str, n: usize) -> f64 {
    let words = words(text);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &w in &words {
        *counts.entry(w).or_insert(0) += 1;
    }
    ratio(words.iter().filter(|w| counts[*w] == n).count(), words.len())
}

/// Sentence terminators attached to a word character, at least one
pub fn sentence_count(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let count = chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            matches!(c, '!' | '?' | '.')
                && (i.checked_sub(1).is_some_and(|p| is_word_char(chars[p]))
                    || chars.get(i + 1).is_some_and(|&n| is_word_char(n)))
        })
        .count();
    count.max(1)
}

pub fn words_per_sentence(text: &str) -> f64 {
    word_count(text) as f64 / sentence_count(text) as f64
}

/// Sentences per word, `1.0` without words
pub fn sentences_per_word(text: &str) -> f64 {
    match word_count(text) {
        0 => 1.0,
        n => sentence_count(text) as f64 / n as f64,
    }
}

/// Tokens per distinct type over lower-cased words, `1.0` without words
pub fn token_type_ratio(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words = words(&lower);
    let types = unique_word_count(&lower);
    if types == 0 {
        1.0
    } else {
        words.len() as f64 / types as f64
    }
}

/// Yule's K over lower-cased words, `0.0` when every word is unique
pub fn yules_k(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in words(&lower) {
        *counts.entry(w).or_insert(0) += 1;
    }
    let m1: usize = counts.values().sum();
    let m2: usize = counts.values().map(|f| f * f).sum();
    if m2 == m1 {
        0.0
    } else {
        (m1 * m1) as f64 / (m2 - m1) as f64
    }
}

/// Character class measured by [`clustering_coefficient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Whole words; a single space before a word does not separate it
    Word,
    Alpha,
    Numeric,
    Punct,
}

/// How often members of a class sit next to each other.
///
/// `1.0` means every member touches another, `0.0` that none do. Fewer
/// than two members count as fully clustered.
pub fn clustering_coefficient(text: &str, class: CharClass) -> f64 {
    let units: Vec<bool> = match class {
        CharClass::Word => word_units(text),
        CharClass::Alpha => text.chars().map(|c| c.is_ascii_alphabetic()).collect(),
        CharClass::Numeric => text.chars().map(|c| c.is_ascii_digit()).collect(),
        CharClass::Punct => text
            .chars()
            .filter(|&c| c != ' ')
            .map(|c| CLUSTER_PUNCT.contains(c))
            .collect(),
    };

    let members = units.iter().filter(|&&u| u).count();
    if members < 2 {
        return 1.0;
    }
    let pairs = units.windows(2).filter(|w| w[0] && w[1]).count();
    pairs as f64 / (members - 1) as f64
}

/// One `true` per alphabetic word, `false` per other character, with a
/// single space directly before a word dropped.
fn word_units(text: &str) -> Vec<bool> {
    let chars: Vec<char> = text.chars().collect();
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_alphabetic() {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            units.push(true);
        } else {
            let space_before_word =
                chars[i] == ' ' && chars.get(i + 1).is_some_and(|c| c.is_ascii_alphabetic());
            if !space_before_word {
                units.push(false);
            }
            i += 1;
        }
    }
    units
}

/// Summary of the lexical measures of one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextProfile {
    pub chars: usize,
    pub words: usize,
    pub unique_words: usize,
    pub sentences: usize,
    pub upper_ratio: f64,
    pub space_ratio: f64,
    pub alpha_ratio: f64,
    pub alphanumeric_ratio: f64,
    pub numeric_ratio: f64,
    pub punct_ratio: f64,
    pub short_word_ratio: f64,
    pub one_letter_word_ratio: f64,
    pub average_word_length: f64,
    pub words_per_sentence: f64,
    pub hapax_ratio: f64,
    pub token_type_ratio: f64,
    pub yules_k: f64,
    pub word_clustering: f64,
}

impl TextProfile {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: word_count(text),
            unique_words: unique_word_count(text),
            sentences: sentence_count(text),
            upper_ratio: upper_ratio(text),
            space_ratio: space_ratio(text),
            alpha_ratio: alpha_ratio(text),
            alphanumeric_ratio: alphanumeric_ratio(text),
            numeric_ratio: numeric_ratio(text),
            punct_ratio: punct_ratio(text),
            short_word_ratio: short_word_ratio(text),
            one_letter_word_ratio: one_letter_word_ratio(text),
            average_word_length: average_word_length(text),
            words_per_sentence: words_per_sentence(text),
            hapax_ratio: hapax_ratio(text, 1),
            token_type_ratio: token_type_ratio(text),
            yules_k: yules_k(text),
            word_clustering: clustering_coefficient(text, CharClass::Word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_words_follow_word_boundaries() {
        assert_eq!(words("The cat_s sat."), vec!["The", "cat_s", "sat"]);
        assert_eq!(words("abc1 x2 y"), vec!["y"]);
        assert!(words("123 !!").is_empty());
    }

    #[test]
    fn test_character_ratios() {
        assert!(close(upper_ratio("AbCd"), 0.5));
        assert!(close(space_ratio("a b "), 0.5));
        assert!(close(numeric_ratio("a1"), 0.5));
        assert!(close(punct_ratio("a."), 0.5));
        assert_eq!(alpha_count("ab1é"), 3);
        assert_eq!(upper_ratio("123"), 0.0);
        assert_eq!(space_ratio(""), 0.0);
    }

    #[test]
    fn test_word_measures() {
        let text = "a bb ccc dddd";
        assert_eq!(word_count(text), 4);
        assert!(close(short_word_ratio(text), 0.75));
        assert!(close(one_letter_word_ratio(text), 0.25));
        assert!(close(average_word_length(text), 2.5));
        assert_eq!(average_word_length("42"), DEFAULT_WORD_LENGTH);
        let freqs = word_length_frequencies(text, 5);
        assert_eq!(freqs.len(), 5);
        assert!(close(freqs[0], 0.25));
        assert_eq!(freqs[4], 0.0);
    }

    #[test]
    fn test_frequency_vectors() {
        let letters = letter_frequencies("aab");
        assert_eq!(letters.len(), 27);
        assert!(close(letters[0], 2.0 / 3.0));
        let punct = punct_frequencies("a!b?");
        assert!(close(punct[0], 0.25));
        assert!(close(punct[1], 0.25));
    }

    #[test]
    fn test_sentences() {
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("no terminator"), 1);
        assert!(close(words_per_sentence("One two. Three four."), 2.0));
        assert_eq!(sentences_per_word(""), 1.0);
    }

    #[test]
    fn test_vocabulary_richness() {
        assert!(close(hapax_ratio("a b b c", 1), 0.5));
        assert!(close(token_type_ratio("The the cat"), 1.5));
        assert_eq!(token_type_ratio(""), 1.0);
        assert_eq!(yules_k("a b c"), 0.0);
        // m1 = 3, m2 = 5
        assert!(close(yules_k("a a b"), 4.5));
    }

    #[test]
    fn test_clustering_coefficient() {
        assert!(close(clustering_coefficient("one two three", CharClass::Word), 1.0));
        assert!(close(clustering_coefficient("one, two, three", CharClass::Word), 0.0));
        assert!(close(clustering_coefficient("ab1", CharClass::Alpha), 1.0));
        assert!(close(clustering_coefficient("1a2b", CharClass::Numeric), 0.0));
        assert_eq!(clustering_coefficient("x", CharClass::Punct), 1.0);
    }

    #[test]
    fn test_profile() {
        let profile = TextProfile::of("The cat sat. The dog ran!");
        assert_eq!(profile.words, 6);
        assert_eq!(profile.sentences, 2);
        assert_eq!(profile.unique_words, 5);
    }
}
