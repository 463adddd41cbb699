//! Vocabulary vectors
//!
//! Columns follow the vocabulary in the order it was given, whatever order
//! the underlying regex tries the phrases in.

use crate::domain::vocab::VocabRegex;
use crate::error::{Error, Result};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps vocabulary matches in a text to column vectors.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    vocab: VocabRegex,
    terms: Vec<String>,
    columns: HashMap<String, usize>,
}

impl Vectorizer {
    /// Build a vectorizer over `vocabulary`.
    ///
    /// With `ignore_case`, two phrases that differ only in case are
    /// rejected as duplicates.
    pub fn new<S: AsRef<str>>(vocabulary: &[S], ignore_case: bool) -> Result<Self> {
        let vocab = VocabRegex::compile(vocabulary, ignore_case)?;
        let terms: Vec<String> = vocabulary.iter().map(|t| t.as_ref().to_string()).collect();

        let mut columns = HashMap::with_capacity(terms.len());
        for (column, term) in terms.iter().enumerate() {
            let key = if ignore_case { term.to_lowercase() } else { term.clone() };
            if columns.insert(key, column).is_some() {
                return Err(Error::DuplicatePhrase(term.clone()));
            }
        }

        Ok(Self {
            vocab,
            terms,
            columns,
        })
    }

    /// Column labels
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn column_of(&self, matched: &str) -> Option<usize> {
        if self.vocab.ignore_case() {
            self.columns.get(&matched.to_lowercase()).copied()
        } else {
            self.columns.get(matched).copied()
        }
    }

    /// Occurrences of each term
    pub fn counts(&self, text: &str) -> Vec<usize> {
        let mut vector = vec![0; self.terms.len()];
        for m in self.vocab.find_iter(text) {
            if let Some(column) = self.column_of(m.as_str()) {
                vector[column] += 1;
            }
        }
        vector
    }

    /// Whether each term occurs at all
    pub fn presence(&self, text: &str) -> Vec<bool> {
        self.counts(text).into_iter().map(|n| n > 0).collect()
    }

    /// Counts scaled to unit L2 norm; all zeros when nothing matches
    pub fn term_frequencies(&self, text: &str) -> Vec<f64> {
        let counts = self.counts(text);
        let norm = counts.iter().map(|&n| (n * n) as f64).sum::<f64>().sqrt();
        counts
            .into_iter()
            .map(|n| if norm > 0.0 { n as f64 / norm } else { 0.0 })
            .collect()
    }

    /// [`Self::counts`] for each text
    pub fn counts_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<usize>> {
        self.batch(texts, |text| self.counts(text))
    }

    /// [`Self::presence`] for each text
    pub fn presence_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<bool>> {
        self.batch(texts, |text| self.presence(text))
    }

    /// [`Self::term_frequencies`] for each text
    pub fn term_frequencies_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<f64>> {
        self.batch(texts, |text| self.term_frequencies(text))
    }

    fn batch<S, T, F>(&self, texts: &[S], f: F) -> Vec<T>
    where
        S: AsRef<str> + Sync,
        T: Send,
        F: Fn(&str) -> T + Sync + Send,
    {
        map_texts(texts, f)
    }
}

#[cfg(feature = "parallel")]
fn map_texts<S, T, F>(texts: &[S], f: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    texts.par_iter().map(|text| f(text.as_ref())).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_texts<S, T, F>(texts: &[S], f: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    texts.iter().map(|text| f(text.as_ref())).collect()
}

/// Symbols of the character trigram space; `P` stands for punctuation
pub const TRIGRAM_ALPHABET: [char; 28] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', ' ', 'P',
];

/// Length of a trigram frequency vector
pub const TRIGRAM_COLUMNS: usize = TRIGRAM_ALPHABET.len().pow(3);

fn trigram_symbol(ch: char) -> Option<usize> {
    match ch {
        'a'..='z' => Some(ch as usize - 'a' as usize),
        ' ' => Some(26),
        'P' => Some(27),
        _ => None,
    }
}

/// Reduce text to the trigram alphabet.
///
/// Punctuation other than periods becomes `P`; digits, blanks and any
/// other symbols collapse to a double space per run. Periods survive but
/// no trigram uses them.
fn trigram_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.to_lowercase().chars() {
        let ch = match ch {
            'a'..='z' | '0'..='9' | '.' | ' ' => ch,
            _ => 'P',
        };
        if matches!(ch, 'a'..='z' | 'P' | '.') {
            out.push(ch);
            in_gap = false;
        } else if !in_gap {
            out.push_str("  ");
            in_gap = true;
        }
    }
    out
}

/// Character trigram frequencies scaled to unit L2 norm.
///
/// Column `i` counts the trigram whose symbols have alphabet positions
/// `i / 784`, `i / 28 % 28` and `i % 28`. All zeros when the text has no
/// trigram.
pub fn trigram_frequencies(text: &str) -> Vec<f64> {
    let symbols: Vec<Option<usize>> = trigram_text(text).chars().map(trigram_symbol).collect();
    let base = TRIGRAM_ALPHABET.len();
    let mut vector = vec![0.0; TRIGRAM_COLUMNS];
    for triple in symbols.windows(3) {
        if let &[Some(a), Some(b), Some(c)] = triple {
            vector[(a * base + b) * base + c] += 1.0;
        }
    }

    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}

/// [`trigram_frequencies`] for each text
pub fn trigram_frequencies_batch<S: AsRef<str> + Sync>(texts: &[S]) -> Vec<Vec<f64>> {
    map_texts(texts, trigram_frequencies)
}

/// Total occurrences of each term across `texts`, most frequent first.
///
/// Ties keep vocabulary order.
pub fn vocab_counts<S: AsRef<str> + Sync, V: AsRef<str>>(
    texts: &[S],
    vocabulary: &[V],
) -> Result<Vec<(String, usize)>> {
    let vectorizer = Vectorizer::new(vocabulary, false)?;
    let mut totals = vec![0; vectorizer.terms().len()];
    for row in vectorizer.counts_batch(texts) {
        for (total, n) in totals.iter_mut().zip(row) {
            *total += n;
        }
    }

    let mut counts: Vec<(String, usize)> = vectorizer.terms().iter().cloned().zip(totals).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_vocabulary_order() {
        let vectorizer = Vectorizer::new(&["cat", "category", "dog"], false).unwrap();
        assert_eq!(vectorizer.counts("category cat cat"), vec![2, 1, 0]);
        assert_eq!(vectorizer.presence("dog"), vec![false, false, true]);
    }

    #[test]
    fn test_term_frequencies_unit_norm() {
        let vectorizer = Vectorizer::new(&["a", "b"], false).unwrap();
        let tf = vectorizer.term_frequencies("a a a b b b b");
        assert!((tf[0] - 0.6).abs() < 1e-9);
        assert!((tf[1] - 0.8).abs() < 1e-9);
        assert_eq!(vectorizer.term_frequencies("none"), vec![0.0, 0.0]);
    }

    #[test]
    fn test_ignore_case() {
        let vectorizer = Vectorizer::new(&["Doctor"], true).unwrap();
        assert_eq!(vectorizer.counts("doctor DOCTOR Doctor"), vec![3]);
        assert!(matches!(
            Vectorizer::new(&["Doctor", "doctor"], true),
            Err(Error::DuplicatePhrase(_))
        ));
        assert!(Vectorizer::new(&["Doctor", "doctor"], false).is_ok());
    }

    #[test]
    fn test_batch_keeps_order() {
        let vectorizer = Vectorizer::new(&["x"], false).unwrap();
        let rows = vectorizer.counts_batch(&["x", "x x", "", "x x x"]);
        assert_eq!(rows, vec![vec![1], vec![2], vec![0], vec![3]]);
    }

    #[test]
    fn test_vocab_counts() {
        let counts = vocab_counts(&["a b b", "b c"], &["a", "b", "c", "d"]).unwrap();
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 1),
                ("c".to_string(), 1),
                ("d".to_string(), 0)
            ]
        );
    }

    fn column(trigram: &str) -> usize {
        let base = TRIGRAM_ALPHABET.len();
        trigram.chars().fold(0, |acc, ch| {
            acc * base + TRIGRAM_ALPHABET.iter().position(|&c| c == ch).unwrap()
        })
    }

    #[test]
    fn test_trigram_text_reduction() {
        assert_eq!(trigram_text("Hi, A1b."), "hiP  a  b.");
        assert_eq!(trigram_text("x  y"), "x  y");
    }

    #[test]
    fn test_trigram_frequencies() {
        let tf = trigram_frequencies("abc");
        assert_eq!(tf.len(), TRIGRAM_COLUMNS);
        assert_eq!(tf[column("abc")], 1.0);
        assert_eq!(tf.iter().filter(|&&v| v > 0.0).count(), 1);

        let tf = trigram_frequencies("abab");
        let half = 1.0 / 2f64.sqrt();
        assert!((tf[column("aba")] - half).abs() < 1e-9);
        assert!((tf[column("bab")] - half).abs() < 1e-9);
    }

    #[test]
    fn test_trigrams_skip_periods_and_short_text() {
        let tf = trigram_frequencies("a.b");
        assert!(tf.iter().all(|&v| v == 0.0));
        assert!(trigram_frequencies("ab").iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_trigram_batch_keeps_order() {
        let rows = trigram_frequencies_batch(&["abc", "", "bcd"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][column("abc")], 1.0);
        assert!(rows[1].iter().all(|&v| v == 0.0));
        assert_eq!(rows[2][column("bcd")], 1.0);
    }
}
