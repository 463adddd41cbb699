//! Vocabulary building

use crate::application::preprocess::{
    force_lower, force_punct, remove_false_periods, strip_parenthesized,
};
use crate::domain::lexicon::Lexicon;
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn acronym() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z]{3,}\b").expect("acronym pattern is valid"))
}

fn lower_word() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[a-z]{2,40}\b").expect("word pattern is valid"))
}

/// Splits lower-cased text at tokens containing digits, single letters
/// and runs of punctuation.
const MULTIGRAM_BREAKS: &str = r"\b[a-z]*[0-9][a-z0-9]*\b|\b[a-z]\b|[^a-z0-9 ]+";

/// Candidate vocabulary of a text, sorted and unique.
///
/// Collects lower-cased upper-case acronyms of three or more letters and
/// every lower-case word of 2 to 40 letters, plus `seed`. With `multigram`,
/// the phrases left between stop words, acronyms and punctuation are added
/// too. Stop words never appear in the result.
pub fn build_vocab<S: AsRef<str>>(
    text: &str,
    lexicon: &Lexicon,
    multigram: bool,
    seed: &[S],
) -> Result<Vec<String>> {
    let text = remove_false_periods(text, lexicon);
    let acronyms: Vec<String> = acronym()
        .find_iter(&text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    let text = force_punct(&force_lower(&text), false);

    let mut vocab: BTreeSet<String> = lower_word()
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .chain(acronyms.iter().cloned())
        .chain(seed.iter().map(|s| s.as_ref().to_string()))
        .collect();

    if multigram {
        let mut stops: Vec<&str> = lexicon.stop_words_longest_first();
        stops.extend(acronyms.iter().map(String::as_str));
        let alternation = stops
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = if alternation.is_empty() {
            MULTIGRAM_BREAKS.to_string()
        } else {
            format!(r"\b(?:{alternation})\b|{MULTIGRAM_BREAKS}")
        };
        let breaks = Regex::new(&pattern)?;
        vocab.extend(breaks.split(&text).map(|piece| piece.trim().to_string()));
    }

    let vocab: Vec<String> = vocab
        .into_iter()
        .filter(|term| !term.is_empty() && !lexicon.is_stop_word(term))
        .collect();
    tracing::debug!(terms = vocab.len(), multigram, "built vocabulary");
    Ok(vocab)
}

/// Splits phrase lists at tokens containing digits, punctuation marks and
/// line breaks.
const PHRASE_BREAKS: &str = r#"\b[a-z]*\d+[a-z]*\b|[%~|\\!*"'()+,./`\[\]^;:{}<>?\n\t\r\x0c]"#;

/// Multi-word candidates from a list of phrases, sorted and unique.
///
/// Each phrase is lower-cased, stripped of parenthesised text and
/// punctuation-normalised. The phrases are then cut at stop words, tokens
/// with digits and punctuation. Only pieces of two or more words and at
/// most `max_length` characters are kept.
pub fn vocab_preprocess<S: AsRef<str>>(
    phrases: &[S],
    lexicon: &Lexicon,
    max_length: usize,
) -> Result<Vec<String>> {
    let joined = phrases
        .iter()
        .map(|p| force_punct(&strip_parenthesized(&force_lower(p.as_ref())), false))
        .collect::<Vec<_>>()
        .join("\n");

    let alternation = lexicon
        .stop_words_longest_first()
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let breaks = Regex::new(&format!(r"\b(?:{alternation})\b|{PHRASE_BREAKS}"))?;

    let candidates: BTreeSet<String> = breaks
        .split(&joined)
        .map(str::trim)
        .filter(|piece| piece.split_whitespace().count() > 1)
        .filter(|piece| piece.chars().count() <= max_length)
        .map(|piece| piece.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    tracing::debug!(
        phrases = phrases.len(),
        candidates = candidates.len(),
        "preprocessed phrase list"
    );
    Ok(candidates.into_iter().collect())
}
