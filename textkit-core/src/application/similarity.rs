//! Text similarity and repeated-page detection

use crate::config::defaults;
use std::collections::{HashMap, HashSet};

/// Denominator used by [`jaccard`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JaccardMode {
    /// Shared tokens over the first text's tokens
    Left,
    /// Shared tokens over the second text's tokens
    Right,
    /// Shared tokens over the union (classic Jaccard)
    #[default]
    Union,
}

fn token_set(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Jaccard similarity of the whitespace token sets of two texts.
///
/// A zero denominator yields `0.0`.
pub fn jaccard(a: &str, b: &str, mode: JaccardMode) -> f64 {
    let a = token_set(a);
    let b = token_set(b);
    let shared = a.intersection(&b).count();
    let denominator = match mode {
        JaccardMode::Left => a.len(),
        JaccardMode::Right => b.len(),
        JaccardMode::Union => a.union(&b).count(),
    };
    ratio(shared, denominator)
}

fn letter_counts(text: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in text.chars().filter(char::is_ascii_alphabetic) {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity of ASCII letter counts (case-sensitive)
pub fn cosine(a: &str, b: &str) -> f64 {
    let a = letter_counts(a);
    let b = letter_counts(b);
    let dot: usize = a
        .iter()
        .filter_map(|(ch, &n)| b.get(ch).map(|&m| n * m))
        .sum();
    let norm = |counts: &HashMap<char, usize>| {
        (counts.values().map(|&n| (n * n) as f64).sum::<f64>()).sqrt()
    };
    let denominator = norm(&a) * norm(&b);
    if denominator == 0.0 {
        0.0
    } else {
        dot as f64 / denominator
    }
}

/// Length difference relative to the longer text, in characters.
///
/// Two empty texts differ by `0.0`; one empty text differs by `1.0`.
pub fn length_difference(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    match (la, lb) {
        (0, 0) => 0.0,
        (0, _) | (_, 0) => 1.0,
        _ => la.abs_diff(lb) as f64 / la.max(lb) as f64,
    }
}

/// Drop near-duplicates, keeping the first instance of each.
///
/// Uses the default 5% length tolerance; see [`unique_by_jaccard_within`].
pub fn unique_by_jaccard<'a>(texts: &[&'a str], threshold: f64) -> Vec<&'a str> {
    unique_by_jaccard_within(texts, threshold, defaults::LENGTH_TOLERANCE)
}

/// Drop texts that are near-duplicates of an earlier kept text.
///
/// Two texts are near-duplicates when their lengths differ by at most
/// `length_tolerance` and their token-set Jaccard similarity is at least
/// `threshold`. The length check runs first since it is cheap.
pub fn unique_by_jaccard_within<'a>(
    texts: &[&'a str],
    threshold: f64,
    length_tolerance: f64,
) -> Vec<&'a str> {
    let mut kept: Vec<(&'a str, HashSet<&'a str>)> = Vec::with_capacity(texts.len());
    for &text in texts {
        let tokens = token_set(text);
        let repeat = kept.iter().any(|(other, other_tokens)| {
            if length_difference(other, text) > length_tolerance {
                return false;
            }
            let union = other_tokens.union(&tokens).count();
            union > 0 && ratio(other_tokens.intersection(&tokens).count(), union) >= threshold
        });
        if !repeat {
            kept.push((text, tokens));
        }
    }
    tracing::debug!(input = texts.len(), kept = kept.len(), threshold, "removed near-duplicates");
    kept.into_iter().map(|(text, _)| text).collect()
}

/// Exact repeats as `(repeat, origin)` index pairs, sorted.
///
/// Empty texts never count. With `min_cluster_size > 1`, only runs of at
/// least that many consecutive repeats of consecutive origins are kept,
/// which is how duplicated page ranges show up in scanned documents.
pub fn repeated_find<S: AsRef<str>>(texts: &[S], min_cluster_size: usize) -> Vec<(usize, usize)> {
    if texts.len() <= min_cluster_size {
        return Vec::new();
    }

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut repeats = Vec::new();
    for (index, text) in texts.iter().enumerate() {
        let text = text.as_ref();
        if text.is_empty() {
            continue;
        }
        match first_seen.get(text) {
            Some(&origin) => repeats.push((index, origin)),
            None => {
                first_seen.insert(text, index);
            }
        }
    }

    if min_cluster_size <= 1 {
        return repeats;
    }

    let mut accepted = Vec::new();
    let mut run_start = 0;
    for i in 1..=repeats.len() {
        let continues = i < repeats.len()
            && repeats[i].0 == repeats[i - 1].0 + 1
            && repeats[i].1 == repeats[i - 1].1 + 1;
        if !continues {
            if i - run_start >= min_cluster_size {
                accepted.extend_from_slice(&repeats[run_start..i]);
            }
            run_start = i;
        }
    }
    accepted
}

/// Remove repeated texts, keeping the earliest instance.
///
/// With `whiteout`, repeats are replaced by empty strings so indices stay
/// aligned with the input.
pub fn repeated_delete<S: AsRef<str>>(texts: &[S], min_cluster_size: usize, whiteout: bool) -> Vec<String> {
    let repeats: HashSet<usize> = repeated_find(texts, min_cluster_size)
        .into_iter()
        .map(|(repeat, _)| repeat)
        .collect();

    texts
        .iter()
        .enumerate()
        .filter_map(|(i, text)| match (repeats.contains(&i), whiteout) {
            (false, _) => Some(text.as_ref().to_string()),
            (true, true) => Some(String::new()),
            (true, false) => None,
        })
        .collect()
}
