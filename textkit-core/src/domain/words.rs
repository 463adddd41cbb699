//! Word-boundary navigation
//!
//! Small primitives for finding the word under an offset and walking to
//! the neighbouring alphabetic word. Extraction, entity chains and the
//! false-period cleanup all go through these functions, so they share one
//! punctuation class and one alphabetic test.
//!
//! Offsets are byte offsets. An offset that is out of range or that falls
//! inside a multi-byte character is treated as "not found".

/// Characters that stop a walk to the next or previous word.
pub const PUNCTUATION: &str = "~|\\!*\"'()+,./`[]^;:{}<>?\n\t\r\x0c";

/// Returns true if `ch` belongs to the navigation punctuation class.
pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(ch)
}

/// Character starting at `index`, if `index` is a valid char boundary.
fn char_at(text: &str, index: usize) -> Option<char> {
    if !text.is_char_boundary(index) {
        return None;
    }
    text.get(index..)?.chars().next()
}

/// Character ending right before `index`, with its starting offset.
fn char_before(text: &str, index: usize) -> Option<(usize, char)> {
    text.get(..index)?.char_indices().next_back()
}

/// End of the alphabetic run that starts at or contains `index`.
fn alpha_run_end(text: &str, index: usize) -> usize {
    index
        + text[index..]
            .chars()
            .take_while(|c| c.is_alphabetic())
            .map(char::len_utf8)
            .sum::<usize>()
}

/// Start of the alphabetic run that ends at or contains `index`.
fn alpha_run_start(text: &str, index: usize) -> usize {
    text[..index]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic())
        .last()
        .map_or(index, |(i, _)| i)
}

/// Maximal alphabetic substring containing `index`.
///
/// Returns `None` when the character at `index` is not alphabetic.
///
/// ```
/// use textkit_core::domain::words::full_word;
///
/// assert_eq!(full_word("the cat sat", 5), Some("cat"));
/// assert_eq!(full_word("the cat sat", 3), None);
/// ```
pub fn full_word(text: &str, index: usize) -> Option<&str> {
    if !char_at(text, index)?.is_alphabetic() {
        return None;
    }
    Some(&text[alpha_run_start(text, index)..alpha_run_end(text, index)])
}

/// Start offset of the word containing `index`.
pub fn word_start(text: &str, index: usize) -> Option<usize> {
    if !char_at(text, index)?.is_alphabetic() {
        return None;
    }
    Some(alpha_run_start(text, index))
}

/// Exclusive end offset of the token at `index`.
///
/// For an alphabetic character this is the end of its word. A lone
/// non-alphabetic character is its own token, unless it is punctuation,
/// in which case there is no word to end.
pub fn word_end(text: &str, index: usize) -> Option<usize> {
    let current = char_at(text, index)?;
    if current.is_alphabetic() {
        Some(alpha_run_end(text, index))
    } else if is_punctuation(current) {
        None
    } else {
        Some(index + current.len_utf8())
    }
}

/// Start offset of the next alphabetic word after the token at `index`.
///
/// The walk skips spaces, digits and other non-punctuation characters,
/// and gives up as soon as it meets punctuation or the end of the text.
pub fn next_word_start(text: &str, index: usize) -> Option<usize> {
    let current = char_at(text, index)?;
    let mut cursor = if current.is_alphabetic() {
        alpha_run_end(text, index)
    } else {
        index + current.len_utf8()
    };

    while let Some(ch) = char_at(text, cursor) {
        if is_punctuation(ch) {
            return None;
        }
        if ch.is_alphabetic() {
            return Some(cursor);
        }
        cursor += ch.len_utf8();
    }
    None
}

/// Start offset of the alphabetic word before the token at `index`.
///
/// Mirrors [`next_word_start`]: step back over the current token, then over
/// a gap free of punctuation, then to the start of the previous word.
pub fn prev_word_start(text: &str, index: usize) -> Option<usize> {
    let current = char_at(text, index)?;
    let token_start = if current.is_alphabetic() {
        alpha_run_start(text, index)
    } else {
        index
    };

    let (mut pos, mut ch) = char_before(text, token_start)?;
    while !ch.is_alphabetic() {
        if is_punctuation(ch) {
            return None;
        }
        (pos, ch) = char_before(text, pos)?;
    }
    Some(alpha_run_start(text, pos))
}

/// The full word after the token at `index`.
pub fn next_word(text: &str, index: usize) -> Option<&str> {
    full_word(text, next_word_start(text, index)?)
}

/// The full word before the token at `index`.
pub fn prev_word(text: &str, index: usize) -> Option<&str> {
    full_word(text, prev_word_start(text, index)?)
}

/// Returns true if any character is upper case.
pub fn has_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase)
}

/// Returns true if any character is lower case.
pub fn has_lower(text: &str) -> bool {
    text.chars().any(char::is_lowercase)
}
