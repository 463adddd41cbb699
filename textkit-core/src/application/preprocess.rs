//! Text normalisation
//!
//! Every function takes one text and returns a new string; batch callers
//! iterate. [`Preprocessor`] chains the steps used before vocabulary
//! matching.

use crate::application::dates::{month_name_pattern, numeric_pattern};
use crate::domain::lexicon::Lexicon;
use crate::domain::words;
use crate::error::Result;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Characters removed by [`force_punct`] when `all_punct` is set
const ALL_PUNCT: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~•—";

/// Separators that become spaces when they touch a lower-case letter
const JOINERS: &str = "-_/<>";

fn multi_space() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r" {2,}").expect("space pattern is valid"))
}

fn multi_period() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.{2,}").expect("period pattern is valid"))
}

fn inner_apostrophe() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b'\b").expect("apostrophe pattern is valid"))
}

fn period_before_letter() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.\s*[a-zA-Z]").expect("period pattern is valid"))
}

fn parenthesized() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(.*\)").expect("parenthesis pattern is valid"))
}

fn number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b-?\d+\.?\d*(?:[eE][+-]\d+)?\b").expect("number pattern is valid")
    })
}

fn clock_time() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)\b(?:(?:0?[1-9]|1[0-2])(?:[:.][0-5][0-9]){1,2} ?(?:am|pm)\b",
            r"|(?:[01]?[0-9]|2[0-3])(?:[:.][0-5][0-9]){1,2}\b)",
        ))
        .expect("time pattern is valid")
    })
}

fn phone_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:\+\d{1,2}\s)?\(?\d{3}\)?[\s.-]\d{3}[\s.-]\d{4}\b")
            .expect("phone pattern is valid")
    })
}

/// Lower-case the text
pub fn force_lower(text: &str) -> String {
    text.to_lowercase()
}

/// Normalise punctuation.
///
/// Dashes, underscores, slashes and angle brackets touching a lower-case
/// letter become spaces. With `all_punct`, every ASCII punctuation mark
/// does too. Space runs collapse, apostrophes inside words become spaces
/// and period runs collapse to one period.
pub fn force_punct(text: &str, all_punct: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &ch) in chars.iter().enumerate() {
        let joins_word = JOINERS.contains(ch)
            && (chars.get(i + 1).is_some_and(char::is_ascii_lowercase)
                || i.checked_sub(1)
                    .and_then(|p| chars.get(p))
                    .is_some_and(char::is_ascii_lowercase));
        if joins_word || (all_punct && ALL_PUNCT.contains(ch)) {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    let out = multi_space().replace_all(&out, " ");
    let out = inner_apostrophe().replace_all(&out, " ");
    multi_period().replace_all(&out, ".").into_owned()
}

/// Drop periods that do not end a sentence.
///
/// Periods inside dotted acronyms go first (`U.S.A.` becomes `USA`). Then a
/// period followed by a letter is dropped when the word before it is one of
/// the lexicon's abbreviation prefixes (`Dr. Smith` becomes `Dr Smith`).
pub fn remove_false_periods(text: &str, lexicon: &Lexicon) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut text: String = chars
        .iter()
        .enumerate()
        .filter(|&(i, &ch)| {
            !(ch == '.'
                && i >= 2
                && chars[i - 2] == '.'
                && chars[i - 1].is_ascii_alphabetic())
        })
        .map(|(_, &ch)| ch)
        .collect();

    let periods: Vec<usize> = period_before_letter()
        .find_iter(&text)
        .map(|m| m.start())
        .collect();
    for &pos in periods.iter().rev() {
        let after_letter = text[..pos].chars().next_back().is_some_and(char::is_alphabetic);
        if after_letter
            && words::prev_word(&text, pos).is_some_and(|w| lexicon.is_abbreviation_prefix(w))
        {
            text.remove(pos);
        }
    }
    text
}

/// Remove everything from the first `(` to the last `)` on each line
pub fn strip_parenthesized(text: &str) -> String {
    parenthesized().replace_all(text, "").into_owned()
}

/// Join hard-wrapped lines.
///
/// A lone `\r\n` becomes a space; `\r\n\r\n` paragraph breaks are kept.
pub fn strip_line_returns(text: &str) -> String {
    const CRLF: &str = "\r\n";
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in text.match_indices(CRLF) {
        let after_break = text[..pos].ends_with(CRLF);
        let before_break = text[pos + CRLF.len()..].starts_with(CRLF);
        if !after_break && !before_break {
            out.push_str(&text[last..pos]);
            out.push(' ');
            last = pos + CRLF.len();
        }
    }
    out.push_str(&text[last..]);
    out
}

/// Replace numbers with `NUM`, or delete them when `keep` is false
pub fn force_number(text: &str, keep: bool) -> String {
    number()
        .replace_all(text, if keep { "NUM" } else { "" })
        .into_owned()
}

fn mask_matches(text: &str, pattern: &Regex, keep: bool) -> String {
    if keep {
        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                caps[0]
                    .chars()
                    .map(|c| if c.is_whitespace() { c } else { 'X' })
                    .collect::<String>()
            })
            .into_owned()
    } else {
        pattern.replace_all(text, "").into_owned()
    }
}

/// Hide dates, clock times and phone numbers.
///
/// With `keep`, every non-blank character of a match becomes `X` so the
/// text keeps its shape; otherwise matches are deleted. Dates go first, so
/// their digits are never read again as times.
pub fn force_demographic(text: &str, keep: bool) -> String {
    let text = mask_matches(text, numeric_pattern(), keep);
    let text = mask_matches(&text, month_name_pattern(), keep);
    let text = mask_matches(&text, clock_time(), keep);
    mask_matches(&text, phone_number(), keep)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Split a text into sentences at the blank after `.`, `?` or `!`.
///
/// No split happens after dotted short forms (`e.g.`, `U.S.`), after a
/// capitalised two-letter word and a period (`Dr.`, `Mr.`), or after a
/// period that follows a blank. The blank itself is dropped; any further
/// blanks stay at the start of the next sentence.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let before = |i: usize, back: usize| i.checked_sub(back).map(|j| chars[j].1);

    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, &(offset, ch)) in chars.iter().enumerate() {
        if !ch.is_whitespace() || !matches!(before(i, 1), Some('.' | '?' | '!')) {
            continue;
        }
        let dotted = before(i, 4).is_some_and(is_word_char)
            && before(i, 3) == Some('.')
            && before(i, 2).is_some_and(is_word_char);
        let title = before(i, 1) == Some('.')
            && before(i, 2).is_some_and(|c| c.is_ascii_lowercase())
            && before(i, 3).is_some_and(|c| c.is_ascii_uppercase());
        let loose_period = before(i, 1) == Some('.') && before(i, 2).is_some_and(char::is_whitespace);
        if dotted || title || loose_period {
            continue;
        }
        sentences.push(&text[start..offset]);
        start = offset + ch.len_utf8();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Spells out the lexicon's short forms.
///
/// Matching is case-sensitive against the lower-case entries, so run it
/// after [`force_lower`].
#[derive(Debug, Clone)]
pub struct AbbreviationExpander<'a> {
    lexicon: &'a Lexicon,
    pattern: Option<Regex>,
}

impl<'a> AbbreviationExpander<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Result<Self> {
        let mut shorts: Vec<&str> = lexicon.abbreviations.keys().map(String::as_str).collect();
        shorts.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = if shorts.is_empty() {
            None
        } else {
            let alternation = shorts
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b"))?)
        };
        Ok(Self { lexicon, pattern })
    }

    pub fn expand(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                self.lexicon
                    .expansion(&caps[0])
                    .unwrap_or(&caps[0])
                    .to_string()
            })
            .into_owned()
    }
}

/// Expand short forms with a one-off [`AbbreviationExpander`]
pub fn force_abbr(text: &str, lexicon: &Lexicon) -> Result<String> {
    Ok(AbbreviationExpander::new(lexicon)?.expand(text))
}

/// Strip leading and trailing non-alphanumeric characters from a word
pub fn strip_nonalphanumeric(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Lower-case, trim every word to its alphanumeric core and re-join with
/// single spaces (`"Abc- (def)"` becomes `"abc def"`).
pub fn trim_to_alphanumeric(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(strip_nonalphanumeric)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Standard normalisation chain: lower case, punctuation, false periods
/// and, when an expander is attached, short forms.
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor<'a> {
    lexicon: &'a Lexicon,
    all_punct: bool,
    abbreviations: Option<&'a AbbreviationExpander<'a>>,
}

impl<'a> Preprocessor<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            all_punct: false,
            abbreviations: None,
        }
    }

    /// Also blank every punctuation mark
    pub fn all_punct(mut self, all_punct: bool) -> Self {
        self.all_punct = all_punct;
        self
    }

    /// Spell out short forms as the last step
    pub fn expand_abbreviations(mut self, expander: &'a AbbreviationExpander<'a>) -> Self {
        self.abbreviations = Some(expander);
        self
    }

    pub fn preprocess(&self, text: &str) -> String {
        let text = force_lower(text);
        let text = force_punct(&text, self.all_punct);
        let text = remove_false_periods(&text, self.lexicon);
        match self.abbreviations {
            Some(expander) => expander.expand(&text),
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Lexicon {
        Lexicon::english().unwrap()
    }

    #[test]
    fn test_force_punct_joiners() {
        assert_eq!(force_punct("follow-up x-ray", false), "follow up x ray");
        assert_eq!(force_punct("snake_case", false), "snake case");
        assert_eq!(force_punct("10-20", false), "10-20");
    }

    #[test]
    fn test_force_punct_collapses() {
        assert_eq!(force_punct("a  b...", false), "a b.");
        assert_eq!(force_punct("don't", false), "don t");
    }

    #[test]
    fn test_force_punct_all() {
        assert_eq!(force_punct("Hi, (you)!", true), "Hi you ");
    }

    #[test]
    fn test_remove_false_periods() {
        let lexicon = english();
        assert_eq!(
            remove_false_periods("Dr. Smith met Mr. Jones.", &lexicon),
            "Dr Smith met Mr Jones."
        );
        assert_eq!(remove_false_periods("The end. Next one", &lexicon), "The end. Next one");
    }

    #[test]
    fn test_remove_acronym_periods() {
        let lexicon = english();
        assert_eq!(remove_false_periods("the U.S.A. is big", &lexicon), "the USA is big");
    }

    #[test]
    fn test_strip_parenthesized() {
        assert_eq!(strip_parenthesized("aspirin (81 mg) daily"), "aspirin  daily");
    }

    #[test]
    fn test_strip_line_returns() {
        assert_eq!(
            strip_line_returns("one\r\ntwo\r\n\r\nthree"),
            "one two\r\n\r\nthree"
        );
    }

    #[test]
    fn test_force_number() {
        assert_eq!(force_number("took 2.5 mg at 10", true), "took NUM mg at NUM");
        assert_eq!(force_number("x 1e+5 y", true), "x NUM y");
        assert_eq!(force_number("took 2 pills", false), "took  pills");
    }

    #[test]
    fn test_trim_to_alphanumeric() {
        assert_eq!(trim_to_alphanumeric("  Abc-  (def) --  "), "abc def");
        assert_eq!(strip_nonalphanumeric("--x--"), "x");
    }

    #[test]
    fn test_force_demographic_masks() {
        let text = "Seen 2011-09-30 at 10:30 am, call 555-123-4567";
        assert_eq!(
            force_demographic(text, true),
            "Seen XXXXXXXXXX at XXXXX XX, call XXXXXXXXXXXX"
        );
        assert_eq!(force_demographic(text, false), "Seen  at , call ");
        assert_eq!(force_demographic("born Sep 30th, 2011.", true), "born XXX XXXXX XXXX.");
        assert_eq!(force_demographic("took 2 pills", true), "took 2 pills");
    }

    #[test]
    fn test_split_into_sentences() {
        let text = "Dr. Smith arrived. He left? Yes! See e.g. the note.";
        assert_eq!(
            split_into_sentences(text),
            vec!["Dr. Smith arrived.", "He left?", "Yes!", "See e.g. the note."]
        );
        assert_eq!(split_into_sentences("one . two"), vec!["one . two"]);
        assert_eq!(split_into_sentences("A.  B"), vec!["A.", " B"]);
        assert_eq!(split_into_sentences(""), vec![""]);
    }

    #[test]
    fn test_force_abbr() {
        let lexicon = english();
        assert_eq!(force_abbr("pt with cp", &lexicon).unwrap(), "patient with chest pain");
        assert_eq!(force_abbr("opt PT", &lexicon).unwrap(), "opt PT");
    }

    #[test]
    fn test_preprocessor_expands_abbreviations() {
        let lexicon = english();
        let expander = AbbreviationExpander::new(&lexicon).unwrap();
        let pre = Preprocessor::new(&lexicon).expand_abbreviations(&expander);
        assert_eq!(
            pre.preprocess("Pt has HTN and SOB."),
            "patient has hypertension and shortness of breath."
        );
    }

    #[test]
    fn test_preprocessor_chain() {
        let lexicon = english();
        let pre = Preprocessor::new(&lexicon);
        assert_eq!(pre.preprocess("Dr. Who's  follow-up"), "dr who s follow up");
    }
}
