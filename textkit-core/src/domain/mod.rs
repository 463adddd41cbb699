//! Domain primitives
//!
//! Pure text primitives with no configuration of their own: word
//! navigation, delimiter indexing, spans, vocabulary regexes and the
//! word lists they consult.

pub mod delimiters;
pub mod lexicon;
pub mod spans;
pub mod vocab;
pub mod words;

pub use delimiters::DelimiterIndex;
pub use lexicon::Lexicon;
pub use spans::{cluster_highlights, merge_spans, Span, TaggedSpan};
pub use vocab::VocabRegex;
