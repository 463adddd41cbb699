//! Word-aligned text windows and excerpt extraction
//!
//! This crate splits documents into overlapping windows that never cut a
//! word in half, pulls fixed-radius excerpts around vocabulary terms and
//! dates, and merges highlight spans for rendering. Around that core sit
//! the helpers a text pipeline usually needs: preprocessing, vocabulary
//! building, near-duplicate detection, surface statistics and occurrence
//! timelines.
//!
//! # Architecture
//!
//! - **Domain layer**: word navigation, delimiter indexes, spans and
//!   vocabulary regexes, with no configuration of their own
//! - **Application layer**: the operations built from those primitives
//! - **Configuration**: validated, TOML-loadable settings shared by both
//!
//! # Example
//!
//! ```rust
//! use textkit_core::{windows_by_terms, WindowBuilder};
//!
//! let builder = WindowBuilder::with_size(9, 5).unwrap();
//! let texts: Vec<String> = builder.window_texts(&["the quick brown fox jumps"]);
//! assert_eq!(texts, vec!["the", "brown", "fox"]);
//!
//! let notes = ["the patient saw the doctor on monday"];
//! let excerpts = windows_by_terms(&notes, &["doctor"], 5, false).unwrap();
//! assert_eq!(excerpts[0].text.trim(), "the doctor on");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

pub use application::{
    build_vocab, capitalized_chains, most_common_date_near, split_into_sentences,
    trigram_frequencies, vocab_preprocess, windows_by_dates, windows_by_indices,
    windows_by_pattern, windows_by_terms, AbbreviationExpander, DateResolver, DateWindow, Excerpt,
    HighlightRenderer, PatternDateResolver, Preprocessor, ResolvedDate, TextProfile,
    TokenHighlight, Vectorizer, Window, WindowBuilder,
};
pub use config::{
    ExtractionConfig, HighlightConfig, SimilarityConfig, TextkitConfig, TimelineConfig,
    WindowConfig, WindowConfigBuilder,
};
pub use domain::{
    cluster_highlights, merge_spans, DelimiterIndex, Lexicon, Span, TaggedSpan, VocabRegex,
};
pub use error::{Error, Result};
