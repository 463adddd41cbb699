//! Application layer
//!
//! Text operations built on the domain primitives: window building,
//! excerpt extraction, preprocessing, similarity, statistics and
//! rendering. Each module is usable on its own; [`crate::config`] carries
//! the tunables they share.
//!
//! # Example
//!
//! ```rust
//! use textkit_core::application::WindowBuilder;
//!
//! let builder = WindowBuilder::with_size(3, 1).unwrap();
//! let windows = builder.windows(&["the quick brown fox"]);
//! assert!(!windows.is_empty());
//! ```

pub mod dates;
pub mod entities;
pub mod extraction;
pub mod highlight;
pub mod preprocess;
pub mod similarity;
pub mod stats;
pub mod timeline;
pub mod vectorize;
pub mod vocabulary;
pub mod windows;

pub use dates::{DateResolver, PatternDateResolver, ResolvedDate};
pub use entities::capitalized_chains;
pub use extraction::{
    most_common_date_near, windows_by_dates, windows_by_indices, windows_by_pattern,
    windows_by_terms, DateWindow, Excerpt,
};
pub use highlight::{HighlightRenderer, TokenHighlight};
pub use preprocess::{split_into_sentences, AbbreviationExpander, Preprocessor};
pub use similarity::{repeated_delete, repeated_find, unique_by_jaccard, JaccardMode};
pub use stats::TextProfile;
pub use timeline::{entity_timelines, timeline, timeline_ranking};
pub use vectorize::{trigram_frequencies, vocab_counts, Vectorizer};
pub use vocabulary::{build_vocab, vocab_preprocess};
pub use windows::{Window, WindowBuilder};
