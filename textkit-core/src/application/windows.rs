//! Sliding window builder
//!
//! Windows are laid out in character space and then snapped inward to the
//! page's whitespace delimiters, so no window starts or ends inside a
//! token. Token numbers run on across pages.

use crate::config::WindowConfig;
use crate::domain::delimiters::DelimiterIndex;
use crate::domain::spans::Span;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One snapped window over a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// 1-based page number (0 only for the sentinel)
    pub page: usize,
    /// First token, 1-based and cumulative across pages
    pub start_token: usize,
    /// Last token, inclusive
    pub end_token: usize,
    /// Byte span in the untrimmed page
    pub span: Span,
    /// Window text with surrounding whitespace removed
    pub text: String,
}

impl Window {
    /// Placeholder returned when no page produced a window
    pub fn sentinel() -> Self {
        Self {
            page: 0,
            start_token: 0,
            end_token: 0,
            span: Span::new(0, 0),
            text: String::new(),
        }
    }

    /// Returns true for the placeholder window
    pub fn is_sentinel(&self) -> bool {
        self.page == 0
    }
}

/// Builds overlapping word-aligned windows over a sequence of pages.
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    config: WindowConfig,
}

impl WindowBuilder {
    /// Create a builder, rejecting invalid sizes and steps
    pub fn new(config: WindowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Shorthand for `WindowBuilder::new(WindowConfig::new(size, step)?)`
    pub fn with_size(size: usize, step: usize) -> Result<Self> {
        Self::new(WindowConfig::new(size, step)?)
    }

    /// The active configuration
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Windows with page and token metadata.
    ///
    /// Returns a single [`Window::sentinel`] when no page yields a window.
    ///
    /// ```
    /// use textkit_core::application::windows::WindowBuilder;
    ///
    /// let builder = WindowBuilder::with_size(9, 5).unwrap();
    /// let windows = builder.windows(&["the quick brown fox jumps"]);
    /// let texts: Vec<&str> = windows.iter().map(|w| w.text.as_str()).collect();
    /// assert_eq!(texts, vec!["the", "brown", "fox"]);
    /// ```
    pub fn windows<S: AsRef<str>>(&self, pages: &[S]) -> Vec<Window> {
        let windows = self.build(pages);
        if windows.is_empty() {
            vec![Window::sentinel()]
        } else {
            windows
        }
    }

    /// Only the window texts. Empty when no page yields a window.
    pub fn window_texts<S: AsRef<str>>(&self, pages: &[S]) -> Vec<String> {
        self.build(pages).into_iter().map(|w| w.text).collect()
    }

    fn build<S: AsRef<str>>(&self, pages: &[S]) -> Vec<Window> {
        let mut output = Vec::new();
        let mut tokens_before = 0;

        for (page_idx, page) in pages.iter().enumerate() {
            let page = page.as_ref();
            let text = page.trim();
            if text.is_empty() {
                continue;
            }
            let lead = page.len() - page.trim_start().len();
            let index = DelimiterIndex::whitespace(text);
            let before = output.len();

            self.page_windows(text, &index, |start, end| {
                let (Some(start_rank), Some(end_rank)) =
                    (index.token_index_of(start), index.token_index_of(end))
                else {
                    return;
                };
                output.push(Window {
                    page: page_idx + 1,
                    start_token: tokens_before + start_rank,
                    end_token: tokens_before + end_rank - 1,
                    span: Span::new(lead + start, lead + end),
                    text: text[start..end].trim().to_string(),
                });
            });

            tracing::trace!(
                page = page_idx + 1,
                windows = output.len() - before,
                tokens = index.token_count(),
                "windowed page"
            );
            tokens_before += index.token_count();
        }

        tracing::debug!(
            pages = pages.len(),
            windows = output.len(),
            size = self.config.size,
            step = self.config.step,
            "built windows"
        );
        output
    }

    /// Emit the distinct snapped `(start, end)` byte pairs of one trimmed page.
    fn page_windows(&self, text: &str, index: &DelimiterIndex, mut emit: impl FnMut(usize, usize)) {
        let mut char_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_len = char_offsets.len();
        char_offsets.push(text.len());

        if char_len <= self.config.size {
            emit(0, text.len());
            return;
        }

        let size = if self.config.size % 2 == 0 {
            self.config.size - 1
        } else {
            self.config.size
        };
        let radius = (size - 1) / 2;
        let step = self.config.step;
        let last_k = (char_len - 2 * radius - 1) / step;

        let mut seen = HashSet::new();
        for k in 0..=last_k {
            let centre = radius + k * step;
            let raw_start = char_offsets[centre.saturating_sub(radius)];
            let raw_end = char_offsets[(centre + radius + 1).min(char_len)];

            let Some(start) = index.ceil(raw_start) else {
                continue;
            };
            let Some(end) = index.floor(raw_end) else {
                continue;
            };
            if start < end && seen.insert((start, end)) {
                emit(start, end);
            }
        }
    }
}
