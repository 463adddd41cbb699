//! HTML highlight rendering
//!
//! Highlights are computed on spans first and turned into markup last, so
//! overlapping hits never produce nested or broken tags. All document text
//! is escaped.

use crate::config::HighlightConfig;
use crate::domain::delimiters::DelimiterIndex;
use crate::domain::spans::{cluster_highlights, merge_spans, Span, TaggedSpan};
use crate::domain::vocab::VocabRegex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const STYLE: &str = r#"<style>
.tooltip { position: relative; display: inline-block; border-bottom: 1px dotted black; }
.tooltip .tooltiptext {
  visibility: hidden; width: 200px; background-color: #555; color: #fff;
  text-align: center; padding: 5px 0; border-radius: 6px;
  position: absolute; z-index: 1; bottom: 125%; left: 50%; margin-left: -60px;
  opacity: 0; transition: opacity 0.3s;
}
.tooltip .tooltiptext::after {
  content: ""; position: absolute; top: 100%; left: 50%; margin-left: -5px;
  border-width: 5px; border-style: solid;
  border-color: #555 transparent transparent transparent;
}
.tooltip:hover .tooltiptext { visibility: visible; opacity: 1; }
</style>"#;

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An inclusive, 1-based token range to highlight, optionally labelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHighlight {
    pub start_token: usize,
    pub end_token: usize,
    #[serde(default)]
    pub tag: Option<String>,
}

impl TokenHighlight {
    pub fn new(start_token: usize, end_token: usize) -> Self {
        Self {
            start_token,
            end_token,
            tag: None,
        }
    }

    pub fn tagged(start_token: usize, end_token: usize, tag: impl Into<String>) -> Self {
        Self {
            start_token,
            end_token,
            tag: Some(tag.into()),
        }
    }
}

/// Renders highlighted text as HTML.
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    color: String,
    title: String,
}

impl Default for HighlightRenderer {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

impl HighlightRenderer {
    pub fn new(color: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            title: title.into(),
        }
    }

    /// Renderer using a validated configuration section
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(config.color.clone(), config.title.clone())
    }

    /// Wrap each merged vocabulary hit in a coloured `<span>`.
    ///
    /// ```
    /// use textkit_core::application::highlight::HighlightRenderer;
    /// use textkit_core::domain::vocab::VocabRegex;
    ///
    /// let vocab = VocabRegex::compile(&["fever"], false).unwrap();
    /// let html = HighlightRenderer::new("#ff0", "t").mark_terms("a fever", &vocab);
    /// assert_eq!(html, r#"a <span style="background-color: #ff0">fever</span>"#);
    /// ```
    pub fn mark_terms(&self, text: &str, vocab: &VocabRegex) -> String {
        let spans = merge_spans(&vocab.find_spans(text));
        let mut out = String::with_capacity(text.len() + spans.len() * 48);
        let mut last = 0;
        for span in spans {
            out.push_str(&escape_html(&text[last..span.start]));
            let _ = write!(
                out,
                r#"<span style="background-color: {}">{}</span>"#,
                escape_html(&self.color),
                escape_html(&text[span.start..span.end])
            );
            last = span.end;
        }
        out.push_str(&escape_html(&text[last..]));
        out
    }

    /// Full HTML document with vocabulary hits highlighted
    pub fn render_terms(&self, text: &str, vocab: &VocabRegex) -> String {
        self.document(&self.mark_terms(text, vocab))
    }

    /// Full HTML document with token ranges highlighted.
    ///
    /// Token ranges index the whitespace-delimited tokens of the trimmed
    /// text. Overlapping or adjacent ranges merge, and their tags are shown
    /// together as a tooltip. Ranges outside the text are skipped.
    pub fn render_tokens(&self, text: &str, highlights: &[TokenHighlight]) -> String {
        let text = text.trim();
        let index = DelimiterIndex::whitespace(text);

        let mut spans = Vec::with_capacity(highlights.len());
        for highlight in highlights {
            let Some(span) = index.token_span(highlight.start_token, highlight.end_token) else {
                tracing::debug!(
                    start = highlight.start_token,
                    end = highlight.end_token,
                    "skipping token range outside text"
                );
                continue;
            };
            let mut tagged = TaggedSpan::new(span);
            if let Some(tag) = &highlight.tag {
                tagged.add_tag(tag.as_str());
            }
            spans.push(tagged);
        }

        let clusters = cluster_highlights(&spans);
        let mut body = String::with_capacity(text.len() + clusters.len() * 96);
        let mut last = 0;
        for cluster in clusters.iter().rev() {
            let Span { start, end } = cluster.span;
            body.push_str(&escape_html(&text[last..start]));
            let _ = write!(
                body,
                r#"<span class="tooltip" style="background-color: {}">{}"#,
                escape_html(&self.color),
                escape_html(&text[start..end])
            );
            if !cluster.tags().is_empty() {
                let _ = write!(
                    body,
                    r#"<span class="tooltiptext">{}</span>"#,
                    escape_html(&cluster.label())
                );
            }
            body.push_str("</span>");
            last = end;
        }
        body.push_str(&escape_html(&text[last..]));
        self.document(&body)
    }

    fn document(&self, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{STYLE}\n</head>\n<body>\n<h3>{title}</h3>\n<p style=\"white-space: pre-line\">\n{body}\n</p>\n</body>\n</html>\n",
            title = escape_html(&self.title),
        )
    }
}
