//! Spans and span merging
//!
//! [`merge_spans`] collapses overlapping or touching intervals into maximal
//! clusters. [`cluster_highlights`] does the same for tagged spans and
//! returns them back to front, which is the order a renderer needs when it
//! splices markup into the text.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span (zero for inverted spans)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if `other` overlaps or touches this span
    pub fn touches(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns true if `offset` lies inside the span
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// A span with a set of classification tags.
///
/// Tags are kept sorted and unique, so merging two spans is a set union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// The covered interval
    pub span: Span,
    tags: SmallVec<[String; 2]>,
}

impl TaggedSpan {
    /// Create an untagged span
    pub fn new(span: Span) -> Self {
        Self {
            span,
            tags: SmallVec::new(),
        }
    }

    /// Create a span carrying one tag
    pub fn with_tag(span: Span, tag: impl Into<String>) -> Self {
        let mut tagged = Self::new(span);
        tagged.add_tag(tag);
        tagged
    }

    /// Add a tag. Surrounding whitespace is dropped and blank tags ignored.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        if let Err(pos) = self.tags.binary_search_by(|t| t.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// The sorted, unique tags
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Display label: tags joined by `", "` and upper-cased.
    pub fn label(&self) -> String {
        self.tags.join(", ").to_uppercase()
    }

    fn absorb(&mut self, other: &TaggedSpan) {
        self.span.start = self.span.start.min(other.span.start);
        self.span.end = self.span.end.max(other.span.end);
        for tag in &other.tags {
            self.add_tag(tag.as_str());
        }
    }
}

/// Merge overlapping or touching spans.
///
/// Empty spans are discarded. The result is sorted ascending and no two
/// spans in it overlap or touch.
///
/// ```
/// use textkit_core::domain::spans::{merge_spans, Span};
///
/// let merged = merge_spans(&[Span::new(0, 5), Span::new(3, 8), Span::new(10, 12)]);
/// assert_eq!(merged, vec![Span::new(0, 8), Span::new(10, 12)]);
/// ```
pub fn merge_spans(spans: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<Span> = spans.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(current) if span.start <= current.end => {
                current.end = current.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Merge overlapping or touching tagged spans into clusters.
///
/// Spans whose start is `<=` the end of the current cluster join it, so
/// touching spans merge. Merged clusters carry the union of their tags.
/// Zero-width spans are discarded. The result is sorted descending by start.
pub fn cluster_highlights(spans: &[TaggedSpan]) -> Vec<TaggedSpan> {
    let mut ordered: Vec<&TaggedSpan> = spans.iter().filter(|s| !s.span.is_empty()).collect();
    ordered.sort_by(|a, b| b.span.cmp(&a.span).then_with(|| b.tags.cmp(&a.tags)));
    ordered.dedup();

    let mut clusters: Vec<TaggedSpan> = Vec::with_capacity(ordered.len());
    for span in ordered.into_iter().rev() {
        match clusters.last_mut() {
            Some(current) if span.span.start <= current.span.end => current.absorb(span),
            _ => clusters.push(span.clone()),
        }
    }
    clusters.reverse();
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().copied().map(Span::from).collect()
    }

    #[test]
    fn test_merge_spans_scenario() {
        let merged = merge_spans(&spans(&[(0, 5), (3, 8), (10, 12)]));
        assert_eq!(merged, spans(&[(0, 8), (10, 12)]));
    }

    #[test]
    fn test_merge_spans_unsorted_and_nested() {
        let merged = merge_spans(&spans(&[(10, 12), (1, 9), (2, 4), (0, 1)]));
        assert_eq!(merged, spans(&[(0, 9), (10, 12)]));
    }

    #[test]
    fn test_merge_spans_touching() {
        let merged = merge_spans(&spans(&[(0, 5), (5, 8)]));
        assert_eq!(merged, spans(&[(0, 8)]));
    }

    #[test]
    fn test_merge_spans_empty() {
        assert!(merge_spans(&[]).is_empty());
        assert!(merge_spans(&spans(&[(3, 3), (5, 2)])).is_empty());
    }

    #[test]
    fn test_span_helpers() {
        let span = Span::new(2, 6);
        assert_eq!(span.len(), 4);
        assert!(span.contains(2));
        assert!(!span.contains(6));
        assert!(span.touches(&Span::new(6, 9)));
        assert!(!span.touches(&Span::new(7, 9)));
        assert_eq!(Span::new(5, 2).len(), 0);
    }

    #[test]
    fn test_tags_sorted_and_unique() {
        let mut span = TaggedSpan::with_tag(Span::new(0, 1), "symptom");
        span.add_tag(" diagnosis ");
        span.add_tag("symptom");
        span.add_tag("   ");
        assert_eq!(span.tags(), &["diagnosis".to_string(), "symptom".to_string()]);
        assert_eq!(span.label(), "DIAGNOSIS, SYMPTOM");
    }

    #[test]
    fn test_cluster_highlights_descending() {
        let input = vec![
            TaggedSpan::new(Span::new(1, 2)),
            TaggedSpan::new(Span::new(5, 7)),
            TaggedSpan::new(Span::new(9, 10)),
        ];
        let clusters = cluster_highlights(&input);
        let starts: Vec<usize> = clusters.iter().map(|c| c.span.start).collect();
        assert_eq!(starts, vec![9, 5, 1]);
    }

    #[test]
    fn test_cluster_highlights_merges_overlaps_and_tags() {
        let input = vec![
            TaggedSpan::with_tag(Span::new(4, 6), "b"),
            TaggedSpan::with_tag(Span::new(1, 3), "a"),
            TaggedSpan::with_tag(Span::new(2, 5), "c"),
            TaggedSpan::with_tag(Span::new(8, 9), "a"),
        ];
        let clusters = cluster_highlights(&input);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].span, Span::new(8, 9));
        assert_eq!(clusters[1].span, Span::new(1, 6));
        assert_eq!(clusters[1].label(), "A, B, C");
    }

    #[test]
    fn test_cluster_highlights_touching_merge() {
        let input = vec![
            TaggedSpan::new(Span::new(1, 3)),
            TaggedSpan::new(Span::new(3, 4)),
            TaggedSpan::new(Span::new(5, 6)),
        ];
        let clusters = cluster_highlights(&input);
        assert_eq!(clusters[0].span, Span::new(5, 6));
        assert_eq!(clusters[1].span, Span::new(1, 4));
    }

    #[test]
    fn test_cluster_highlights_nested_keeps_outer_end() {
        let input = vec![
            TaggedSpan::new(Span::new(1, 10)),
            TaggedSpan::new(Span::new(2, 3)),
        ];
        let clusters = cluster_highlights(&input);
        assert_eq!(clusters, vec![TaggedSpan::new(Span::new(1, 10))]);
    }

    #[test]
    fn test_cluster_highlights_duplicates_and_empty() {
        let span = TaggedSpan::with_tag(Span::new(1, 2), "x");
        let clusters = cluster_highlights(&[span.clone(), span.clone()]);
        assert_eq!(clusters, vec![span]);
        assert!(cluster_highlights(&[]).is_empty());
    }

    #[test]
    fn test_cluster_highlights_drops_zero_width() {
        let input = vec![
            TaggedSpan::with_tag(Span::new(4, 4), "gap"),
            TaggedSpan::with_tag(Span::new(1, 4), "a"),
            TaggedSpan::with_tag(Span::new(7, 7), "b"),
        ];
        let clusters = cluster_highlights(&input);
        assert_eq!(clusters, vec![TaggedSpan::with_tag(Span::new(1, 4), "a")]);
    }
}
