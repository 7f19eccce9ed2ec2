//! Brandscan item segmentation.
//!
//! Model output is usually newline-delimited (numbered or bulleted lists), so
//! lines are the first choice of item. When the text is a single line, it is
//! re-split on commas and semicolons so a reply like `"Acme, Globex, Initech"`
//! still yields discrete items.
//!
//! This is a heuristic. Prose with internal commas on one line over-segments;
//! callers that need sentence boundaries should not rely on it.
//!
//! ```rust
//! use segment::segment;
//!
//! assert_eq!(segment("1. Acme\n\n2. Globex\n"), vec!["1. Acme", "2. Globex"]);
//! assert_eq!(segment("Acme, Globex; Initech"), vec!["Acme", "Globex", "Initech"]);
//! ```

use serde::{Deserialize, Serialize};

/// Which split produced the items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStrategy {
    /// One item per non-blank line.
    Lines,
    /// Single-line text split on commas, semicolons and line breaks.
    Delimited,
}

impl SegmentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentStrategy::Lines => "lines",
            SegmentStrategy::Delimited => "delimited",
        }
    }
}

/// Segmented items plus the strategy that produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segmentation {
    pub items: Vec<String>,
    pub strategy: SegmentStrategy,
}

/// Split `text` into ordered, trimmed, non-empty items.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_strategy(text).items
}

/// Like [`segment`], but also reports which split was used.
pub fn segment_with_strategy(text: &str) -> Segmentation {
    if text.is_empty() {
        return Segmentation {
            items: Vec::new(),
            strategy: SegmentStrategy::Lines,
        };
    }

    let lines = collect_items(text.lines());
    if lines.len() > 1 {
        tracing::debug!(items = lines.len(), "segmented by lines");
        return Segmentation {
            items: lines,
            strategy: SegmentStrategy::Lines,
        };
    }

    let items = collect_items(text.split(is_delimiter));
    tracing::debug!(items = items.len(), "segmented by delimiters");
    Segmentation {
        items,
        strategy: SegmentStrategy::Delimited,
    }
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ';' | '\n' | '\r')
}

fn collect_items<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
