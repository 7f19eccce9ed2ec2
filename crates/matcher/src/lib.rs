//! # Brandscan Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` scans an ordered sequence of items (usually produced by the
//! `segment` crate) for mentions of a brand and reports where they occur.
//! Every item is tried against three steps, first success wins:
//!
//! 1. **Exact**: the brand as a whole word, case-insensitive, with regex
//!    metacharacters in the brand escaped.
//! 2. **Substring**: case-insensitive containment.
//! 3. **Fuzzy**: any whitespace token, cleaned to alphanumerics, within
//!    `max(min_fuzzy_edits, floor(len * fuzzy_ratio))` Levenshtein edits of the
//!    cleaned brand.
//!
//! ## Numbered lists
//!
//! A leading `"N."` or `"N)"` marker sets the current rank and is stripped
//! before matching. Exact and substring hits report the active rank (when
//! positive) instead of the item position. The rank persists across later
//! unnumbered items until another marker replaces it, so a trailing
//! unnumbered line inherits the previous rank. Fuzzy hits always report the
//! 1-based item position.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: fuzzy tuning knobs and the `explain` switch.
//! - [`BrandMatcher`]: a brand compiled once and scanned many times.
//! - [`MatchResult`]: `mentioned`, `positions`, `position`, optional hits.
//! - [`match_brand`]: one-shot scan with the default configuration.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::match_brand;
//!
//! let items = ["1. Acme Corp", "2. Other Co", "Acme again"];
//! let result = match_brand(&items, "Acme");
//! assert!(result.mentioned);
//! assert_eq!(result.positions, vec![1, 2]);
//! assert_eq!(result.position, Some(1));
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-scan latency and hit counts.

pub mod distance;
pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::distance::{fuzzy_threshold, levenshtein};
pub use crate::engine::{match_brand, BrandMatcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{MatchConfig, MatchError, MatchHit, MatchKind, MatchResult};
