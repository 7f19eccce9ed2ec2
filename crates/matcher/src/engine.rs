use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::distance::{clean, fuzzy_threshold, levenshtein};
use crate::metrics::metrics_recorder;
use crate::types::{MatchConfig, MatchError, MatchHit, MatchKind, MatchResult};

#[cfg(test)]
mod tests;

/// Leading numbered-list marker such as `"1."`, `" 2) "`.
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]+)[.)]\s*").expect("list marker pattern compiles"));

/// A brand prepared for scanning: the word pattern is compiled and the fuzzy
/// form cleaned once, then reused for every item.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    brand: String,
    brand_lower: String,
    word: Option<Regex>,
    cleaned: String,
    threshold: usize,
    fuzzy: bool,
    explain: bool,
}

/// Scan state threaded through the fold over items.
#[derive(Default)]
struct ScanState {
    rank: Option<usize>,
    hits: Vec<MatchHit>,
}

impl BrandMatcher {
    /// Prepare `brand` for matching under `cfg`.
    pub fn new(brand: &str, cfg: &MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self::build(brand, cfg))
    }

    /// Prepare `brand` with the default configuration, which always validates.
    pub fn with_defaults(brand: &str) -> Self {
        Self::build(brand, &MatchConfig::default())
    }

    fn build(brand: &str, cfg: &MatchConfig) -> Self {
        let word = match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(brand))) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(error = %err, "brand word pattern rejected; exact step disabled");
                None
            }
        };
        let cleaned = clean(brand);
        let threshold = fuzzy_threshold(cleaned.chars().count(), cfg);
        // An empty cleaned brand would sit within threshold of every short token.
        let fuzzy = cfg.fuzzy && !cleaned.is_empty();

        Self {
            brand: brand.to_string(),
            brand_lower: brand.to_lowercase(),
            word,
            cleaned,
            threshold,
            fuzzy,
            explain: cfg.explain,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Whether the fuzzy step runs for this brand.
    pub fn fuzzy_enabled(&self) -> bool {
        self.fuzzy
    }

    /// Maximum accepted edit distance for the fuzzy step.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Scan `items` in order and collect reported positions.
    pub fn scan<S: AsRef<str>>(&self, items: &[S]) -> MatchResult {
        if self.brand.trim().is_empty() {
            return MatchResult::empty();
        }

        let start = Instant::now();
        let state = items
            .iter()
            .enumerate()
            .fold(ScanState::default(), |mut state, (index, item)| {
                let text = match split_list_marker(item.as_ref()) {
                    Some((rank, rest)) => {
                        state.rank = rank;
                        rest
                    }
                    None => item.as_ref(),
                };
                if let Some(hit) = self.match_item(index, text, state.rank) {
                    state.hits.push(hit);
                }
                state
            });

        let result = MatchResult::from_hits(state.hits, self.explain);
        tracing::debug!(
            items = items.len(),
            hits = result.positions.len(),
            "brand scan complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_scan(items.len(), start.elapsed(), result.positions.len());
        }
        result
    }

    /// Try exact, then substring, then fuzzy; first success wins.
    fn match_item(&self, index: usize, text: &str, rank: Option<usize>) -> Option<MatchHit> {
        let ranked = rank.filter(|rank| *rank > 0).unwrap_or(index + 1);

        if self.word.as_ref().is_some_and(|re| re.is_match(text)) {
            return Some(MatchHit {
                item_index: index,
                position: ranked,
                kind: MatchKind::Exact,
                distance: None,
            });
        }

        if text.to_lowercase().contains(&self.brand_lower) {
            return Some(MatchHit {
                item_index: index,
                position: ranked,
                kind: MatchKind::Substring,
                distance: None,
            });
        }

        if !self.fuzzy {
            return None;
        }

        // Fuzzy hits report the item position, not the list rank.
        text.split_whitespace()
            .map(|token| levenshtein(&clean(token), &self.cleaned))
            .find(|distance| *distance <= self.threshold)
            .map(|distance| MatchHit {
                item_index: index,
                position: index + 1,
                kind: MatchKind::Fuzzy,
                distance: Some(distance),
            })
    }
}

/// Scan `items` for `brand` with the default configuration.
///
/// Never fails: an empty item sequence or a blank brand yields the empty
/// result.
pub fn match_brand<S: AsRef<str>>(items: &[S], brand: &str) -> MatchResult {
    BrandMatcher::with_defaults(brand).scan(items)
}

/// Split a leading list marker off `item`.
///
/// Returns `None` when `item` has no marker. Otherwise returns the parsed
/// rank and the remaining text; the rank is `None` when the marker's digits
/// do not fit in `usize`, so the item falls back to its own position.
pub(crate) fn split_list_marker(item: &str) -> Option<(Option<usize>, &str)> {
    let caps = LIST_MARKER.captures(item)?;
    let rank = caps.get(1).and_then(|digits| digits.as_str().parse().ok());
    let end = caps.get(0).map_or(0, |whole| whole.end());
    Some((rank, &item[end..]))
}
