//! Edit-distance helpers for the fuzzy matching step.

use crate::types::MatchConfig;

/// Case-insensitive Levenshtein distance between `a` and `b`, in chars.
///
/// Empty inputs short-circuit to the other side's length.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Maximum accepted edit distance for a cleaned brand of `brand_len` chars:
/// `max(min_fuzzy_edits, floor(brand_len * fuzzy_ratio))`.
pub fn fuzzy_threshold(brand_len: usize, cfg: &MatchConfig) -> usize {
    let scaled = (brand_len as f64 * f64::from(cfg.fuzzy_ratio)).floor() as usize;
    scaled.max(cfg.min_fuzzy_edits)
}

/// Lowercased alphanumeric characters of `text`.
pub(crate) fn clean(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
