use super::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use segment::segment;

use crate::metrics::{set_match_metrics, MatchMetrics};

fn explain_cfg() -> MatchConfig {
    MatchConfig {
        explain: true,
        ..MatchConfig::default()
    }
}

fn explained(items: &[&str], brand: &str) -> MatchResult {
    BrandMatcher::new(brand, &explain_cfg())
        .expect("default config is valid")
        .scan(items)
}

#[test]
fn empty_items_yield_empty_result() {
    let items: Vec<String> = Vec::new();
    let result = match_brand(&items, "Acme");
    assert_eq!(result, MatchResult::empty());
    assert!(!result.mentioned);
    assert_eq!(result.position, None);
}

#[test]
fn blank_brand_yields_empty_result() {
    let result = match_brand(&["Acme", "a b c"], "  ");
    assert_eq!(result, MatchResult::empty());
}

#[test]
fn exact_match_reports_item_position() {
    let result = explained(&["Globex", "I prefer ACME tools", "Initech"], "Acme");
    assert!(result.mentioned);
    assert_eq!(result.positions, vec![2]);
    assert_eq!(result.position, Some(2));
    assert_eq!(result.hits[0].kind, MatchKind::Exact);
    assert_eq!(result.hits[0].item_index, 1);
}

#[test]
fn exact_match_escapes_brand_metacharacters() {
    let result = explained(&["Try Acme.io today", "AcmeXio is different"], "Acme.io");
    assert_eq!(result.positions, vec![1, 2]);
    assert_eq!(result.hits[0].kind, MatchKind::Exact);
    // An unescaped `.` would have made the second item exact too.
    assert_eq!(result.hits[1].kind, MatchKind::Fuzzy);
}

#[test]
fn substring_match_when_no_word_boundary() {
    let result = explained(&["Globex", "SuperAcmeWidgets"], "acme");
    assert_eq!(result.positions, vec![2]);
    assert_eq!(result.hits[0].kind, MatchKind::Substring);
}

#[test]
fn brand_ending_in_symbol_falls_back_to_substring() {
    // `\b` cannot close after `+` followed by a space.
    let result = explained(&["We use C++ daily"], "C++");
    assert_eq!(result.positions, vec![1]);
    assert_eq!(result.hits[0].kind, MatchKind::Substring);
}

#[test]
fn fuzzy_match_within_threshold() {
    let result = explained(&["Globex", "Try Acne products"], "Acme");
    assert_eq!(result.positions, vec![2]);
    assert_eq!(result.hits[0].kind, MatchKind::Fuzzy);
    assert_eq!(result.hits[0].distance, Some(1));
}

#[test]
fn fuzzy_ignores_token_punctuation() {
    let result = explained(&["(Initek)."], "Initech");
    assert_eq!(result.positions, vec![1]);
    assert_eq!(result.hits[0].kind, MatchKind::Fuzzy);
}

#[test]
fn punctuation_only_token_is_scored_against_short_brand() {
    // "—" cleans to "", which is two edits from "hp".
    let result = explained(&["— Lenovo"], "HP");
    assert_eq!(result.positions, vec![1]);
    assert_eq!(result.hits[0].kind, MatchKind::Fuzzy);
    assert_eq!(result.hits[0].distance, Some(2));

    let result = match_brand(&["— Lenovo"], "Lenovo");
    assert_eq!(result.positions, vec![1]);
    assert!(!match_brand(&["— Lenovo"], "Initech").mentioned);
}

#[test]
fn fuzzy_rejects_beyond_threshold() {
    let result = match_brand(&["Globex Corporation", "Umbrella"], "Initech");
    assert!(!result.mentioned);
}

#[test]
fn fuzzy_disabled_by_config() {
    let cfg = MatchConfig {
        fuzzy: false,
        ..MatchConfig::default()
    };
    let matcher = BrandMatcher::new("Acme", &cfg).unwrap();
    assert!(!matcher.fuzzy_enabled());
    assert!(!matcher.scan(&["Acne"]).mentioned);
}

#[test]
fn symbol_only_brand_disables_fuzzy() {
    let matcher = BrandMatcher::new("!!!", &MatchConfig::default()).unwrap();
    assert!(!matcher.fuzzy_enabled());
    // Two-letter tokens would be within two edits of an empty brand.
    assert!(!matcher.scan(&["an ox", "is it"]).mentioned);
    assert_eq!(matcher.scan(&["wow!!!"]).positions, vec![1]);
}

#[test]
fn numbered_rank_replaces_item_position() {
    let items = ["Top picks:", "1. Globex", "2. Acme Corp"];
    let result = match_brand(&items, "Acme");
    assert_eq!(result.positions, vec![2]);
}

#[test]
fn paren_marker_and_whitespace_are_recognized() {
    assert_eq!(split_list_marker("  12)   Acme"), Some((Some(12), "Acme")));
    assert_eq!(split_list_marker("Acme 1."), None);
}

#[test]
fn overflowing_marker_clears_rank() {
    assert_eq!(
        split_list_marker("99999999999999999999999. Acme"),
        Some((None, "Acme"))
    );

    let items = ["3. Globex", "99999999999999999999999. Acme"];
    let result = match_brand(&items, "Acme");
    assert_eq!(result.positions, vec![2]);
}

#[test]
fn marker_digits_do_not_count_as_match_text() {
    let result = match_brand(&["1. Globex", "2. Initech"], "1");
    assert!(!result.mentioned);
}

#[test]
fn rank_carries_over_to_unranked_lines() {
    let items = ["1. Acme Corp", "2. Other Co", "Acme again"];
    let result = match_brand(&items, "Acme");
    assert_eq!(result.positions, vec![1, 2]);
    assert_eq!(result.position, Some(1));
}

#[test]
fn zero_rank_falls_back_to_item_position() {
    let result = match_brand(&["0. Acme"], "Acme");
    assert_eq!(result.positions, vec![1]);
}

#[test]
fn ranks_may_exceed_item_count() {
    let items = ["7. Globex", "8. Acme"];
    let result = match_brand(&items, "Acme");
    assert_eq!(result.positions, vec![8]);
}

#[test]
fn fuzzy_hits_report_item_position_not_rank() {
    let items = ["5. Globex", "6. Acne"];
    let result = explained(&items, "Acme");
    assert_eq!(result.positions, vec![2]);
    assert_eq!(result.hits[0].kind, MatchKind::Fuzzy);
}

#[test]
fn exact_dominates_fuzzy_in_same_item() {
    let result = explained(&["Acne and Acme"], "Acme");
    assert_eq!(result.hits[0].kind, MatchKind::Exact);
    assert_eq!(result.hits[0].distance, None);
}

#[test]
fn one_position_per_item() {
    let result = match_brand(&["Acme, Acme, Acme"], "Acme");
    assert_eq!(result.positions, vec![1]);
}

#[test]
fn repeated_scans_are_identical() {
    let items = segment("1. Acme\n2. Globex\nAcne\n3) Initech, Acme");
    let first = match_brand(&items, "acme");
    let second = match_brand(&items, "acme");
    assert_eq!(first, second);
    assert_eq!(first.positions, vec![1, 3, 3]);
}

#[test]
fn scans_segmented_comma_list() {
    let items = segment("Globex, Initech, Acme");
    let result = match_brand(&items, "Acme");
    assert_eq!(result.positions, vec![3]);
}

#[test]
fn invalid_config_rejected_at_construction() {
    let cfg = MatchConfig {
        fuzzy_ratio: 2.0,
        ..MatchConfig::default()
    };
    assert!(matches!(
        BrandMatcher::new("Acme", &cfg),
        Err(MatchError::InvalidConfig(_))
    ));
}

#[test]
fn threshold_grows_for_long_brands() {
    let matcher = BrandMatcher::new("Internationalization", &MatchConfig::default()).unwrap();
    assert_eq!(matcher.threshold(), 5);
    assert_eq!(matcher.brand(), "Internationalization");
    assert!(matcher.scan(&["Internatonalizaton rocks"]).mentioned);
}

struct RecordingMetrics {
    scans: Mutex<Vec<(usize, usize)>>,
}

impl MatchMetrics for RecordingMetrics {
    fn record_scan(&self, item_count: usize, _latency: Duration, hit_count: usize) {
        self.scans
            .lock()
            .expect("metrics mutex poisoned")
            .push((item_count, hit_count));
    }
}

#[test]
fn metrics_recorder_observes_scans() {
    let recorder = Arc::new(RecordingMetrics {
        scans: Mutex::new(Vec::new()),
    });
    set_match_metrics(Some(recorder.clone()));

    let marker = "metrics-brand-zqx";
    let _ = match_brand(&["a", "b", marker], marker);

    set_match_metrics(None);
    let scans = recorder.scans.lock().unwrap();
    assert!(scans.contains(&(3, 1)));
}
