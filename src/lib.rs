//! Workspace umbrella crate for Brandscan.
//!
//! This crate stitches together response normalization, item segmentation and
//! brand matching so callers can go from a raw provider payload to a match
//! report with a single API entry point.

pub mod config;

pub use crate::config::{BrandscanConfig, ConfigLoadError};
pub use matcher::{
    BrandMatcher, MatchConfig, MatchError, MatchHit, MatchKind, MatchMetrics, MatchResult,
    fuzzy_threshold, levenshtein, match_brand, set_match_metrics,
};
pub use normalize::{RawResponse, ResponseShape, normalize, parse_payload};
pub use segment::{SegmentStrategy, Segmentation, segment, segment_with_strategy};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Everything learned about one payload: the text it normalized to, how that
/// text was segmented, and where the brand was found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandReport {
    pub brand: String,
    pub shape: ResponseShape,
    pub strategy: SegmentStrategy,
    pub items: Vec<String>,
    #[serde(flatten)]
    pub result: MatchResult,
    pub raw_text: String,
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, shape: ResponseShape, text_len: usize);
    fn record_segment(&self, latency: Duration, strategy: SegmentStrategy, item_count: usize);
    fn record_match(&self, latency: Duration, mentioned: bool);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_normalize(self, shape: ResponseShape, text_len: usize) {
        self.recorder
            .record_normalize(self.start.elapsed(), shape, text_len);
    }

    fn record_segment(self, strategy: SegmentStrategy, item_count: usize) {
        self.recorder
            .record_segment(self.start.elapsed(), strategy, item_count);
    }

    fn record_match(self, mentioned: bool) {
        self.recorder.record_match(self.start.elapsed(), mentioned);
    }
}

/// Run the full pipeline with an explicit, pre-built matcher.
/// Never fails: unknown payload shapes degrade to their stringified form.
pub fn check_brand_with(raw: &Value, matcher: &BrandMatcher) -> BrandReport {
    let normalize_metrics = MetricsSpan::start();
    let response = RawResponse::classify(raw);
    let shape = response.shape();
    let raw_text = response.into_text();
    tracing::debug!(shape = shape.as_str(), text_len = raw_text.len(), "normalized payload");
    if let Some(span) = normalize_metrics {
        span.record_normalize(shape, raw_text.len());
    }

    let segment_metrics = MetricsSpan::start();
    let Segmentation { items, strategy } = segment_with_strategy(&raw_text);
    if let Some(span) = segment_metrics {
        span.record_segment(strategy, items.len());
    }

    let match_metrics = MetricsSpan::start();
    let result = matcher.scan(&items);
    if let Some(span) = match_metrics {
        span.record_match(result.mentioned);
    }

    BrandReport {
        brand: matcher.brand().to_string(),
        shape,
        strategy,
        items,
        result,
        raw_text,
    }
}

/// Run the full pipeline with the matcher settings from `cfg`.
pub fn check_brand_with_config(
    raw: &Value,
    brand: &str,
    cfg: &MatchConfig,
) -> Result<BrandReport, MatchError> {
    let matcher = BrandMatcher::new(brand, cfg)?;
    Ok(check_brand_with(raw, &matcher))
}

/// Run the full pipeline with the default matcher configuration.
pub fn check_brand(raw: &Value, brand: &str) -> BrandReport {
    check_brand_with(raw, &BrandMatcher::with_defaults(brand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn check_brand_runs_all_stages() {
        let raw = json!({
            "choices": [{ "message": { "content": "1. Globex\n2. Acme Corp\n3. Initech" } }],
        });
        let report = check_brand(&raw, "Acme");

        assert_eq!(report.shape, ResponseShape::Choices);
        assert_eq!(report.strategy, SegmentStrategy::Lines);
        assert_eq!(report.items.len(), 3);
        assert!(report.result.mentioned);
        assert_eq!(report.result.positions, vec![2]);
        assert_eq!(report.raw_text, "1. Globex\n2. Acme Corp\n3. Initech");
    }

    #[test]
    fn report_serializes_flat() {
        let report = check_brand(&json!("Acme, Globex"), "Globex");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mentioned"], json!(true));
        assert_eq!(value["positions"], json!([2]));
        assert_eq!(value["position"], json!(2));
        assert_eq!(value["strategy"], json!("delimited"));
        assert_eq!(value["shape"], json!("text"));
        assert!(value.get("hits").is_none());
    }

    #[test]
    fn invalid_config_is_reported() {
        let cfg = MatchConfig {
            version: 0,
            ..MatchConfig::default()
        };
        let err = check_brand_with_config(&json!("Acme"), "Acme", &cfg).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    struct StageCounter {
        stages: Mutex<Vec<&'static str>>,
    }

    impl PipelineMetrics for StageCounter {
        fn record_normalize(&self, _latency: Duration, _shape: ResponseShape, _text_len: usize) {
            self.stages.lock().unwrap().push("normalize");
        }

        fn record_segment(&self, _latency: Duration, _strategy: SegmentStrategy, _count: usize) {
            self.stages.lock().unwrap().push("segment");
        }

        fn record_match(&self, _latency: Duration, _mentioned: bool) {
            self.stages.lock().unwrap().push("match");
        }
    }

    #[test]
    fn metrics_observe_each_stage() {
        let counter = Arc::new(StageCounter {
            stages: Mutex::new(Vec::new()),
        });
        set_pipeline_metrics(Some(counter.clone()));
        let _ = check_brand(&json!("Acme"), "Acme");
        set_pipeline_metrics(None);

        // Other tests may run the pipeline concurrently while the hook is set.
        let stages = counter.stages.lock().unwrap();
        for stage in ["normalize", "segment", "match"] {
            assert!(stages.contains(&stage), "missing {stage}");
        }
    }
}
