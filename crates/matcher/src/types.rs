use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which step of the matcher accepted an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Whole-word, case-insensitive occurrence of the brand.
    Exact,
    /// Case-insensitive containment without word boundaries.
    Substring,
    /// A cleaned token within the edit-distance threshold.
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Substring => "substring",
            MatchKind::Fuzzy => "fuzzy",
        }
    }
}

/// Configuration for a brand matcher.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in the umbrella YAML config or passed across process boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Configuration schema version; must be >= 1.
    #[serde(default = "MatchConfig::default_version")]
    pub version: u32,
    /// Enable the edit-distance fallback step.
    #[serde(default = "MatchConfig::default_fuzzy")]
    pub fuzzy: bool,
    /// Share of the cleaned brand length tolerated as edits, in `[0.0, 1.0]`.
    #[serde(default = "MatchConfig::default_fuzzy_ratio")]
    pub fuzzy_ratio: f32,
    /// Floor for the edit tolerance regardless of brand length.
    #[serde(default = "MatchConfig::default_min_fuzzy_edits")]
    pub min_fuzzy_edits: usize,
    /// Populate [`MatchResult::hits`] with per-item detail.
    #[serde(default)]
    pub explain: bool,
}

impl MatchConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_fuzzy() -> bool {
        true
    }

    pub(crate) fn default_fuzzy_ratio() -> f32 {
        0.25
    }

    pub(crate) fn default_min_fuzzy_edits() -> usize {
        2
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version == 0 {
            return Err(MatchError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if !self.fuzzy_ratio.is_finite() || !(0.0..=1.0).contains(&self.fuzzy_ratio) {
            return Err(MatchError::InvalidConfig(
                "fuzzy_ratio must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            fuzzy: Self::default_fuzzy(),
            fuzzy_ratio: Self::default_fuzzy_ratio(),
            min_fuzzy_edits: Self::default_min_fuzzy_edits(),
            explain: false,
        }
    }
}

/// Detail for one accepted item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchHit {
    /// Zero-based index of the item in the scanned sequence.
    pub item_index: usize,
    /// Reported position: the active list rank or the 1-based item position.
    pub position: usize,
    pub kind: MatchKind,
    /// Edit distance of the accepted token, for fuzzy hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

/// Outcome of scanning a sequence of items for a brand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub mentioned: bool,
    /// Reported positions in item order; duplicates allowed.
    pub positions: Vec<usize>,
    /// First entry of `positions`.
    pub position: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hits: Vec<MatchHit>,
}

impl MatchResult {
    /// The "no mention" result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from accepted hits, keeping hit detail only if `explain`.
    pub(crate) fn from_hits(hits: Vec<MatchHit>, explain: bool) -> Self {
        let positions: Vec<usize> = hits.iter().map(|hit| hit.position).collect();
        Self {
            mentioned: !positions.is_empty(),
            position: positions.first().copied(),
            positions,
            hits: if explain { hits } else { Vec::new() },
        }
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.fuzzy);
        assert_eq!(cfg.min_fuzzy_edits, 2);
        assert!((cfg.fuzzy_ratio - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_version_rejected() {
        let cfg = MatchConfig {
            version: 0,
            ..MatchConfig::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        let MatchError::InvalidConfig(msg) = err;
        assert!(msg.contains("version"));
    }

    #[test]
    fn out_of_range_ratio_rejected() {
        for ratio in [-0.1, 1.5, f32::NAN] {
            let cfg = MatchConfig {
                fuzzy_ratio: ratio,
                ..MatchConfig::default()
            };
            let err = cfg.validate().expect_err("config should be invalid");
            let MatchError::InvalidConfig(msg) = err;
            assert!(msg.contains("fuzzy_ratio"));
        }
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{ "explain": true }"#).unwrap();
        assert!(cfg.explain);
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.min_fuzzy_edits, 2);
    }

    #[test]
    fn result_serialization_omits_empty_hits() {
        let value = serde_json::to_value(MatchResult::empty()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "mentioned": false, "positions": [], "position": null })
        );
    }

    #[test]
    fn from_hits_derives_position_fields() {
        let hits = vec![
            MatchHit {
                item_index: 2,
                position: 3,
                kind: MatchKind::Exact,
                distance: None,
            },
            MatchHit {
                item_index: 4,
                position: 5,
                kind: MatchKind::Fuzzy,
                distance: Some(1),
            },
        ];
        let result = MatchResult::from_hits(hits.clone(), false);
        assert!(result.mentioned);
        assert_eq!(result.positions, vec![3, 5]);
        assert_eq!(result.position, Some(3));
        assert!(result.hits.is_empty());

        let explained = MatchResult::from_hits(hits, true);
        assert_eq!(explained.hits.len(), 2);
        assert_eq!(explained.hits[1].kind.as_str(), "fuzzy");
    }
}
