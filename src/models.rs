//! Data models for the comparison engine.
//!
//! This module contains the per-text analysis records produced by the
//! upstream analyzer and the comparison report built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level assigned to a text from its overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - little sign of manipulation
    Low,
    /// Medium risk - some loaded or persuasive content
    Medium,
    /// High risk - strong propaganda indicators
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl RiskLevel {
    /// Returns an emoji representation of the risk level.
    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🔴",
        }
    }
}

/// A propaganda technique detected in a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagandaTechnique {
    /// Technique identifier, e.g. "Fear Mongering".
    pub technique: String,
    /// Detection confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
    /// Excerpt supporting the detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Keyword that triggered a rule-based detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl PropagandaTechnique {
    /// Creates a technique detection without evidence.
    pub fn new(technique: impl Into<String>, confidence: f64) -> Self {
        Self {
            technique: technique.into(),
            confidence,
            evidence: None,
            keyword: None,
        }
    }
}

/// The detailed analysis section of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    /// Emotional intensity in [0, 100].
    pub emotional_intensity: f64,
    /// Urgency score in [0, 100].
    #[serde(default)]
    pub urgency_score: f64,
    /// Detected techniques in analyzer order.
    #[serde(default)]
    pub propaganda_techniques: Vec<PropagandaTechnique>,
    /// Signed ideological bias, when the analyzer reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideological_bias: Option<f64>,
}

/// One analyzed text, as returned by the single-text analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Display name, unique within a batch by convention.
    #[serde(default)]
    pub label: String,
    /// Aggregate bias/propaganda risk score in [0, 100].
    pub overall_score: f64,
    /// Risk level derived from `overall_score`.
    pub risk_level: RiskLevel,
    /// Detailed scores and detections.
    pub analysis: TextAnalysis,
}

impl AnalysisRecord {
    /// Creates a record with no techniques and zero intensity scores.
    pub fn new(label: impl Into<String>, overall_score: f64, risk_level: RiskLevel) -> Self {
        Self {
            label: label.into(),
            overall_score,
            risk_level,
            analysis: TextAnalysis::default(),
        }
    }

    /// Iterates over the technique names detected in this text.
    pub fn technique_names(&self) -> impl Iterator<Item = &str> {
        self.analysis
            .propaganda_techniques
            .iter()
            .map(|t| t.technique.as_str())
    }
}

/// A ranked entry in the risk comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub label: String,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
}

impl From<&AnalysisRecord> for RiskEntry {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            label: record.label.clone(),
            overall_score: record.overall_score,
            risk_level: record.risk_level,
        }
    }
}

/// Kind of a key difference between two texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    SignificantRiskDifference,
}

/// A pair of consecutive texts whose risk scores diverge sharply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDifference {
    pub kind: DifferenceKind,
    /// Label of the earlier text in input order.
    pub label_a: String,
    /// Label of the later text in input order.
    pub label_b: String,
    /// Absolute score delta in points.
    pub difference: f64,
    /// Human readable summary, higher-risk text first.
    pub description: String,
}

/// A technique shared by two or more texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPattern {
    pub technique: String,
    /// Labels exhibiting the technique, in input order.
    pub labels: Vec<String>,
}

/// A ranked entry in the emotional intensity comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalEntry {
    pub label: String,
    pub emotional_intensity: f64,
    pub urgency_score: f64,
}

impl From<&AnalysisRecord> for EmotionalEntry {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            label: record.label.clone(),
            emotional_intensity: record.analysis.emotional_intensity,
            urgency_score: record.analysis.urgency_score,
        }
    }
}

/// Per-text technique breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueProfile {
    pub label: String,
    /// Number of detections, repeats included.
    pub technique_count: usize,
    /// Distinct technique names in first-seen order.
    pub unique_techniques: Vec<String>,
}

/// Per-text ideological bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideological_bias: Option<f64>,
}

/// Cross-text insights for one comparison batch.
///
/// Immutable once built; contains nothing time- or environment-dependent so
/// that building twice from the same batch serializes identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Records ranked by overall score, highest first.
    pub risk_comparison: Vec<RiskEntry>,
    /// Consecutive pairs whose score delta exceeds the threshold.
    pub key_differences: Vec<KeyDifference>,
    /// Techniques present in at least two texts.
    pub common_patterns: Vec<CommonPattern>,
    /// Records ranked by emotional intensity, highest first.
    pub emotional_intensity_comparison: Vec<EmotionalEntry>,
    /// Technique breakdown per text, in input order.
    pub technique_comparison: Vec<TechniqueProfile>,
    /// Ideological bias per text, in input order.
    pub bias_comparison: Vec<BiasEntry>,
}

/// Metadata about a rendered comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the document was rendered.
    pub generated_at: DateTime<Utc>,
    /// Number of texts in the batch.
    pub texts_compared: usize,
    /// Threshold used for key differences.
    pub significance_threshold: f64,
    /// Input files the records were loaded from.
    pub sources: Vec<String>,
}

/// A comparison report wrapped with rendering metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonDocument {
    pub metadata: ReportMetadata,
    pub report: ComparisonReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_risk_level_serde() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let level: RiskLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let json = r#"{
            "label": "Op-ed",
            "overall_score": 72.5,
            "risk_level": "high",
            "highlighted_text": "<mark>...</mark>",
            "timestamp": "2024-01-01T00:00:00",
            "analysis": {
                "emotional_intensity": 64.0,
                "urgency_score": 40.0,
                "ideological_bias": -12.0,
                "named_entities": [],
                "propaganda_techniques": [
                    {"technique": "Fear Mongering", "confidence": 0.9, "keyword": "disaster"}
                ]
            }
        }"#;

        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.label, "Op-ed");
        assert_eq!(record.risk_level, RiskLevel::High);
        assert_eq!(record.analysis.ideological_bias, Some(-12.0));
        assert_eq!(
            record.technique_names().collect::<Vec<_>>(),
            vec!["Fear Mongering"]
        );
        assert_eq!(
            record.analysis.propaganda_techniques[0].keyword.as_deref(),
            Some("disaster")
        );
    }

    #[test]
    fn test_missing_label_defaults_to_empty() {
        let json = r#"{"overall_score": 10, "risk_level": "low",
                       "analysis": {"emotional_intensity": 5}}"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert!(record.label.is_empty());
        assert!(record.analysis.propaganda_techniques.is_empty());
        assert_eq!(record.analysis.urgency_score, 0.0);
    }

    #[test]
    fn test_difference_kind_serde() {
        let json = serde_json::to_string(&DifferenceKind::SignificantRiskDifference).unwrap();
        assert_eq!(json, "\"significant_risk_difference\"");
    }
}
